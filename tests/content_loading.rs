//! Integration tests for JSON-declared specs and materials.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;
use treasure::{
    build, catalog, BuildContext, DamageRating, MaterialCatalog, SpecRegistry, TreasureError,
    TreasureResult,
};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const TRINKET_SPECS: &str = r#"[
    {
        "name": "Trinket",
        "base_type": "trinket",
        "size": 1.0,
        "materials": {"choices": ["Pewter", "Copper"], "weights": [3, 1]},
        "traits": {"Shape": ["star", "moon"]}
    },
    {
        "name": "Amulet",
        "extends": "Trinket",
        "label": "amulet",
        "components": {"Chain": "Chain", "Charm": [null, "Trinket"]},
        "attributes": {
            "Inscription": {"min": 0, "max": 2, "choices": ["a vow", "a name", "a date"]}
        }
    },
    {
        "name": "Chain",
        "size": 2.0,
        "materials": ["Copper"]
    }
]"#;

const TRINKET_MATERIALS: &str = r#"[
    {"name": "Pewter", "category": "metal", "fields": {"Density": 7.3}},
    {"name": "Copper", "category": "metal", "fields": {"Density": 8.9, "Hardness": 3.0}}
]"#;

#[test]
fn test_json_specs_and_materials_from_files() -> TreasureResult<()> {
    let specs = write_temp(TRINKET_SPECS);
    let materials = write_temp(TRINKET_MATERIALS);

    let registry = SpecRegistry::from_json_file(specs.path())?;
    let materials = MaterialCatalog::from_json_file(materials.path())?;
    assert_eq!(registry.len(), 3);
    assert_eq!(materials.len(), 2);

    let mut rng = StdRng::seed_from_u64(11);
    let mut ctx = BuildContext::new(&registry, &materials, &mut rng);
    let amulet = build("Amulet", &mut ctx)?;

    assert_eq!(amulet.label(), "amulet");
    assert_eq!(amulet.base_type(), "trinket");
    assert!(amulet.trait_value("Shape").is_some());
    assert_eq!(amulet.component("Chain").unwrap().material().unwrap().name, "Copper");
    assert!(amulet.attribute("Inscription").unwrap().len() <= 2);

    // No part declares a damage table.
    assert_eq!(amulet.damage_rating(), DamageRating::ZERO);
    assert!(amulet.weight() > 0.0);
    assert_eq!(amulet.reach(), 0.0);
    Ok(())
}

#[test]
fn test_json_specs_extend_standard_catalog() -> TreasureResult<()> {
    let specs = r#"[
        {
            "name": "WarPick",
            "extends": "Weapon",
            "label": "War Pick",
            "damager": "Head",
            "components": {"Head": "Spike", "Handle": "HandleLong"}
        }
    ]"#;
    let registry = catalog::standard_builder().declare_json(specs)?.build()?;
    let materials = catalog::standard_materials();

    let mut rng = StdRng::seed_from_u64(1);
    let mut ctx = BuildContext::new(&registry, &materials, &mut rng);
    let pick = build("WarPick", &mut ctx)?;

    assert_eq!(pick.base_type(), "weapon");
    assert_eq!(pick.reach(), 6.0 + 4.0);
    assert!(pick.damage_rating().total() > 0.0);
    Ok(())
}

#[test]
fn test_missing_catalog_material_fails_build() -> TreasureResult<()> {
    let registry = SpecRegistry::from_json_str(TRINKET_SPECS)?;
    let materials = MaterialCatalog::from_json_str(
        r#"[{"name": "Pewter", "fields": {"Density": 7.3}}]"#,
    )?;

    let mut rng = StdRng::seed_from_u64(2);
    let mut ctx = BuildContext::new(&registry, &materials, &mut rng);
    let result = build("Chain", &mut ctx);
    assert!(matches!(result, Err(TreasureError::MissingMaterial(name)) if name == "Copper"));
    Ok(())
}

#[test]
fn test_malformed_json_is_rejected() {
    let unknown_component = r#"[{"name": "Box", "components": {"Lid": "Lid"}}]"#;
    assert!(matches!(
        SpecRegistry::from_json_str(unknown_component),
        Err(TreasureError::UnknownType(_))
    ));

    let bad_weights = r#"[{"name": "Box", "materials": {"choices": ["Oak"], "weights": [1, 2]}}]"#;
    assert!(matches!(
        SpecRegistry::from_json_str(bad_weights),
        Err(TreasureError::InvalidSpec(_))
    ));

    assert!(matches!(
        MaterialCatalog::from_json_str("{not json"),
        Err(TreasureError::Serde(_))
    ));

    assert!(matches!(
        SpecRegistry::from_json_file("/nonexistent/specs.json"),
        Err(TreasureError::Io(_))
    ));
}
