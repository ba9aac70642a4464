//! Built-in materials.

use crate::material::{Material, MaterialCatalog};

/// Metals weapons are forged from, most common first.
pub const WEAPON_METALS: [&str; 4] = ["Steel", "Iron", "Bronze", "Mithril"];
pub const WEAPON_METAL_WEIGHTS: [f64; 4] = [100.0, 90.0, 50.0, 1.0];

pub const HANDLE_MATERIALS: [&str; 4] = ["Oak", "Ash", "Yew", "Bone"];
pub const HANDLE_MATERIAL_WEIGHTS: [f64; 4] = [5.0, 4.0, 2.0, 1.0];

pub const PRECIOUS_METALS: [&str; 2] = ["Gold", "Silver"];
pub const GEMS: [&str; 4] = ["Ruby", "Sapphire", "Emerald", "Garnet"];

fn material(name: &str, category: &str, density: f64, hardness: f64, flexibility: f64) -> Material {
    Material::new(name)
        .with_category(category)
        .with_field("Density", density)
        .with_field("Hardness", hardness)
        .with_field("Flexibility", flexibility)
}

/// The standard material catalog.
pub fn standard_materials() -> MaterialCatalog {
    [
        material("Steel", "metal", 7.8, 6.0, 5.0),
        material("Iron", "metal", 7.9, 4.5, 3.0),
        material("Bronze", "metal", 8.8, 3.5, 4.0),
        material("Mithril", "metal", 3.2, 9.0, 8.0),
        material("Gold", "precious", 19.3, 2.5, 6.0),
        material("Silver", "precious", 10.5, 2.7, 5.0),
        material("Oak", "wood", 0.75, 3.0, 4.0),
        material("Ash", "wood", 0.68, 3.0, 6.0),
        material("Yew", "wood", 0.67, 2.5, 8.0),
        material("Bone", "organic", 1.9, 3.5, 2.0),
        material("Ruby", "gem", 4.0, 9.0, 0.0),
        material("Sapphire", "gem", 4.0, 9.0, 0.0),
        material("Emerald", "gem", 2.76, 7.5, 0.0),
        material("Garnet", "gem", 3.9, 7.0, 0.0),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_material_exists() {
        let catalog = standard_materials();
        for name in WEAPON_METALS
            .iter()
            .chain(&HANDLE_MATERIALS)
            .chain(&PRECIOUS_METALS)
            .chain(&GEMS)
        {
            let material = catalog.get(name).unwrap();
            assert!(material.density().unwrap() > 0.0, "{} has no density", name);
        }
    }
}
