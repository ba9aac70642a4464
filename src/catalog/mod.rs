//! # Catalog Module
//!
//! The built-in content set: the standard materials, the weapon parts and
//! decorations, and the weapons assembled from them.
//!
//! Content loaded from JSON can be layered on top by declaring it into the
//! same registry builder as [`weapons::standard_decls`].

pub mod materials;
pub mod weapons;

pub use materials::standard_materials;

use crate::choice::ChoiceSpec;
use crate::spec::{SpecRegistry, SpecRegistryBuilder};
use crate::TreasureResult;

/// A registry builder pre-loaded with every built-in declaration.
pub fn standard_builder() -> SpecRegistryBuilder {
    SpecRegistry::builder().declare_all(weapons::standard_decls())
}

/// The validated registry of built-in specs.
///
/// # Examples
///
/// ```
/// let registry = treasure::catalog::standard_registry().unwrap();
/// assert!(registry.contains("Greatsword"));
/// assert_eq!(registry.get("GreatswordCurved").unwrap().label, "Curved Greatsword");
/// ```
pub fn standard_registry() -> TreasureResult<SpecRegistry> {
    standard_builder().build()
}

/// Weapon categories, each weighted by how many weapons it holds.
pub fn weapon_categories() -> ChoiceSpec<String> {
    let categories: [&[&str]; 5] = [
        &weapons::SWORDS,
        &weapons::KNIVES,
        &weapons::BLUDGEONS,
        &weapons::CLEAVERS,
        &weapons::POLEARMS,
    ];
    ChoiceSpec::weighted(
        categories
            .iter()
            .map(|names| ChoiceSpec::values(names.iter().copied()))
            .collect(),
        categories.iter().map(|names| names.len() as f64).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::DamageAxis;

    #[test]
    fn test_standard_registry_builds() {
        let registry = standard_registry().unwrap();
        for name in weapon_categories().leaves() {
            let spec = registry.get(name).unwrap();
            assert_eq!(spec.base_type, "weapon", "{}", name);
            assert!(spec.damager.is_some(), "{} has no damager", name);
        }
    }

    #[test]
    fn test_inherited_part_values() {
        let registry = standard_registry().unwrap();

        let big = registry.get("BladeBig").unwrap();
        let damage = big.damage.as_ref().unwrap();
        assert_eq!(big.size, 14.0);
        assert_eq!(damage.base_speed, Some(6.0));
        assert_eq!(damage.good, vec![DamageAxis::Slice]);
        assert_eq!(damage.bad, vec![DamageAxis::Pierce]);
        // Table inherited from Blade
        assert!(damage.type_damage.as_ref().unwrap().contains_key(&DamageAxis::Pierce));

        let sphere = registry.get("Sphere").unwrap();
        assert_eq!(sphere.damage.as_ref().unwrap().effectiveness, 2.0);
        assert_eq!(sphere.additions.len(), 1);
    }

    #[test]
    fn test_stiletto_has_no_guard() {
        let registry = standard_registry().unwrap();
        let stiletto = registry.get("Stiletto").unwrap();
        assert!(!stiletto.components.contains_key("Guard"));
        assert_eq!(stiletto.damager.as_deref(), Some("Blade"));
    }

    #[test]
    fn test_categories_weighted_by_size() {
        match weapon_categories() {
            ChoiceSpec::Options { choices, weights } => {
                assert_eq!(choices.len(), 5);
                assert_eq!(weights, Some(vec![4.0, 3.0, 3.0, 1.0, 4.0]));
            }
            ChoiceSpec::Terminal(_) => panic!("categories must be a list"),
        }
    }
}
