//! # Material Module
//!
//! Materials are opaque bags of named numeric fields (`Density`, `Hardness`,
//! `Flexibility`, ...). The engine only ever reads fields by name; catalogs
//! plug in through the [`MaterialLookup`] trait.

use crate::{config, TreasureResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A named material and its numeric properties.
///
/// # Examples
///
/// ```
/// use treasure::Material;
///
/// let steel = Material::new("Steel").with_field("Density", 7.8).with_field("Hardness", 6.0);
/// assert_eq!(steel.density(), Some(7.8));
/// assert_eq!(steel.stat("Flexibility"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, f64>,
}

impl Material {
    /// Creates a material with no category and no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            fields: BTreeMap::new(),
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets one numeric field.
    pub fn with_field(mut self, field: impl Into<String>, value: f64) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Reads a numeric field by name.
    pub fn stat(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }

    /// The `Density` field, used for weight.
    pub fn density(&self) -> Option<f64> {
        self.stat(config::DENSITY)
    }
}

/// Read-only access to a material catalog.
pub trait MaterialLookup {
    /// Returns the material with the given name, if the catalog knows it.
    fn material(&self, name: &str) -> Option<Material>;
}

/// An in-memory material catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCatalog {
    materials: BTreeMap<String, Material>,
}

impl MaterialCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a material.
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Adds a material, builder style.
    pub fn with(mut self, material: Material) -> Self {
        self.insert(material);
        self
    }

    /// Loads a catalog from a JSON array of materials.
    pub fn from_json_str(json: &str) -> TreasureResult<Self> {
        let materials: Vec<Material> = serde_json::from_str(json)?;
        Ok(materials.into_iter().collect())
    }

    /// Loads a catalog from a JSON file holding an array of materials.
    pub fn from_json_file(path: impl AsRef<Path>) -> TreasureResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Merges another catalog into this one; its entries win on name clashes.
    pub fn extend(&mut self, other: MaterialCatalog) {
        self.materials.extend(other.materials);
    }

    /// Looks up a material by name.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Names of all materials in a category.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.materials
            .values()
            .filter(move |m| m.category.as_deref() == Some(category))
            .map(|m| m.name.as_str())
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the catalog holds no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl FromIterator<Material> for MaterialCatalog {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for material in iter {
            catalog.insert(material);
        }
        catalog
    }
}

impl MaterialLookup for MaterialCatalog {
    fn material(&self, name: &str) -> Option<Material> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = MaterialCatalog::new()
            .with(Material::new("Oak").with_category("wood").with_field("Density", 0.7))
            .with(Material::new("Iron").with_category("metal").with_field("Density", 7.9));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.material("Oak").and_then(|m| m.density()), Some(0.7));
        assert!(catalog.material("Glass").is_none());
        assert_eq!(catalog.in_category("metal").collect::<Vec<_>>(), vec!["Iron"]);
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = MaterialCatalog::from_json_str(
            r#"[
                {"name": "Steel", "category": "metal", "fields": {"Density": 7.8, "Hardness": 6}},
                {"name": "Leather", "fields": {"Density": 0.9}}
            ]"#,
        )
        .unwrap();

        let steel = catalog.get("Steel").unwrap();
        assert_eq!(steel.stat("Hardness"), Some(6.0));
        assert_eq!(catalog.get("Leather").unwrap().category, None);
    }

    #[test]
    fn test_extend_overrides() {
        let mut catalog =
            MaterialCatalog::new().with(Material::new("Gold").with_field("Density", 19.3));
        catalog.extend(
            MaterialCatalog::new().with(Material::new("Gold").with_field("Density", 1.0)),
        );
        assert_eq!(catalog.get("Gold").and_then(Material::density), Some(1.0));
    }
}
