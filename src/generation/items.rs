//! # Item Generation
//!
//! Generators producing finished object trees: a named item type, or a random
//! weapon drawn from weighted categories.

use crate::catalog;
use crate::choice::{resolve_one, ChoiceSpec};
use crate::derived;
use crate::material::MaterialLookup;
use crate::object::{build, BuildContext, ObjectInstance};
use crate::spec::SpecRegistry;
use crate::{GenerationConfig, Generator, TreasureError, TreasureResult};
use log::info;
use rand::rngs::StdRng;

/// Builds objects of one named type.
pub struct ItemGenerator<'a> {
    registry: &'a SpecRegistry,
    materials: &'a dyn MaterialLookup,
    type_name: String,
}

impl<'a> ItemGenerator<'a> {
    /// Creates a generator for the named type.
    pub fn new(
        registry: &'a SpecRegistry,
        materials: &'a dyn MaterialLookup,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            materials,
            type_name: type_name.into(),
        }
    }

    /// The type this generator builds.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl Generator<ObjectInstance> for ItemGenerator<'_> {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> TreasureResult<ObjectInstance> {
        let mut ctx = BuildContext::from_config(self.registry, self.materials, config, rng);
        build(&self.type_name, &mut ctx)
    }

    fn validate(&self, content: &ObjectInstance, config: &GenerationConfig) -> TreasureResult<()> {
        validate_instance(content, config)
    }

    fn generator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}

/// Builds a random weapon: a category weighted by its size, then a weapon
/// within it.
pub struct WeaponGenerator<'a> {
    registry: &'a SpecRegistry,
    materials: &'a dyn MaterialLookup,
    categories: ChoiceSpec<String>,
}

impl<'a> WeaponGenerator<'a> {
    /// Uses the standard weapon categories.
    pub fn new(registry: &'a SpecRegistry, materials: &'a dyn MaterialLookup) -> Self {
        Self::with_categories(registry, materials, catalog::weapon_categories())
    }

    /// Uses a custom category tree; leaves must name declared weapon types.
    pub fn with_categories(
        registry: &'a SpecRegistry,
        materials: &'a dyn MaterialLookup,
        categories: ChoiceSpec<String>,
    ) -> Self {
        Self {
            registry,
            materials,
            categories,
        }
    }
}

impl Generator<ObjectInstance> for WeaponGenerator<'_> {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> TreasureResult<ObjectInstance> {
        let type_name = resolve_one(&self.categories, rng)?.into_leaf().ok_or_else(|| {
            TreasureError::GenerationFailed("weapon categories yielded no weapon".to_string())
        })?;
        info!("generating weapon of type '{}'", type_name);
        ItemGenerator::new(self.registry, self.materials, type_name).generate(config, rng)
    }

    fn validate(&self, content: &ObjectInstance, config: &GenerationConfig) -> TreasureResult<()> {
        if content.damager().is_none() {
            return Err(TreasureError::GenerationFailed(format!(
                "weapon '{}' has no damager component",
                content.type_name()
            )));
        }
        validate_instance(content, config)
    }

    fn generator_type(&self) -> &'static str {
        "WeaponGenerator"
    }
}

/// Checks the properties every finished tree must have.
fn validate_instance(content: &ObjectInstance, config: &GenerationConfig) -> TreasureResult<()> {
    let weight = content.weight();
    if !weight.is_finite() || weight < 0.0 {
        return Err(TreasureError::GenerationFailed(format!(
            "'{}' has invalid weight {}",
            content.type_name(),
            weight
        )));
    }
    if content.damage_rating().0.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(TreasureError::GenerationFailed(format!(
            "'{}' has a negative damage rating",
            content.type_name()
        )));
    }
    if let Some(speed) = derived::speed(content, config.default_base_speed) {
        if !speed.is_finite() {
            return Err(TreasureError::GenerationFailed(format!(
                "'{}' has invalid speed",
                content.type_name()
            )));
        }
    }
    for kind in &config.damage_kinds {
        if !content.damage_state().contains_key(kind) {
            return Err(TreasureError::GenerationFailed(format!(
                "'{}' does not track damage kind '{}'",
                content.type_name(),
                kind
            )));
        }
    }
    Ok(())
}
