//! # Generation Module
//!
//! Configuration and entry points for procedural treasure generation.
//!
//! This module ties the builder to a seeded random source. A
//! [`GenerationConfig`] fixes the seed, an optional material override and the
//! condition kinds tracked on every object; [`Generator`] implementations turn
//! it into finished object trees.

pub mod items;

pub use items::*;

use crate::{config, TreasureResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Material forced onto every part that declares materials
    pub override_material: Option<String>,
    /// Damage kinds tracked on every object, all starting at zero
    pub damage_kinds: Vec<String>,
    /// Aesthetic kinds tracked on every object, all starting at zero
    pub aesthetic_kinds: Vec<String>,
    /// Base speed for weapons whose damager declares none
    pub default_base_speed: f64,
}

impl GenerationConfig {
    /// Creates a default generation configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.override_material.is_none());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            override_material: None,
            damage_kinds: config::DAMAGE_KINDS.iter().map(|k| k.to_string()).collect(),
            aesthetic_kinds: config::AESTHETIC_KINDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            default_base_speed: config::DEFAULT_BASE_SPEED,
        }
    }

    /// Creates a configuration for testing: fixed seed, no condition kinds
    /// beyond physical damage.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            damage_kinds: vec![config::PHYSICAL_DAMAGE.to_string()],
            aesthetic_kinds: Vec::new(),
            ..Self::new(seed)
        }
    }

    /// Forces every part that declares materials to use `material`.
    pub fn with_override_material(mut self, material: impl Into<String>) -> Self {
        self.override_material = Some(material.into());
        self
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json_str(json: &str) -> TreasureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> TreasureResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TreasureResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> TreasureResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
