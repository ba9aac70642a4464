//! # Treasure
//!
//! Procedural assembly of composite treasure objects (weapons and other
//! equippable items) from declarative spec trees.
//!
//! ## Architecture Overview
//!
//! Construction flows through four layers:
//!
//! - **Choice Resolver**: weighted, distinct, recursively-flattening sampling
//!   from nested [`ChoiceSpec`] values
//! - **Spec Tree**: static per-type declarations ([`Spec`]) with data-driven
//!   inheritance, merged and validated once by the [`SpecRegistry`]
//! - **Object Builder**: turns a spec into an [`ObjectInstance`] tree, building
//!   components depth-first before resolving the node's own material,
//!   attributes and traits
//! - **Derived Values**: bottom-up folds computing weight, damage rating,
//!   reach and speed over a finished tree
//!
//! All randomness flows through an explicit [`rand::rngs::StdRng`] handle, so
//! a fixed seed always reproduces the same object graph.
//!
//! ```
//! use treasure::{catalog, BuildContext, GenerationConfig};
//! use treasure::generation::utils::create_rng;
//!
//! let registry = catalog::standard_registry().unwrap();
//! let materials = catalog::standard_materials();
//! let config = GenerationConfig::new(7);
//! let mut rng = create_rng(&config);
//!
//! let mut ctx = BuildContext::new(&registry, &materials, &mut rng);
//! let sword = treasure::build("Sword", &mut ctx).unwrap();
//! assert!(sword.components().contains_key("Blade"));
//! assert!(sword.weight() > 0.0);
//! ```

pub mod catalog;
pub mod choice;
pub mod derived;
pub mod generation;
pub mod material;
pub mod object;
pub mod spec;

pub use choice::*;
pub use derived::{DamageRating, round_to};
pub use generation::*;
pub use material::*;
pub use object::*;
pub use spec::*;

/// Core error type for the treasure engine.
#[derive(thiserror::Error, Debug)]
pub enum TreasureError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A spec or choice specification is malformed
    #[error("Invalid spec: {0}")]
    InvalidSpec(String),

    /// More distinct picks were requested than the choice set can supply
    #[error("Insufficient choices: requested {requested}, only {available} available")]
    InsufficientChoices { requested: usize, available: usize },

    /// A resolved material name is not present in the material catalog
    #[error("Missing material: {0}")]
    MissingMaterial(String),

    /// A referenced object type was never declared
    #[error("Unknown object type: {0}")]
    UnknownType(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the treasure codebase.
pub type TreasureResult<T> = Result<T, TreasureError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine-wide defaults.
pub mod config {
    /// Size of an object type that declares none
    pub const DEFAULT_SIZE: f64 = 3.0;

    /// Base speed used when the damager component declares none
    pub const DEFAULT_BASE_SPEED: f64 = 10.0;

    /// Effectiveness multiplier of a damage profile that declares none
    pub const DEFAULT_EFFECTIVENESS: f64 = 4.0;

    /// Starting hit points of every built object
    pub const DEFAULT_HP: u32 = 100;

    /// Component whose size counts towards reach alongside the damager
    pub const HANDLE_COMPONENT: &str = "Handle";

    /// Damage kind whose accumulated value decays damage output
    pub const PHYSICAL_DAMAGE: &str = "phys";

    /// Damage kinds tracked on every object
    pub const DAMAGE_KINDS: [&str; 2] = ["phys", "burn"];

    /// Aesthetic kinds tracked on every object
    pub const AESTHETIC_KINDS: [&str; 2] = ["cold", "blood"];

    /// Material field read for weight
    pub const DENSITY: &str = "Density";
}
