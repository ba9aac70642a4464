//! # Object Module
//!
//! Built object trees. An [`ObjectInstance`] owns its components outright, so
//! every tree is acyclic and unshared. Instances are produced by
//! [`builder::build`] and are not mutated afterwards; [`builder::reroll`]
//! returns a fresh instance instead.

pub mod builder;

pub use builder::*;

use crate::choice::Pick;
use crate::config;
use crate::derived::{self, DamageRating};
use crate::material::Material;
use crate::spec::Spec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A resolved attribute: one value for rules drawing exactly one, a list
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Single(Pick<String>),
    Many(Vec<Pick<String>>),
}

impl AttributeValue {
    /// Number of picks held.
    pub fn len(&self) -> usize {
        match self {
            AttributeValue::Single(_) => 1,
            AttributeValue::Many(picks) => picks.len(),
        }
    }

    /// True for an attribute that drew nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every concrete value held, flattening any unresolved groups.
    pub fn values(&self) -> Vec<&str> {
        let picks: Vec<&Pick<String>> = match self {
            AttributeValue::Single(pick) => vec![pick],
            AttributeValue::Many(picks) => picks.iter().collect(),
        };
        picks
            .into_iter()
            .flat_map(Pick::leaves)
            .map(String::as_str)
            .collect()
    }

    /// The value of a single-valued attribute.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            AttributeValue::Single(pick) => pick.leaf().map(String::as_str),
            AttributeValue::Many(_) => None,
        }
    }
}

/// The damage and aesthetic kinds tracked on every built object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionKinds {
    pub damage: Vec<String>,
    pub aesthetic: Vec<String>,
}

impl Default for ConditionKinds {
    fn default() -> Self {
        Self {
            damage: config::DAMAGE_KINDS.iter().map(|k| k.to_string()).collect(),
            aesthetic: config::AESTHETIC_KINDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl ConditionKinds {
    pub(crate) fn zeroed_damage(&self) -> BTreeMap<String, f64> {
        self.damage.iter().map(|k| (k.clone(), 0.0)).collect()
    }

    pub(crate) fn zeroed_aesthetic(&self) -> BTreeMap<String, f64> {
        self.aesthetic.iter().map(|k| (k.clone(), 0.0)).collect()
    }
}

/// A fully built object and its exclusively owned component subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
    pub(crate) spec: Arc<Spec>,
    pub(crate) attributes: BTreeMap<String, AttributeValue>,
    pub(crate) traits: BTreeMap<String, String>,
    pub(crate) components: BTreeMap<String, ObjectInstance>,
    pub(crate) additions: Vec<ObjectInstance>,
    pub(crate) material: Option<Material>,
    pub(crate) hp: u32,
    pub(crate) damage_state: BTreeMap<String, f64>,
    pub(crate) aesthetic_state: BTreeMap<String, f64>,
}

impl ObjectInstance {
    /// The spec this object was built from.
    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Type name this object was built as.
    pub fn type_name(&self) -> &str {
        &self.spec.name
    }

    /// Display label of the type.
    pub fn label(&self) -> &str {
        &self.spec.label
    }

    /// Broad category of the type.
    pub fn base_type(&self) -> &str {
        &self.spec.base_type
    }

    /// Size of this node.
    pub fn size(&self) -> f64 {
        self.spec.size
    }

    /// All rolled attributes by name.
    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// One rolled attribute.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// All rolled traits by name.
    pub fn traits(&self) -> &BTreeMap<String, String> {
        &self.traits
    }

    /// One rolled trait.
    pub fn trait_value(&self, name: &str) -> Option<&str> {
        self.traits.get(name).map(String::as_str)
    }

    /// Built components by slot name.
    pub fn components(&self) -> &BTreeMap<String, ObjectInstance> {
        &self.components
    }

    /// The component in one slot.
    pub fn component(&self, name: &str) -> Option<&ObjectInstance> {
        self.components.get(name)
    }

    /// Decorations added on top of the object's structure.
    pub fn additions(&self) -> &[ObjectInstance] {
        &self.additions
    }

    /// This node's own material, if its type declares any.
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// The damager component, if this type designates one and it was built.
    pub fn damager(&self) -> Option<&ObjectInstance> {
        self.spec
            .damager
            .as_deref()
            .and_then(|name| self.components.get(name))
    }

    /// The material an object is known by: the damager's material for
    /// composites that have one, the node's own material otherwise.
    pub fn nominal_material(&self) -> Option<&Material> {
        match self.damager() {
            Some(damager) => damager.material(),
            None => self.material(),
        }
    }

    /// Current hit points.
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Accumulated damage by kind.
    pub fn damage_state(&self) -> &BTreeMap<String, f64> {
        &self.damage_state
    }

    /// Accumulated aesthetic wear by kind.
    pub fn aesthetic_state(&self) -> &BTreeMap<String, f64> {
        &self.aesthetic_state
    }

    /// Accumulated damage of one kind; unknown kinds read as zero.
    pub fn damage_of(&self, kind: &str) -> f64 {
        self.damage_state.get(kind).copied().unwrap_or(0.0)
    }

    /// Total weight of this tree.
    pub fn weight(&self) -> f64 {
        derived::weight(self)
    }

    /// Damage rating of this tree.
    pub fn damage_rating(&self) -> DamageRating {
        derived::damage_rating(self)
    }

    /// Handle plus damager size.
    pub fn reach(&self) -> f64 {
        derived::reach(self)
    }

    /// Speed with the default fallback base speed.
    pub fn speed(&self) -> Option<f64> {
        derived::speed(self, config::DEFAULT_BASE_SPEED)
    }
}
