//! # Spec Module
//!
//! Static, per-type declarations that drive object construction.
//!
//! A [`SpecDecl`] is what gets written down, in Rust or JSON: a type name, an
//! optional parent to inherit from, and only the fields that differ from that
//! parent. The [`SpecRegistry`] merges each declaration chain into one flat
//! [`Spec`] per type and validates it before anything is built.

pub mod registry;

pub use registry::*;

use crate::choice::ChoiceSpec;
use crate::config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Draws between `min` and `max` (inclusive) distinct values from `choices`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeRule {
    pub min: usize,
    pub max: usize,
    pub choices: ChoiceSpec<String>,
}

impl AttributeRule {
    /// Creates a new attribute rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure::{AttributeRule, ChoiceSpec};
    ///
    /// let rule = AttributeRule::new(2, 2, ChoiceSpec::values(["gold", "silver", "bronze"]));
    /// assert!(!rule.is_single_valued());
    /// ```
    pub fn new(min: usize, max: usize, choices: ChoiceSpec<String>) -> Self {
        Self { min, max, choices }
    }

    /// Rules drawing exactly one value store a scalar instead of a list.
    pub fn is_single_valued(&self) -> bool {
        self.min == 1 && self.max == 1
    }
}

/// How a component slot picks its type.
///
/// A `Choice` resolving to `None` (or an empty list) leaves the slot empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComponentRule {
    Fixed(String),
    Choice(ChoiceSpec<Option<String>>),
}

impl ComponentRule {
    /// A slot that always holds the given type.
    pub fn fixed(type_name: impl Into<String>) -> Self {
        ComponentRule::Fixed(type_name.into())
    }

    /// A slot choosing uniformly among types; `None` entries mean "no component".
    pub fn one_of<I>(options: I) -> Self
    where
        I: IntoIterator<Item = Option<&'static str>>,
    {
        ComponentRule::Choice(ChoiceSpec::list(
            options
                .into_iter()
                .map(|o| ChoiceSpec::Terminal(o.map(str::to_string)))
                .collect(),
        ))
    }

    /// Every type name this slot can produce.
    pub fn type_names(&self) -> Vec<&str> {
        match self {
            ComponentRule::Fixed(name) => vec![name.as_str()],
            ComponentRule::Choice(spec) => spec
                .leaves()
                .into_iter()
                .filter_map(|leaf| leaf.as_deref())
                .collect(),
        }
    }
}

/// The three fixed damage axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DamageAxis {
    Crush,
    Pierce,
    Slice,
}

impl DamageAxis {
    /// All axes in rating order.
    pub const ALL: [DamageAxis; 3] = [DamageAxis::Crush, DamageAxis::Pierce, DamageAxis::Slice];

    /// Position of this axis within a damage rating.
    pub fn index(self) -> usize {
        match self {
            DamageAxis::Crush => 0,
            DamageAxis::Pierce => 1,
            DamageAxis::Slice => 2,
        }
    }
}

/// Per-axis coefficients applied to named material stats.
pub type DamageTable = BTreeMap<DamageAxis, BTreeMap<String, f64>>;

/// Damage characteristics of a damaging part.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageProfile {
    /// Absent for parts that deal no damage of their own
    pub type_damage: Option<DamageTable>,
    pub base_speed: Option<f64>,
    /// How much better the good axes are than the bad ones
    pub effectiveness: f64,
    pub good: Vec<DamageAxis>,
    pub bad: Vec<DamageAxis>,
}

impl Default for DamageProfile {
    fn default() -> Self {
        Self {
            type_damage: None,
            base_speed: None,
            effectiveness: config::DEFAULT_EFFECTIVENESS,
            good: Vec::new(),
            bad: Vec::new(),
        }
    }
}

impl DamageProfile {
    fn apply(&mut self, decl: &DamageDecl) {
        if let Some(table) = &decl.type_damage {
            self.type_damage = Some(table.clone());
        }
        if let Some(base_speed) = decl.base_speed {
            self.base_speed = Some(base_speed);
        }
        if let Some(effectiveness) = decl.effectiveness {
            self.effectiveness = effectiveness;
        }
        if let Some(good) = &decl.good {
            self.good = good.clone();
        }
        if let Some(bad) = &decl.bad {
            self.bad = bad.clone();
        }
    }
}

/// Field-by-field overrides of a [`DamageProfile`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DamageDecl {
    pub type_damage: Option<DamageTable>,
    pub base_speed: Option<f64>,
    pub effectiveness: Option<f64>,
    pub good: Option<Vec<DamageAxis>>,
    pub bad: Option<Vec<DamageAxis>>,
}

impl DamageDecl {
    /// Sets the coefficients of one axis, keyed by material stat.
    pub fn table<I, S>(mut self, axis: DamageAxis, coefficients: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.type_damage.get_or_insert_with(BTreeMap::new).insert(
            axis,
            coefficients
                .into_iter()
                .map(|(stat, coeff)| (stat.into(), coeff))
                .collect(),
        );
        self
    }

    /// Sets the base speed used for the weapon's speed.
    pub fn base_speed(mut self, base_speed: f64) -> Self {
        self.base_speed = Some(base_speed);
        self
    }

    /// Sets the good/bad axis multiplier.
    pub fn effectiveness(mut self, effectiveness: f64) -> Self {
        self.effectiveness = Some(effectiveness);
        self
    }

    /// Sets the axes multiplied by the effectiveness.
    pub fn good(mut self, axes: &[DamageAxis]) -> Self {
        self.good = Some(axes.to_vec());
        self
    }

    /// Sets the axes divided by the effectiveness.
    pub fn bad(mut self, axes: &[DamageAxis]) -> Self {
        self.bad = Some(axes.to_vec());
        self
    }
}

/// The flat, fully-inherited declaration of one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Spec {
    /// Registry key
    pub name: String,
    /// Display label, e.g. "Curved Greatsword"
    pub label: String,
    /// Broad category such as "item" or "weapon"
    pub base_type: String,
    pub size: f64,
    pub materials: Option<ChoiceSpec<String>>,
    pub attributes: BTreeMap<String, AttributeRule>,
    pub traits: BTreeMap<String, ChoiceSpec<String>>,
    pub components: BTreeMap<String, ComponentRule>,
    pub additions: Vec<ChoiceSpec<Option<String>>>,
    pub damage: Option<DamageProfile>,
    /// Component whose material and size drive damage, reach and speed
    pub damager: Option<String>,
}

impl Spec {
    /// An empty spec for the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            base_type: "item".to_string(),
            size: config::DEFAULT_SIZE,
            materials: None,
            attributes: BTreeMap::new(),
            traits: BTreeMap::new(),
            components: BTreeMap::new(),
            additions: Vec::new(),
            damage: None,
            damager: None,
        }
    }

    /// Layers a declaration over this spec. Declared fields replace inherited
    /// ones wholesale; the damage profile merges field by field.
    pub(crate) fn apply(&mut self, decl: &SpecDecl) {
        if let Some(label) = &decl.label {
            self.label = label.clone();
        }
        if let Some(base_type) = &decl.base_type {
            self.base_type = base_type.clone();
        }
        if let Some(size) = decl.size {
            self.size = size;
        }
        if let Some(materials) = &decl.materials {
            self.materials = Some(materials.clone());
        }
        if let Some(attributes) = &decl.attributes {
            self.attributes = attributes.clone();
        }
        if let Some(traits) = &decl.traits {
            self.traits = traits.clone();
        }
        if let Some(components) = &decl.components {
            self.components = components.clone();
        }
        if let Some(additions) = &decl.additions {
            self.additions = additions.clone();
        }
        if let Some(damage) = &decl.damage {
            self.damage.get_or_insert_with(DamageProfile::default).apply(damage);
        }
        if let Some(damager) = &decl.damager {
            self.damager = Some(damager.clone());
        }
    }

    /// Every type this spec may instantiate as a component or addition.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .components
            .values()
            .flat_map(ComponentRule::type_names)
            .collect();
        for addition in &self.additions {
            names.extend(addition.leaves().into_iter().filter_map(|l| l.as_deref()));
        }
        names
    }
}

/// One declaration in a spec inheritance chain.
///
/// Every field except `name` is optional; unset fields are inherited from the
/// `extends` parent, or take engine defaults at the root.
///
/// # Examples
///
/// ```
/// use treasure::{ComponentRule, SpecDecl};
///
/// let decl = SpecDecl::new("Greatsword")
///     .extends("Sword")
///     .label("Greatsword")
///     .component("Blade", ComponentRule::fixed("BladeBig"));
/// assert_eq!(decl.extends.as_deref(), Some("Sword"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpecDecl {
    pub name: String,
    pub extends: Option<String>,
    pub label: Option<String>,
    pub base_type: Option<String>,
    pub size: Option<f64>,
    pub materials: Option<ChoiceSpec<String>>,
    pub attributes: Option<BTreeMap<String, AttributeRule>>,
    pub traits: Option<BTreeMap<String, ChoiceSpec<String>>>,
    pub components: Option<BTreeMap<String, ComponentRule>>,
    pub additions: Option<Vec<ChoiceSpec<Option<String>>>>,
    pub damage: Option<DamageDecl>,
    pub damager: Option<String>,
}

impl SpecDecl {
    /// Creates a declaration that overrides nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Inherits every undeclared field from `parent`.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the broad category, e.g. "weapon".
    pub fn base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Sets the size used for weight, damage and reach.
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the materials one is drawn from.
    pub fn materials(mut self, materials: ChoiceSpec<String>) -> Self {
        self.materials = Some(materials);
        self
    }

    /// Adds an attribute rule; the first call replaces any inherited map.
    pub fn attribute(mut self, name: impl Into<String>, rule: AttributeRule) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), rule);
        self
    }

    /// Adds a trait rule; the first call replaces any inherited map.
    pub fn trait_rule(mut self, name: impl Into<String>, choices: ChoiceSpec<String>) -> Self {
        self.traits
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), choices);
        self
    }

    /// Adds a component slot; the first call replaces any inherited map.
    pub fn component(mut self, name: impl Into<String>, rule: ComponentRule) -> Self {
        self.components
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), rule);
        self
    }

    /// Adds an addition choice; the first call replaces any inherited list.
    pub fn addition(mut self, choices: ChoiceSpec<Option<String>>) -> Self {
        self.additions.get_or_insert_with(Vec::new).push(choices);
        self
    }

    /// Overrides damage profile fields.
    pub fn damage(mut self, damage: DamageDecl) -> Self {
        self.damage = Some(damage);
        self
    }

    /// Names the component that deals damage.
    pub fn damager(mut self, component: impl Into<String>) -> Self {
        self.damager = Some(component.into());
        self
    }
}
