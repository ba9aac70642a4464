//! # Object Builder
//!
//! Turns a [`Spec`] into an [`ObjectInstance`] tree. Construction is one
//! synchronous, depth-first pass: component slots first, then additions, then
//! the node's own material, attributes and traits. A failure anywhere abandons
//! the whole build.

use super::{AttributeValue, ConditionKinds, ObjectInstance};
use crate::choice::{resolve, resolve_one, Pick};
use crate::config;
use crate::generation::GenerationConfig;
use crate::material::{Material, MaterialLookup};
use crate::spec::{AttributeRule, ComponentRule, Spec, SpecRegistry};
use crate::{ChoiceSpec, TreasureError, TreasureResult};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a build needs besides the type name: the specs, the material
/// catalog, an optional material override and the random source.
pub struct BuildContext<'a> {
    registry: &'a SpecRegistry,
    materials: &'a dyn MaterialLookup,
    override_material: Option<String>,
    kinds: ConditionKinds,
    rng: &'a mut StdRng,
}

impl<'a> BuildContext<'a> {
    /// Creates a context with no override and the default condition kinds.
    pub fn new(
        registry: &'a SpecRegistry,
        materials: &'a dyn MaterialLookup,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            registry,
            materials,
            override_material: None,
            kinds: ConditionKinds::default(),
            rng,
        }
    }

    /// Creates a context carrying the override and condition kinds of a
    /// generation config.
    pub fn from_config(
        registry: &'a SpecRegistry,
        materials: &'a dyn MaterialLookup,
        config: &GenerationConfig,
        rng: &'a mut StdRng,
    ) -> Self {
        let mut ctx = Self::new(registry, materials, rng).with_condition_kinds(ConditionKinds {
            damage: config.damage_kinds.clone(),
            aesthetic: config.aesthetic_kinds.clone(),
        });
        ctx.override_material = config.override_material.clone();
        ctx
    }

    /// Forces every node that declares materials to use this one.
    pub fn with_override_material(mut self, name: impl Into<String>) -> Self {
        self.override_material = Some(name.into());
        self
    }

    /// Replaces the tracked damage and aesthetic kinds.
    pub fn with_condition_kinds(mut self, kinds: ConditionKinds) -> Self {
        self.kinds = kinds;
        self
    }

    /// The forced material, if any.
    pub fn override_material(&self) -> Option<&str> {
        self.override_material.as_deref()
    }

    /// The specs this context builds from.
    pub fn registry(&self) -> &SpecRegistry {
        self.registry
    }

    /// The random source threaded through this build.
    pub fn rng(&mut self) -> &mut StdRng {
        self.rng
    }
}

/// Builds an object of the named type.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use treasure::{build, BuildContext, Material, MaterialCatalog, SpecDecl, SpecRegistry};
/// use treasure::ChoiceSpec;
///
/// let registry = SpecRegistry::builder()
///     .declare(SpecDecl::new("Ring").size(1.0).materials(ChoiceSpec::values(["Gold"])))
///     .build()
///     .unwrap();
/// let materials = MaterialCatalog::new().with(Material::new("Gold").with_field("Density", 19.3));
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let mut ctx = BuildContext::new(&registry, &materials, &mut rng);
/// let ring = build("Ring", &mut ctx).unwrap();
/// assert_eq!(ring.material().map(|m| m.name.as_str()), Some("Gold"));
/// ```
pub fn build(type_name: &str, ctx: &mut BuildContext<'_>) -> TreasureResult<ObjectInstance> {
    let spec = ctx.registry.get(type_name)?;
    build_spec(spec, ctx)
}

fn build_spec(spec: Arc<Spec>, ctx: &mut BuildContext<'_>) -> TreasureResult<ObjectInstance> {
    let mut components = BTreeMap::new();
    for (slot, rule) in &spec.components {
        let chosen = match rule {
            ComponentRule::Fixed(type_name) => Some(type_name.clone()),
            ComponentRule::Choice(choices) => choose_type(choices, ctx.rng)?,
        };
        match chosen {
            Some(type_name) => {
                let component = build(&type_name, ctx)?;
                components.insert(slot.clone(), component);
            }
            None => trace!("'{}' left slot '{}' empty", spec.name, slot),
        }
    }

    let mut additions = Vec::new();
    for choices in &spec.additions {
        if let Some(type_name) = choose_type(choices, ctx.rng)? {
            additions.push(build(&type_name, ctx)?);
        }
    }

    let material = resolve_material(&spec, ctx)?;

    let mut attributes = BTreeMap::new();
    for (name, rule) in &spec.attributes {
        attributes.insert(name.clone(), roll_attribute(rule, ctx.rng)?);
    }

    let mut traits = BTreeMap::new();
    for (name, choices) in &spec.traits {
        traits.insert(name.clone(), roll_trait(name, choices, ctx.rng)?);
    }

    debug!(
        "built '{}' ({} components, {} additions, material {:?})",
        spec.name,
        components.len(),
        additions.len(),
        material.as_ref().map(|m| m.name.as_str())
    );

    Ok(ObjectInstance {
        spec,
        attributes,
        traits,
        components,
        additions,
        material,
        hp: config::DEFAULT_HP,
        damage_state: ctx.kinds.zeroed_damage(),
        aesthetic_state: ctx.kinds.zeroed_aesthetic(),
    })
}

/// Picks a type for a component slot or addition; `None` means nothing.
fn choose_type(
    choices: &ChoiceSpec<Option<String>>,
    rng: &mut StdRng,
) -> TreasureResult<Option<String>> {
    Ok(resolve_one(choices, rng)?.into_leaf().flatten())
}

fn resolve_material(spec: &Spec, ctx: &mut BuildContext<'_>) -> TreasureResult<Option<Material>> {
    let Some(choices) = &spec.materials else {
        return Ok(None);
    };

    let name = match &ctx.override_material {
        Some(name) => name.clone(),
        None => match resolve_one(choices, ctx.rng)?.into_leaf() {
            Some(name) => name,
            None => return Ok(None),
        },
    };

    ctx.materials
        .material(&name)
        .map(Some)
        .ok_or(TreasureError::MissingMaterial(name))
}

/// Draws a count uniformly in `[min, max]`, then that many distinct values.
fn roll_attribute(rule: &AttributeRule, rng: &mut StdRng) -> TreasureResult<AttributeValue> {
    let count = rng.gen_range(rule.min..=rule.max);
    if count == 0 {
        return Ok(AttributeValue::Many(Vec::new()));
    }

    let picks = resolve(&rule.choices, count, rng)?;
    if rule.is_single_valued() {
        let pick = picks
            .into_iter()
            .next()
            .ok_or(TreasureError::InsufficientChoices {
                requested: 1,
                available: 0,
            })?;
        Ok(AttributeValue::Single(pick))
    } else {
        Ok(AttributeValue::Many(picks))
    }
}

fn roll_trait(
    name: &str,
    choices: &ChoiceSpec<String>,
    rng: &mut StdRng,
) -> TreasureResult<String> {
    match resolve_one(choices, rng)? {
        Pick::Leaf(value) => Ok(value),
        Pick::Group(_) => Err(TreasureError::InvalidSpec(format!(
            "trait '{}' resolved to no value",
            name
        ))),
    }
}

/// Returns a copy of `instance` with its attributes and traits drawn again.
///
/// With `feature` set, only the attribute or trait of that name is redrawn.
/// With `recursive`, components are rerolled the same way. Components,
/// additions and materials are kept.
pub fn reroll(
    instance: &ObjectInstance,
    feature: Option<&str>,
    recursive: bool,
    rng: &mut StdRng,
) -> TreasureResult<ObjectInstance> {
    let mut rerolled = instance.clone();
    let selected = |name: &str| feature.map_or(true, |f| f == name);

    for (name, rule) in &instance.spec.attributes {
        if selected(name.as_str()) {
            rerolled
                .attributes
                .insert(name.clone(), roll_attribute(rule, rng)?);
        }
    }
    for (name, choices) in &instance.spec.traits {
        if selected(name.as_str()) {
            rerolled
                .traits
                .insert(name.clone(), roll_trait(name, choices, rng)?);
        }
    }

    if recursive {
        for (slot, component) in &instance.components {
            rerolled
                .components
                .insert(slot.clone(), reroll(component, feature, true, rng)?);
        }
    }
    Ok(rerolled)
}
