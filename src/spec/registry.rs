//! # Spec Registry
//!
//! Merges [`SpecDecl`] inheritance chains into flat [`Spec`]s and validates
//! them once, at load time. A registry that builds successfully references
//! only declared types and contains no composition cycles, so object
//! construction over it always terminates.

use super::{Spec, SpecDecl};
use crate::{TreasureError, TreasureResult};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Collects declarations before they are merged into a [`SpecRegistry`].
#[derive(Debug, Clone, Default)]
pub struct SpecRegistryBuilder {
    decls: BTreeMap<String, SpecDecl>,
}

impl SpecRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration. A later declaration with the same name replaces
    /// the earlier one.
    pub fn declare(mut self, decl: SpecDecl) -> Self {
        if self.decls.contains_key(&decl.name) {
            warn!("spec '{}' declared twice; keeping the later one", decl.name);
        }
        self.decls.insert(decl.name.clone(), decl);
        self
    }

    /// Adds every declaration from an iterator.
    pub fn declare_all<I: IntoIterator<Item = SpecDecl>>(self, decls: I) -> Self {
        decls.into_iter().fold(self, Self::declare)
    }

    /// Adds declarations from a JSON array of [`SpecDecl`] objects.
    pub fn declare_json(self, json: &str) -> TreasureResult<Self> {
        let decls: Vec<SpecDecl> = serde_json::from_str(json)?;
        Ok(self.declare_all(decls))
    }

    /// Merges every inheritance chain and validates the result.
    pub fn build(self) -> TreasureResult<SpecRegistry> {
        let mut specs = BTreeMap::new();
        for name in self.decls.keys() {
            let spec = self.flatten(name)?;
            validate_spec(&spec)?;
            specs.insert(name.clone(), Arc::new(spec));
        }

        let registry = SpecRegistry { specs };
        registry.check_references()?;
        registry.check_composition_cycles()?;

        info!("loaded {} object specs", registry.len());
        Ok(registry)
    }

    fn flatten(&self, name: &str) -> TreasureResult<Spec> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(name);

        while let Some(type_name) = current {
            if !seen.insert(type_name) {
                return Err(TreasureError::InvalidSpec(format!(
                    "inheritance cycle through '{}'",
                    type_name
                )));
            }
            let decl = self
                .decls
                .get(type_name)
                .ok_or_else(|| TreasureError::UnknownType(type_name.to_string()))?;
            chain.push(decl);
            current = decl.extends.as_deref();
        }

        let mut spec = Spec::new(name);
        for decl in chain.iter().rev() {
            spec.apply(decl);
        }
        debug!("flattened spec '{}' over {} declarations", name, chain.len());
        Ok(spec)
    }
}

fn validate_spec(spec: &Spec) -> TreasureResult<()> {
    let invalid = |msg: String| TreasureError::InvalidSpec(format!("{}: {}", spec.name, msg));

    if !spec.size.is_finite() || spec.size < 0.0 {
        return Err(invalid(format!("size {} must be non-negative", spec.size)));
    }
    if let Some(materials) = &spec.materials {
        materials.validate()?;
    }
    for (name, rule) in &spec.attributes {
        if rule.min > rule.max {
            return Err(invalid(format!(
                "attribute '{}' has min {} above max {}",
                name, rule.min, rule.max
            )));
        }
        rule.choices.validate()?;
    }
    for (name, choices) in &spec.traits {
        if choices.is_empty() {
            return Err(invalid(format!("trait '{}' has no choices", name)));
        }
        choices.validate()?;
    }
    for rule in spec.components.values() {
        if let super::ComponentRule::Choice(choices) = rule {
            choices.validate()?;
        }
    }
    for addition in &spec.additions {
        addition.validate()?;
    }
    if let Some(damager) = &spec.damager {
        if !spec.components.contains_key(damager) {
            return Err(invalid(format!(
                "damager '{}' is not one of its components",
                damager
            )));
        }
    }
    if let Some(damage) = &spec.damage {
        if !damage.effectiveness.is_finite() || damage.effectiveness <= 0.0 {
            return Err(invalid(format!(
                "effectiveness {} must be positive",
                damage.effectiveness
            )));
        }
    }
    Ok(())
}

/// The merged, validated set of object specs, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    specs: BTreeMap<String, Arc<Spec>>,
}

impl SpecRegistry {
    /// Starts collecting declarations.
    pub fn builder() -> SpecRegistryBuilder {
        SpecRegistryBuilder::new()
    }

    /// Builds a registry from a JSON array of declarations.
    pub fn from_json_str(json: &str) -> TreasureResult<Self> {
        SpecRegistryBuilder::new().declare_json(json)?.build()
    }

    /// Builds a registry from a JSON file holding an array of declarations.
    pub fn from_json_file(path: impl AsRef<Path>) -> TreasureResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Looks up a spec by type name.
    pub fn get(&self, name: &str) -> TreasureResult<Arc<Spec>> {
        self.specs
            .get(name)
            .cloned()
            .ok_or_else(|| TreasureError::UnknownType(name.to_string()))
    }

    /// Returns true if the type is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// All declared type names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if no types are declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    fn check_references(&self) -> TreasureResult<()> {
        for spec in self.specs.values() {
            if let Some(missing) = spec
                .referenced_types()
                .into_iter()
                .find(|name| !self.specs.contains_key(*name))
            {
                return Err(TreasureError::UnknownType(format!(
                    "{} (referenced by {})",
                    missing, spec.name
                )));
            }
        }
        Ok(())
    }

    fn check_composition_cycles(&self) -> TreasureResult<()> {
        let mut done = HashSet::new();
        for name in self.specs.keys() {
            let mut path = Vec::new();
            self.visit(name, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> TreasureResult<()> {
        if done.contains(name) {
            return Ok(());
        }
        if path.contains(&name) {
            path.push(name);
            return Err(TreasureError::InvalidSpec(format!(
                "composition cycle: {}",
                path.join(" -> ")
            )));
        }
        let Some(spec) = self.specs.get(name) else {
            return Ok(());
        };

        path.push(name);
        for child in spec.referenced_types() {
            self.visit(child, path, done)?;
        }
        path.pop();
        done.insert(name);
        Ok(())
    }
}
