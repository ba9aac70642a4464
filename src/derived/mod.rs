//! # Derived Values
//!
//! Bottom-up folds over a built object tree. Every function here is a pure
//! function of the tree. Missing optional data (no material, no damage
//! table, no damager, no handle) contributes zero instead of failing.

use crate::config;
use crate::object::ObjectInstance;
use crate::spec::DamageAxis;
use std::ops::{Add, AddAssign, Index};

/// Damage output along the Crush, Pierce and Slice axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageRating(pub [f64; 3]);

impl DamageRating {
    pub const ZERO: DamageRating = DamageRating([0.0; 3]);

    /// Value along one axis.
    pub fn get(&self, axis: DamageAxis) -> f64 {
        self.0[axis.index()]
    }

    /// Sum across all axes.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Copy rounded to `places` decimals, for display.
    pub fn rounded(&self, places: u32) -> DamageRating {
        DamageRating(self.0.map(|v| round_to(v, places)))
    }
}

impl Index<DamageAxis> for DamageRating {
    type Output = f64;

    fn index(&self, axis: DamageAxis) -> &f64 {
        &self.0[axis.index()]
    }
}

impl Add for DamageRating {
    type Output = DamageRating;

    fn add(mut self, rhs: DamageRating) -> DamageRating {
        self += rhs;
        self
    }
}

impl AddAssign for DamageRating {
    fn add_assign(&mut self, rhs: DamageRating) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl std::iter::Sum for DamageRating {
    fn sum<I: Iterator<Item = DamageRating>>(iter: I) -> Self {
        iter.fold(DamageRating::ZERO, Add::add)
    }
}

/// Rounds a value to the given number of decimal places.
///
/// # Examples
///
/// ```
/// use treasure::round_to;
///
/// assert_eq!(round_to(3.14159, 2), 3.14);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// `size * density` of the node's material, plus the weight of every
/// component. A node without a material (or without a density) adds nothing
/// of its own.
pub fn weight(node: &ObjectInstance) -> f64 {
    let own = node
        .material()
        .and_then(|m| m.density())
        .map_or(0.0, |density| node.size() * density);
    own + node.components().values().map(weight).sum::<f64>()
}

/// The node's own damage contribution, ignoring its components.
///
/// Each axis sums `material stat * coefficient` over the axis' table entries,
/// scaled by size, decayed by physical damage, divided by 100, then
/// multiplied (good axes) or divided (bad axes) by the effectiveness. Axes
/// never go below zero.
pub fn own_damage_rating(node: &ObjectInstance) -> DamageRating {
    let Some(profile) = node.spec().damage.as_ref() else {
        return DamageRating::ZERO;
    };
    let Some(table) = profile.type_damage.as_ref() else {
        return DamageRating::ZERO;
    };
    let Some(material) = node.material() else {
        return DamageRating::ZERO;
    };

    let decay = (1.0 - node.damage_of(config::PHYSICAL_DAMAGE) / 1000.0).clamp(0.0, 1.0);
    let mut rating = DamageRating::ZERO;
    for axis in DamageAxis::ALL {
        let Some(coefficients) = table.get(&axis) else {
            continue;
        };
        let raw: f64 = coefficients
            .iter()
            .map(|(stat, coeff)| material.stat(stat).unwrap_or(0.0) * coeff)
            .sum::<f64>()
            * node.size();

        let mut value = raw.max(0.0) * decay / 100.0;
        if profile.good.contains(&axis) {
            value *= profile.effectiveness;
        }
        if profile.bad.contains(&axis) {
            value /= profile.effectiveness;
        }
        rating.0[axis.index()] = value;
    }
    rating
}

/// The node's own contribution plus the element-wise sum of its components'
/// ratings.
pub fn damage_rating(node: &ObjectInstance) -> DamageRating {
    own_damage_rating(node) + node.components().values().map(damage_rating).sum::<DamageRating>()
}

/// Size of the handle plus size of the damager; either may be absent.
pub fn reach(node: &ObjectInstance) -> f64 {
    let handle = node
        .component(config::HANDLE_COMPONENT)
        .map_or(0.0, ObjectInstance::size);
    let damager = node.damager().map_or(0.0, ObjectInstance::size);
    handle + damager
}

/// `1000 * base_speed / (weight + reach)`, using the damager's base speed or
/// `default_base_speed` when it declares none. Full precision; `None` when
/// the object has neither weight nor reach.
pub fn speed(node: &ObjectInstance, default_base_speed: f64) -> Option<f64> {
    let base = node
        .damager()
        .and_then(|d| d.spec().damage.as_ref())
        .and_then(|profile| profile.base_speed)
        .unwrap_or(default_base_speed);

    let denominator = weight(node) + reach(node);
    if denominator <= 0.0 {
        return None;
    }
    Some(1000.0 * base / denominator)
}
