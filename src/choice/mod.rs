//! # Choice Module
//!
//! Declarative descriptions of selectable values and the resolver that samples
//! from them.
//!
//! A [`ChoiceSpec`] is either a terminal value or a list of nested sub-specs,
//! optionally carrying a weight list. Nesting expresses categories: a list of
//! weapon categories, each a list of concrete weapons, collapses to a single
//! weapon when one pick is requested.

pub mod resolver;

pub use resolver::*;

use serde::Deserialize;

/// A possibly nested, possibly weighted description of selectable values.
///
/// # Examples
///
/// ```
/// use treasure::ChoiceSpec;
///
/// let metals: ChoiceSpec<String> = ChoiceSpec::weighted(
///     vec![ChoiceSpec::value("Steel"), ChoiceSpec::value("Iron")],
///     vec![3.0, 1.0],
/// );
/// assert_eq!(metals.len(), 2);
/// assert!(metals.is_weighted());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ChoiceRepr<T>")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub enum ChoiceSpec<T> {
    /// A concrete value, returned as-is by the resolver
    Terminal(T),
    /// A set of sub-specs, equal-weighted unless `weights` is present
    Options {
        choices: Vec<ChoiceSpec<T>>,
        weights: Option<Vec<f64>>,
    },
}

/// JSON shape of a [`ChoiceSpec`]: `{"choices", "weights"}`, an array, or a scalar.
#[derive(Deserialize)]
#[serde(untagged)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
enum ChoiceRepr<T> {
    Weighted {
        choices: Vec<ChoiceSpec<T>>,
        weights: Vec<f64>,
    },
    List(Vec<ChoiceSpec<T>>),
    Terminal(T),
}

impl<T> From<ChoiceRepr<T>> for ChoiceSpec<T> {
    fn from(repr: ChoiceRepr<T>) -> Self {
        match repr {
            ChoiceRepr::Weighted { choices, weights } => ChoiceSpec::Options {
                choices,
                weights: Some(weights),
            },
            ChoiceRepr::List(choices) => ChoiceSpec::Options {
                choices,
                weights: None,
            },
            ChoiceRepr::Terminal(value) => ChoiceSpec::Terminal(value),
        }
    }
}

impl<T> ChoiceSpec<T> {
    /// Creates a terminal spec.
    pub fn value(value: impl Into<T>) -> Self {
        ChoiceSpec::Terminal(value.into())
    }

    /// Creates an unweighted list of sub-specs.
    pub fn list(choices: Vec<ChoiceSpec<T>>) -> Self {
        ChoiceSpec::Options {
            choices,
            weights: None,
        }
    }

    /// Creates a weighted list of sub-specs. Weights are normalized at
    /// resolution time and need not sum to one.
    pub fn weighted(choices: Vec<ChoiceSpec<T>>, weights: Vec<f64>) -> Self {
        ChoiceSpec::Options {
            choices,
            weights: Some(weights),
        }
    }

    /// Creates an unweighted list of terminals.
    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        Self::list(values.into_iter().map(Self::value).collect())
    }

    /// Creates a weighted list of terminals.
    pub fn weighted_values<I, V>(values: I, weights: Vec<f64>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        Self::weighted(values.into_iter().map(Self::value).collect(), weights)
    }

    /// Returns true for terminal specs.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChoiceSpec::Terminal(_))
    }

    /// Returns true if this level carries an explicit weight list.
    pub fn is_weighted(&self) -> bool {
        matches!(
            self,
            ChoiceSpec::Options {
                weights: Some(_),
                ..
            }
        )
    }

    /// Number of choices at this level; a terminal counts as one.
    pub fn len(&self) -> usize {
        match self {
            ChoiceSpec::Terminal(_) => 1,
            ChoiceSpec::Options { choices, .. } => choices.len(),
        }
    }

    /// True for an option list with no choices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All terminal values reachable from this spec, depth-first.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            ChoiceSpec::Terminal(value) => out.push(value),
            ChoiceSpec::Options { choices, .. } => {
                for choice in choices {
                    choice.collect_leaves(out);
                }
            }
        }
    }

    /// Checks every weight list in the tree: matching length, finite,
    /// non-negative, and a positive sum.
    pub fn validate(&self) -> crate::TreasureResult<()> {
        if let ChoiceSpec::Options { choices, weights } = self {
            if let Some(weights) = weights {
                normalize(weights, choices.len())?;
            }
            for choice in choices {
                choice.validate()?;
            }
        }
        Ok(())
    }
}

/// A single resolved pick.
///
/// Picks made with `count == 1` always collapse to a [`Pick::Leaf`]. When
/// several distinct picks are requested at once, a picked sub-list with more
/// than one option is kept as a [`Pick::Group`]. An empty group stands for
/// "nothing chosen".
#[derive(Debug, Clone, PartialEq)]
pub enum Pick<T> {
    Leaf(T),
    Group(Vec<ChoiceSpec<T>>),
}

impl<T> Pick<T> {
    /// Returns the leaf value, if this pick is one.
    pub fn leaf(&self) -> Option<&T> {
        match self {
            Pick::Leaf(value) => Some(value),
            Pick::Group(_) => None,
        }
    }

    /// Consumes the pick, returning the leaf value if it is one.
    pub fn into_leaf(self) -> Option<T> {
        match self {
            Pick::Leaf(value) => Some(value),
            Pick::Group(_) => None,
        }
    }

    /// True for an empty group.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Pick::Group(choices) if choices.is_empty())
    }

    /// Every terminal value contained in this pick.
    pub fn leaves(&self) -> Vec<&T> {
        match self {
            Pick::Leaf(value) => vec![value],
            Pick::Group(choices) => choices.iter().flat_map(|c| c.leaves()).collect(),
        }
    }
}
