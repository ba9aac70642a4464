//! # Choice Resolver
//!
//! Weighted sampling without replacement over [`ChoiceSpec`] trees, with the
//! flattening rules that turn nested picks into concrete values.

use super::{ChoiceSpec, Pick};
use crate::{TreasureError, TreasureResult};
use log::trace;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;

/// Normalizes a weight list so it sums to one.
///
/// Fails with [`TreasureError::InvalidSpec`] if the list length differs from
/// `expected_len`, if any weight is negative or not finite, or if the weights
/// sum to zero.
///
/// # Examples
///
/// ```
/// use treasure::normalize;
///
/// let weights = normalize(&[100.0, 90.0, 50.0, 10.0], 4).unwrap();
/// assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// assert!((weights[0] - 0.4).abs() < 1e-9);
/// ```
pub fn normalize(weights: &[f64], expected_len: usize) -> TreasureResult<Vec<f64>> {
    if weights.len() != expected_len {
        return Err(TreasureError::InvalidSpec(format!(
            "weight list has {} entries for {} choices",
            weights.len(),
            expected_len
        )));
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(TreasureError::InvalidSpec(format!(
            "weight {} is negative or not finite",
            bad
        )));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(TreasureError::InvalidSpec(
            "weights sum to zero".to_string(),
        ));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

/// Draws `count` distinct indices from a weight distribution.
///
/// Each draw samples proportionally to the remaining weights and then removes
/// the chosen index, so no index is returned twice. Indices with zero weight
/// are never drawn; running out of non-zero entries fails with
/// [`TreasureError::InsufficientChoices`].
pub fn sample_distinct(
    weights: &[f64],
    count: usize,
    rng: &mut StdRng,
) -> TreasureResult<Vec<usize>> {
    let available = weights.iter().filter(|w| **w > 0.0).count();
    if count > available {
        return Err(TreasureError::InsufficientChoices {
            requested: count,
            available,
        });
    }

    let mut remaining = weights.to_vec();
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let dist = WeightedIndex::new(&remaining).map_err(|_| {
            TreasureError::InsufficientChoices {
                requested: count,
                available,
            }
        })?;
        let index = dist.sample(rng);
        remaining[index] = 0.0;
        picked.push(index);
    }
    Ok(picked)
}

/// Resolves `count` distinct picks from a choice spec.
///
/// - A terminal is returned unchanged, whatever `count` is. So is the sole
///   option of a single-entry list.
/// - An option list is sampled without replacement, using its normalized
///   weights or uniform weights when it has none.
/// - Each picked sub-spec is then flattened: a weighted sub-list always
///   collapses to one leaf using its own weights, an unweighted sub-list of
///   several options collapses only when `count == 1`, and singleton lists are
///   always unwrapped.
///
/// The spec is never mutated; the same spec and seed always give the same
/// result.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use treasure::{resolve, ChoiceSpec, Pick};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let spec: ChoiceSpec<String> = ChoiceSpec::weighted_values(["x"], vec![1.0]);
/// let picks = resolve(&spec, 1, &mut rng).unwrap();
/// assert_eq!(picks, vec![Pick::Leaf("x".to_string())]);
/// ```
pub fn resolve<T: Clone>(
    spec: &ChoiceSpec<T>,
    count: usize,
    rng: &mut StdRng,
) -> TreasureResult<Vec<Pick<T>>> {
    let (choices, weights) = match spec {
        ChoiceSpec::Terminal(value) => return Ok(vec![Pick::Leaf(value.clone())]),
        ChoiceSpec::Options { choices, weights } => (choices, weights),
    };

    let weights = match weights {
        Some(weights) => normalize(weights, choices.len())?,
        None => vec![1.0 / choices.len().max(1) as f64; choices.len()],
    };

    // A lone option is the answer whatever the count.
    if choices.len() == 1 {
        return Ok(vec![flatten(&choices[0], count, rng)?]);
    }

    let indices = sample_distinct(&weights, count, rng)?;
    trace!("drew indices {:?} from {} choices", indices, choices.len());

    indices
        .into_iter()
        .map(|index| flatten(&choices[index], count, rng))
        .collect()
}

/// Resolves exactly one pick; nested lists collapse all the way to a leaf.
pub fn resolve_one<T: Clone>(spec: &ChoiceSpec<T>, rng: &mut StdRng) -> TreasureResult<Pick<T>> {
    resolve(spec, 1, rng)?
        .into_iter()
        .next()
        .ok_or(TreasureError::InsufficientChoices {
            requested: 1,
            available: 0,
        })
}

fn flatten<T: Clone>(
    picked: &ChoiceSpec<T>,
    outer_count: usize,
    rng: &mut StdRng,
) -> TreasureResult<Pick<T>> {
    let mut current = picked;
    loop {
        match current {
            ChoiceSpec::Terminal(value) => return Ok(Pick::Leaf(value.clone())),
            ChoiceSpec::Options {
                weights: Some(_), ..
            } => return resolve_one(current, rng),
            ChoiceSpec::Options { choices, .. } if choices.len() == 1 => {
                current = &choices[0];
            }
            ChoiceSpec::Options { choices, .. } if choices.len() > 1 && outer_count == 1 => {
                return resolve_one(current, rng);
            }
            ChoiceSpec::Options { choices, .. } => return Ok(Pick::Group(choices.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn leaves(picks: Vec<Pick<String>>) -> Vec<String> {
        picks.into_iter().filter_map(Pick::into_leaf).collect()
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let weights = normalize(&[5.0, 3.0, 1.0], 3).unwrap();
        let total: f64 = weights.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_errors() {
        assert!(matches!(
            normalize(&[1.0, 1.0], 3),
            Err(TreasureError::InvalidSpec(_))
        ));
        assert!(matches!(
            normalize(&[0.0, 0.0], 2),
            Err(TreasureError::InvalidSpec(_))
        ));
        assert!(matches!(
            normalize(&[1.0, -1.0], 2),
            Err(TreasureError::InvalidSpec(_))
        ));
        assert!(matches!(
            normalize(&[f64::NAN], 1),
            Err(TreasureError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_terminal_ignores_count() {
        let spec: ChoiceSpec<String> = ChoiceSpec::value("only");
        for count in [0, 1, 5] {
            let picks = resolve(&spec, count, &mut rng(3)).unwrap();
            assert_eq!(leaves(picks), vec!["only".to_string()]);
        }
    }

    #[test]
    fn test_distinct_without_replacement() {
        let spec: ChoiceSpec<String> =
            ChoiceSpec::weighted_values(["gold", "silver", "bronze"], vec![1.0, 1.0, 1.0]);
        let mut r = rng(11);
        for _ in 0..200 {
            let picked = leaves(resolve(&spec, 2, &mut r).unwrap());
            assert_eq!(picked.len(), 2);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 2);
        }
    }

    #[test]
    fn test_too_many_picks_is_insufficient() {
        let spec: ChoiceSpec<String> = ChoiceSpec::values(["a", "b"]);
        assert!(matches!(
            resolve(&spec, 3, &mut rng(1)),
            Err(TreasureError::InsufficientChoices {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_zero_weight_entries_are_never_drawn() {
        let spec: ChoiceSpec<String> =
            ChoiceSpec::weighted_values(["never", "always"], vec![0.0, 1.0]);
        let mut r = rng(5);
        for _ in 0..100 {
            assert_eq!(leaves(resolve(&spec, 1, &mut r).unwrap()), vec!["always"]);
        }
        assert!(matches!(
            resolve(&spec, 2, &mut r),
            Err(TreasureError::InsufficientChoices { .. })
        ));
    }

    #[test]
    fn test_invalid_weights_surface() {
        let spec: ChoiceSpec<String> = ChoiceSpec::weighted_values(["a", "b"], vec![1.0]);
        assert!(matches!(
            resolve(&spec, 1, &mut rng(1)),
            Err(TreasureError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_singleton_unwraps_regardless_of_count() {
        let spec: ChoiceSpec<String> = ChoiceSpec::list(vec![
            ChoiceSpec::list(vec![ChoiceSpec::list(vec![ChoiceSpec::value("deep")])]),
            ChoiceSpec::value("flat"),
        ]);
        let mut picked = leaves(resolve(&spec, 2, &mut rng(9)).unwrap());
        picked.sort();
        assert_eq!(picked, vec!["deep".to_string(), "flat".to_string()]);
    }

    #[test]
    fn test_nested_lists_collapse_for_single_pick() {
        let spec: ChoiceSpec<String> = ChoiceSpec::list(vec![
            ChoiceSpec::list(vec![
                ChoiceSpec::values(["sword", "falchion"]),
                ChoiceSpec::values(["dagger", "stiletto"]),
            ]),
            ChoiceSpec::values(["club", "mace"]),
        ]);
        let mut r = rng(21);
        for _ in 0..50 {
            let pick = resolve_one(&spec, &mut r).unwrap();
            assert!(matches!(pick, Pick::Leaf(_)));
        }
    }

    #[test]
    fn test_nested_list_kept_as_group_for_multiple_picks() {
        let spec: ChoiceSpec<String> = ChoiceSpec::list(vec![
            ChoiceSpec::values(["a", "b"]),
            ChoiceSpec::values(["c", "d"]),
        ]);
        let picks = resolve(&spec, 2, &mut rng(4)).unwrap();
        assert_eq!(picks.len(), 2);
        assert!(picks.iter().all(|p| matches!(p, Pick::Group(g) if g.len() == 2)));
    }

    #[test]
    fn test_weighted_sub_list_always_collapses() {
        let spec: ChoiceSpec<String> = ChoiceSpec::list(vec![
            ChoiceSpec::weighted_values(["a", "b"], vec![1.0, 1.0]),
            ChoiceSpec::weighted_values(["c", "d"], vec![1.0, 1.0]),
        ]);
        let picks = resolve(&spec, 2, &mut rng(4)).unwrap();
        assert!(picks.iter().all(|p| matches!(p, Pick::Leaf(_))));
    }

    #[test]
    fn test_empty_sub_list_is_nothing() {
        let spec: ChoiceSpec<String> =
            ChoiceSpec::weighted(vec![ChoiceSpec::list(Vec::new())], vec![1.0]);
        let pick = resolve_one(&spec, &mut rng(2)).unwrap();
        assert!(pick.is_nothing());
    }

    #[test]
    fn test_weights_bias_selection() {
        let spec: ChoiceSpec<String> =
            ChoiceSpec::weighted_values(["common", "rare"], vec![99.0, 1.0]);
        let mut r = rng(77);
        let common = (0..1000)
            .filter(|_| {
                resolve_one(&spec, &mut r).unwrap().leaf().map(String::as_str) == Some("common")
            })
            .count();
        assert!(common > 900);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let spec: ChoiceSpec<String> = ChoiceSpec::values(["a", "b", "c", "d", "e"]);
        let first = resolve(&spec, 3, &mut rng(123)).unwrap();
        let second = resolve(&spec, 3, &mut rng(123)).unwrap();
        assert_eq!(first, second);
    }
}
