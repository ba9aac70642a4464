//! Property and scenario tests for choice resolution and attribute rolls.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use treasure::{
    build, normalize, resolve, resolve_one, AttributeRule, AttributeValue, BuildContext,
    ChoiceSpec, Material, MaterialCatalog, Pick, SpecDecl, SpecRegistry, TreasureError,
};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("v{}", i)).collect()
}

proptest! {
    #[test]
    fn normalized_weights_sum_to_one(weights in prop::collection::vec(0.01f64..1000.0, 1..20)) {
        let normalized = normalize(&weights, weights.len()).unwrap();
        let total: f64 = normalized.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(normalized.iter().all(|w| *w >= 0.0));
    }

    #[test]
    fn distinct_picks_within_bounds(
        size in 2usize..10,
        count in 1usize..10,
        seed in any::<u64>(),
    ) {
        prop_assume!(count <= size);
        let spec: ChoiceSpec<String> = ChoiceSpec::values(names(size));
        let mut rng = StdRng::seed_from_u64(seed);

        let picks = resolve(&spec, count, &mut rng).unwrap();
        prop_assert_eq!(picks.len(), count);
        let distinct: BTreeSet<&String> = picks.iter().filter_map(Pick::leaf).collect();
        prop_assert_eq!(distinct.len(), count);
    }

    #[test]
    fn attribute_counts_stay_in_range(
        min in 0usize..4,
        extra in 0usize..3,
        seed in any::<u64>(),
    ) {
        let max = min + extra;
        let registry = SpecRegistry::builder()
            .declare(SpecDecl::new("Charm").attribute(
                "Runes",
                AttributeRule::new(min, max, ChoiceSpec::values(names(8))),
            ))
            .build()
            .unwrap();
        let materials = MaterialCatalog::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = BuildContext::new(&registry, &materials, &mut rng);

        let charm = build("Charm", &mut ctx).unwrap();
        let runes = charm.attribute("Runes").unwrap();
        prop_assert!(runes.len() >= min && runes.len() <= max);
        let distinct: BTreeSet<&str> = runes.values().into_iter().collect();
        prop_assert_eq!(distinct.len(), runes.len());
    }

    #[test]
    fn singleton_list_unwraps(seed in any::<u64>(), count in 1usize..5) {
        let spec: ChoiceSpec<String> = ChoiceSpec::list(vec![ChoiceSpec::values(["only"])]);
        let mut rng = StdRng::seed_from_u64(seed);
        let picks = resolve(&spec, count, &mut rng).unwrap();
        prop_assert_eq!(picks, vec![Pick::Leaf("only".to_string())]);
    }

    #[test]
    fn nested_lists_collapse_for_single_pick(seed in any::<u64>()) {
        let spec: ChoiceSpec<String> = ChoiceSpec::list(vec![
            ChoiceSpec::values(["a", "b"]),
            ChoiceSpec::list(vec![ChoiceSpec::values(["c", "d"]), ChoiceSpec::value("e")]),
        ]);
        let mut rng = StdRng::seed_from_u64(seed);
        let pick = resolve_one(&spec, &mut rng).unwrap();
        let leaf = pick.into_leaf().unwrap();
        prop_assert!(["a", "b", "c", "d", "e"].contains(&leaf.as_str()));
    }
}

#[test]
fn test_two_of_three_metals() {
    let registry = SpecRegistry::builder()
        .declare(SpecDecl::new("Coin").attribute(
            "Alloy",
            AttributeRule::new(2, 2, ChoiceSpec::values(["gold", "silver", "bronze"])),
        ))
        .build()
        .unwrap();
    let materials = MaterialCatalog::new();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = BuildContext::new(&registry, &materials, &mut rng);
        let coin = build("Coin", &mut ctx).unwrap();

        let alloy = coin.attribute("Alloy").unwrap();
        assert!(matches!(alloy, AttributeValue::Many(_)));
        let values: BTreeSet<&str> = alloy.values().into_iter().collect();
        assert_eq!(values.len(), 2);
        assert!(values.is_subset(&["gold", "silver", "bronze"].into_iter().collect()));
    }
}

#[test]
fn test_single_weighted_option() {
    let spec: ChoiceSpec<String> = ChoiceSpec::weighted_values(["x"], vec![1.0]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(resolve(&spec, 1, &mut rng).unwrap(), vec![Pick::Leaf("x".to_string())]);
}

#[test]
fn test_zero_weight_never_drawn() {
    let spec: ChoiceSpec<String> = ChoiceSpec::weighted_values(["never", "always"], vec![0.0, 1.0]);
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let leaf = resolve_one(&spec, &mut rng).unwrap().into_leaf().unwrap();
        assert_eq!(leaf, "always");
    }
    let result = resolve(&spec, 2, &mut rng);
    assert!(matches!(
        result,
        Err(TreasureError::InsufficientChoices { requested: 2, available: 1 })
    ));
}

#[test]
fn test_weighted_frequencies() {
    let spec: ChoiceSpec<String> = ChoiceSpec::weighted_values(["common", "rare"], vec![9.0, 1.0]);
    let mut rng = StdRng::seed_from_u64(10);
    let common = (0..5000)
        .filter(|_| {
            let pick = resolve_one(&spec, &mut rng).unwrap();
            pick.leaf().map(String::as_str) == Some("common")
        })
        .count();
    assert!((4300..4700).contains(&common), "common drawn {} times", common);
}

#[test]
fn test_single_valued_attribute_stored_as_scalar() {
    let registry = SpecRegistry::builder()
        .declare(
            SpecDecl::new("Gem")
                .materials(ChoiceSpec::values(["Ruby"]))
                .attribute("Cut", AttributeRule::new(1, 1, ChoiceSpec::values(["rose", "table"]))),
        )
        .build()
        .unwrap();
    let materials = MaterialCatalog::new().with(Material::new("Ruby").with_field("Density", 4.0));
    let mut rng = StdRng::seed_from_u64(3);
    let mut ctx = BuildContext::new(&registry, &materials, &mut rng);

    let gem = build("Gem", &mut ctx).unwrap();
    let cut = gem.attribute("Cut").unwrap().as_single().unwrap();
    assert!(cut == "rose" || cut == "table");
}
