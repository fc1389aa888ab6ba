use irlsim::domain::errors::SimulationError;
use irlsim::domain::ports::MethodCatalog;
use irlsim::domain::simulation::random::stream_rng;
use irlsim::domain::simulation::{
    AttributeSnapshot, BoundedSampler, MissingRangePolicy, NormalizationPolicy, SimulationEngine,
};
use irlsim::domain::types::{
    Attribute, AttributeRange, MethodId, MethodSelection, WeightTable, WeightVector,
};
use irlsim::infrastructure::InMemoryCatalog;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

// --- Fixtures ---

struct FixedCatalog {
    ranges: HashMap<MethodId, [AttributeRange; 4]>,
}

impl FixedCatalog {
    fn new() -> Self {
        Self {
            ranges: HashMap::new(),
        }
    }

    fn with(mut self, id: u32, bounds: [(f64, f64); 4]) -> Self {
        let ranges = bounds.map(|(min, max)| AttributeRange::new(min, max).unwrap());
        self.ranges.insert(MethodId(id), ranges);
        self
    }
}

impl MethodCatalog for FixedCatalog {
    fn attribute_range(&self, method: MethodId, attribute: Attribute) -> Option<AttributeRange> {
        self.ranges.get(&method).map(|r| r[attribute.index()])
    }
}

fn selection(ids: &[u32]) -> MethodSelection {
    MethodSelection::new(ids.iter().map(|id| MethodId(*id)).collect()).unwrap()
}

fn unit_weights(ids: &[u32]) -> WeightTable {
    ids.iter()
        .map(|id| (MethodId(*id), WeightVector::default()))
        .collect()
}

fn fuel_cell_catalog() -> FixedCatalog {
    FixedCatalog::new()
        .with(1, [(3.0, 5.0), (6.0, 8.0), (4.0, 6.0), (5.0, 7.0)])
        .with(2, [(3.5, 6.5), (4.5, 8.5), (4.2, 7.9), (5.1, 8.8)])
        .with(3, [(4.0, 7.0), (5.0, 7.5), (4.4, 8.2), (4.9, 7.3)])
}

// --- Scenarios ---

#[test]
fn test_reference_scenario_scores_five_and_a_half() {
    let catalog = FixedCatalog::new().with(1, [(3.0, 5.0), (6.0, 8.0), (4.0, 6.0), (5.0, 7.0)]);
    let engine = SimulationEngine::new(BoundedSampler::new(0.0).unwrap());

    let result = engine
        .run(&selection(&[1]), &unit_weights(&[1]), &catalog, 10_000, &mut stream_rng(1, 0))
        .unwrap();

    assert_eq!(result.len(), 10_000);
    assert!(result.scores().iter().all(|s| *s == 5.5));
    let stats = result.stats().unwrap();
    assert_eq!(stats.mean, 5.5);
    assert_eq!(stats.std_dev, 0.0);
    assert_eq!(stats.percentile_5, 5.5);
    assert_eq!(stats.percentile_95, 5.5);
}

#[test]
fn test_point_ranges_give_constant_sequence_for_any_sigma() {
    let catalog = FixedCatalog::new()
        .with(1, [(2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)])
        .with(2, [(6.0, 6.0), (6.0, 6.0), (6.0, 6.0), (6.0, 6.0)]);
    let engine = SimulationEngine::new(BoundedSampler::new(5.0).unwrap());

    let result = engine
        .run(&selection(&[1, 2]), &unit_weights(&[1, 2]), &catalog, 1_000, &mut stream_rng(3, 0))
        .unwrap();

    let first = result.scores()[0];
    assert!((first - (14.0 + 24.0) / 8.0).abs() < 1e-12);
    assert!(result.scores().iter().all(|s| *s == first));
}

#[test]
fn test_scores_bounded_by_weighted_range_extremes() {
    let catalog = fuel_cell_catalog();
    let engine = SimulationEngine::new(BoundedSampler::new(2.0).unwrap());

    let result = engine
        .run(&selection(&[1, 2, 3]), &unit_weights(&[1, 2, 3]), &catalog, 5_000, &mut stream_rng(8, 0))
        .unwrap();

    // with unit weights a score is the mean of twelve clipped samples
    let stats = result.stats().unwrap();
    assert!(stats.min >= 3.0 && stats.max <= 8.8);
    assert!(stats.std_dev > 0.0);
}

#[test]
fn test_trial_count_is_exact() {
    let catalog = fuel_cell_catalog();
    let engine = SimulationEngine::default();
    for trials in [0, 1, 2, 17, 1_000] {
        let result = engine
            .run(&selection(&[1, 2]), &unit_weights(&[1, 2]), &catalog, trials, &mut stream_rng(0, 0))
            .unwrap();
        assert_eq!(result.len(), trials);

        let parallel = engine
            .run_parallel(&selection(&[1, 2]), &unit_weights(&[1, 2]), &catalog, trials, 0, 7)
            .unwrap();
        assert_eq!(parallel.len(), trials);
    }
}

#[test]
fn test_fixed_seed_is_bit_identical() {
    let catalog = fuel_cell_catalog();
    let engine = SimulationEngine::default();
    let methods = selection(&[3, 1, 2]);
    let weights = unit_weights(&[1, 2, 3]);

    let a = engine
        .run(&methods, &weights, &catalog, 2_000, &mut StdRng::seed_from_u64(123))
        .unwrap();
    let b = engine
        .run(&methods, &weights, &catalog, 2_000, &mut StdRng::seed_from_u64(123))
        .unwrap();
    let c = engine
        .run(&methods, &weights, &catalog, 2_000, &mut StdRng::seed_from_u64(124))
        .unwrap();

    let bits = |r: &[f64]| r.iter().map(|s| s.to_bits()).collect::<Vec<u64>>();
    assert_eq!(bits(a.scores()), bits(b.scores()));
    assert_ne!(bits(a.scores()), bits(c.scores()));
}

#[test]
fn test_empty_selection_fails_everywhere() {
    let catalog = fuel_cell_catalog();
    let engine = SimulationEngine::default();
    let empty = MethodSelection::default();

    assert_eq!(
        engine
            .run(&empty, &WeightTable::new(), &catalog, 10, &mut stream_rng(0, 0))
            .unwrap_err(),
        SimulationError::EmptySelection
    );
    assert_eq!(
        engine.run_parallel(&empty, &WeightTable::new(), &catalog, 10, 0, 5).unwrap_err(),
        SimulationError::EmptySelection
    );
    assert_eq!(
        engine.snapshot(&empty, &catalog).unwrap_err(),
        SimulationError::EmptySelection
    );
}

#[test]
fn test_legacy_normalization_differs_only_with_unequal_weight_sums() {
    let catalog = fuel_cell_catalog();
    let degenerate = SimulationEngine::new(BoundedSampler::new(0.0).unwrap());
    let legacy = degenerate.with_normalization(NormalizationPolicy::LastMethod);
    let methods = selection(&[1, 2]);

    let equal = unit_weights(&[1, 2]);
    let a = degenerate.run(&methods, &equal, &catalog, 1, &mut stream_rng(0, 0)).unwrap();
    let b = legacy.run(&methods, &equal, &catalog, 1, &mut stream_rng(0, 0)).unwrap();
    assert_eq!(a.scores(), b.scores());

    let mut unequal = equal.clone();
    unequal.insert(MethodId(2), WeightVector::new(2.0, 2.0, 0.5, 0.5).unwrap());
    let a = degenerate.run(&methods, &unequal, &catalog, 1, &mut stream_rng(0, 0)).unwrap();
    let b = legacy.run(&methods, &unequal, &catalog, 1, &mut stream_rng(0, 0)).unwrap();
    assert_ne!(a.scores(), b.scores());
}

#[test]
fn test_missing_range_policies() {
    let catalog = fuel_cell_catalog();
    let methods = selection(&[1, 42]);
    let weights = unit_weights(&[1, 42]);

    let strict = SimulationEngine::default();
    assert_eq!(
        strict
            .run(&methods, &weights, &catalog, 10, &mut stream_rng(0, 0))
            .unwrap_err(),
        SimulationError::MissingAttributeRange {
            method: MethodId(42),
            attribute: Attribute::Cost
        }
    );

    let lenient = SimulationEngine::default().with_missing_range(MissingRangePolicy::Skip);
    let result = lenient
        .run(&methods, &weights, &catalog, 10, &mut stream_rng(0, 0))
        .unwrap();
    assert_eq!(result.len(), 10);
    assert_eq!(lenient.snapshot(&methods, &catalog).unwrap().methods, 1);
}

#[test]
fn test_engine_over_decode_fixture() {
    let catalog = InMemoryCatalog::decode_fixture(&mut StdRng::seed_from_u64(2024)).unwrap();
    let methods = catalog
        .resolve_selection(&["Neutron Imaging", "Density Functional Theory", "Raman Spectroscopy"])
        .unwrap();
    let weights: WeightTable = methods.iter().map(|id| (id, WeightVector::default())).collect();

    let result = SimulationEngine::default()
        .run_parallel(&methods, &weights, &catalog, 10_000, 99, 1_000)
        .unwrap();
    let stats = result.stats().unwrap();

    // fixture ranges live in [3, 9]
    assert!(stats.min >= 3.0 && stats.max <= 9.0);
    assert!(stats.percentile_5 < stats.median && stats.median < stats.percentile_95);

    let snapshot = AttributeSnapshot::compute(&methods, &catalog, MissingRangePolicy::Fail).unwrap();
    assert!((stats.mean - average(&snapshot)).abs() < 0.1);
}

fn average(snapshot: &AttributeSnapshot) -> f64 {
    Attribute::ALL.iter().map(|a| snapshot.get(*a)).sum::<f64>() / 4.0
}

// --- Properties ---

proptest! {
    #[test]
    fn prop_snapshot_is_permutation_invariant(order in Just(vec![1u32, 2, 3]).prop_shuffle()) {
        let catalog = fuel_cell_catalog();
        let baseline = AttributeSnapshot::compute(&selection(&[1, 2, 3]), &catalog, MissingRangePolicy::Fail).unwrap();
        let shuffled = AttributeSnapshot::compute(&selection(&order), &catalog, MissingRangePolicy::Fail).unwrap();
        for attribute in Attribute::ALL {
            prop_assert!((baseline.get(attribute) - shuffled.get(attribute)).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_every_draw_is_clipped(min in -10.0f64..10.0, width in 0.0f64..5.0, seed in any::<u64>()) {
        let sampler = BoundedSampler::default();
        let range = AttributeRange::new(min, min + width).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..10_000 {
            let value = sampler.sample(&range, &mut rng);
            prop_assert!(value >= range.min() && value <= range.max());
        }
    }
}
