//! Dataset Module Tests
//!
//! ## Test Scopes
//! - **Generator**: Seeded reproducibility and weight bounds.
//! - **Partitioner**: Exact coverage, non-empty segments, contiguous offsets, randomized cuts.
//! - **Splitting**: Every nut lands in exactly one segment, order preserved.

#[cfg(test)]
mod tests {
    use crate::dataset::generator::{Dataset, DatasetGenerator};
    use crate::dataset::partitioner::{PartitionPlan, Partitioner};
    use crate::error::SquirrelError;
    use crate::membership::types::WorkerId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ============================================================
    // GENERATOR TESTS
    // ============================================================

    #[test]
    fn test_generator_is_reproducible() {
        let a = DatasetGenerator::new(42, 0.1, 10.0).generate(1000);
        let b = DatasetGenerator::new(42, 0.1, 10.0).generate(1000);
        let c = DatasetGenerator::new(43, 0.1, 10.0).generate(1000);

        assert_eq!(a, b, "Same seed must produce the same dataset");
        assert_ne!(a, c);
    }

    #[test]
    fn test_generator_respects_weight_range() {
        let dataset = DatasetGenerator::new(7, 0.1, 10.0).generate(10_000);

        assert_eq!(dataset.len(), 10_000);
        for &w in dataset.weights() {
            assert!((0.1..=10.0).contains(&w), "weight {} out of range", w);
        }
    }

    #[test]
    fn test_generator_empty_dataset() {
        let dataset = DatasetGenerator::new(1, 0.1, 10.0).generate(0);
        assert!(dataset.is_empty());
    }

    // ============================================================
    // PARTITIONER TESTS
    // ============================================================

    #[test]
    fn test_plan_covers_dataset_exactly() {
        let mut rng = StdRng::seed_from_u64(42);

        for workers in [1, 2, 4, 7, 100] {
            for total in [workers, workers + 1, 1000, 1_000_298] {
                let plan = Partitioner::new(workers).plan(total, &mut rng).unwrap();

                assert_eq!(plan.worker_count(), workers);
                assert_eq!(plan.total(), total);
                assert!(plan.lengths().iter().all(|&len| len >= 1));
            }
        }
    }

    #[test]
    fn test_plan_offsets_are_contiguous() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = Partitioner::new(10).plan(5000, &mut rng).unwrap();

        let mut expected_offset = 0;
        for (i, segment) in plan.segments().iter().enumerate() {
            assert_eq!(segment.worker, WorkerId(i));
            assert_eq!(segment.offset, expected_offset);
            expected_offset += segment.len;
        }
        assert_eq!(expected_offset, 5000);
    }

    #[test]
    fn test_plan_with_exactly_one_nut_each() {
        let mut rng = StdRng::seed_from_u64(9);
        let plan = Partitioner::new(5).plan(5, &mut rng).unwrap();

        assert_eq!(plan.lengths(), vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_single_worker_takes_everything() {
        let mut rng = StdRng::seed_from_u64(9);
        let plan = Partitioner::new(1).plan(77, &mut rng).unwrap();

        assert_eq!(plan.lengths(), vec![77]);
    }

    #[test]
    fn test_plan_is_randomized() {
        let mut rng = StdRng::seed_from_u64(11);
        let partitioner = Partitioner::new(4);

        let first = partitioner.plan(100_000, &mut rng).unwrap();
        let distinct = (0..10)
            .map(|_| partitioner.plan(100_000, &mut rng).unwrap())
            .filter(|plan| plan != &first)
            .count();

        assert!(distinct > 0, "Cut points should vary between draws");
    }

    #[test]
    fn test_fewer_nuts_than_workers_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = Partitioner::new(4).plan(3, &mut rng);

        assert_eq!(
            result,
            Err(SquirrelError::InsufficientNuts {
                total: 3,
                workers: 4
            })
        );
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Partitioner::new(0).plan(10, &mut rng),
            Err(SquirrelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_detects_sum_mismatch() {
        let plan = PartitionPlan::from_lengths(&[3, 3, 3]);

        assert!(plan.validate(9).is_ok());
        assert_eq!(
            plan.validate(10),
            Err(SquirrelError::PartitionSumMismatch {
                expected: 10,
                actual: 9
            })
        );
    }

    // ============================================================
    // SPLITTING TESTS
    // ============================================================

    #[test]
    fn test_into_segments_preserves_order() {
        let dataset = Dataset::from_weights((0..10).map(|i| i as f64).collect());
        let plan = PartitionPlan::from_lengths(&[2, 5, 3]);

        let segments = dataset.into_segments(&plan).unwrap();

        assert_eq!(segments[0], vec![0.0, 1.0]);
        assert_eq!(segments[1], vec![2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(segments[2], vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_into_segments_rejects_mismatched_plan() {
        let dataset = Dataset::from_weights(vec![1.0; 10]);
        let plan = PartitionPlan::from_lengths(&[4, 4]);

        assert!(matches!(
            dataset.into_segments(&plan),
            Err(SquirrelError::PartitionSumMismatch { .. })
        ));
    }

    #[test]
    fn test_every_nut_assigned_once() {
        // ARRANGE
        let mut generator = DatasetGenerator::new(42, 0.1, 10.0);
        let dataset = generator.generate(50_000);
        let original: Vec<f64> = dataset.weights().to_vec();
        let plan = Partitioner::new(6).plan(50_000, generator.rng()).unwrap();

        // ACT
        let segments = dataset.into_segments(&plan).unwrap();
        let rejoined: Vec<f64> = segments.into_iter().flatten().collect();

        // ASSERT: Concatenated segments give back the dataset in order
        assert_eq!(rejoined, original);
    }
}
