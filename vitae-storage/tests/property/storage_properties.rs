use proptest::prelude::*;
use vitae_core::skill::{Dimension, SkillConfidence};
use vitae_core::traits::IPriorsStorage;
use vitae_storage::StorageEngine;

fn dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Relevance),
        Just(Dimension::Passion),
        Just(Dimension::Identity),
        Just(Dimension::Requirement),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The last write to each dimension is what a read returns; writes to
    /// one dimension never disturb another.
    #[test]
    fn last_write_per_dimension_wins(
        writes in proptest::collection::vec((dimension(), 0.0f64..=1.0, 1u64..50), 1..20)
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let mut expected = std::collections::HashMap::new();
        for (d, c, n) in &writes {
            let conf = SkillConfidence::new(None, *c, *n);
            engine.upsert_dimension("skill", *d, &conf).unwrap();
            expected.insert(*d, conf);
        }
        let priors = engine.get_priors("skill").unwrap().unwrap();
        for d in Dimension::ALL {
            let stored = priors.dimension(d);
            match expected.get(&d) {
                Some(conf) => prop_assert_eq!(stored, conf),
                None => prop_assert_eq!(stored.observation_count, 0),
            }
        }
    }

    /// Stored confidence with zero observations always reads back as 0.0.
    #[test]
    fn unobserved_rows_read_as_zero(c in 0.0f64..=1.0) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let raw = SkillConfidence { value: None, confidence: c, observation_count: 0 };
        engine.upsert_dimension("x", Dimension::Passion, &raw).unwrap();
        let priors = engine.get_priors("x").unwrap().unwrap();
        prop_assert_eq!(priors.passion.confidence, 0.0);
    }
}
