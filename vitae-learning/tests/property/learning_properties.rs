use proptest::prelude::*;
use vitae_core::config::LearningConfig;
use vitae_core::models::LearningMode;
use vitae_core::skill::{SkillConfidence, SkillValue};
use vitae_learning::compute_update;

fn mode() -> impl Strategy<Value = LearningMode> {
    prop_oneof![
        Just(LearningMode::NoLearning),
        Just(LearningMode::SoftPenalty),
        Just(LearningMode::FullLearning),
        Just(LearningMode::CorrectPrediction),
        Just(LearningMode::WrongPrediction),
    ]
}

proptest! {
    #[test]
    fn confidence_stays_in_bounds(modes in prop::collection::vec(mode(), 1..40)) {
        let config = LearningConfig::default();
        let new_value = SkillValue::from("relevant");
        let mut current = SkillConfidence::unobserved();
        for m in modes {
            current = compute_update(&current, m, Some(&new_value), &config).record;
            prop_assert!(current.confidence >= config.min_confidence);
            prop_assert!(current.confidence <= config.max_confidence);
        }
    }

    #[test]
    fn every_update_counts_one_observation(modes in prop::collection::vec(mode(), 1..40)) {
        let config = LearningConfig::default();
        let mut current = SkillConfidence::unobserved();
        for (i, m) in modes.into_iter().enumerate() {
            current = compute_update(&current, m, None, &config).record;
            prop_assert_eq!(current.observation_count, i as u64 + 1);
        }
    }

    #[test]
    fn single_wrong_prediction_keeps_unstable_value(confidence in 0.05f64..0.95, observations in 1u64..2) {
        let config = LearningConfig::default();
        let current = SkillConfidence::new(Some("core".into()), confidence, observations);
        let next = compute_update(
            &current,
            LearningMode::WrongPrediction,
            Some(&SkillValue::from("gap")),
            &config,
        );
        prop_assert_eq!(next.record.value, current.value);
    }

    #[test]
    fn no_learning_is_idempotent_on_confidence(confidence in 0.05f64..0.95, observations in 1u64..100, repeats in 1usize..10) {
        let config = LearningConfig::default();
        let mut current = SkillConfidence::new(Some("core".into()), confidence, observations);
        for _ in 0..repeats {
            current = compute_update(&current, LearningMode::NoLearning, None, &config).record;
        }
        prop_assert_eq!(current.confidence, confidence);
        prop_assert_eq!(current.value, Some(SkillValue::from("core")));
        prop_assert_eq!(current.observation_count, observations + repeats as u64);
    }
}
