use proptest::prelude::*;
use vitae_boost::{compute_boost, BoostCalculator, BoostTarget};
use vitae_core::annotation::{
    Annotation, AnnotationKind, AnnotationSpan, Priority, Relevance, RequirementType,
};
use vitae_core::config::ConflictStrategy;

fn requirement() -> impl Strategy<Value = RequirementType> {
    prop_oneof![
        Just(RequirementType::MustHave),
        Just(RequirementType::NiceToHave),
        Just(RequirementType::Neutral),
    ]
}

fn relevance() -> impl Strategy<Value = Relevance> {
    prop::sample::select(Relevance::ASCENDING.to_vec())
}

fn strategy() -> impl Strategy<Value = ConflictStrategy> {
    prop_oneof![
        Just(ConflictStrategy::MaxBoost),
        Just(ConflictStrategy::AvgBoost),
        Just(ConflictStrategy::LastWrite),
    ]
}

fn annotation(relevance: Relevance, requirement: RequirementType, priority: u8) -> Annotation {
    Annotation::human(
        AnnotationSpan::new("skill", 0, 5),
        AnnotationKind::SkillMatch,
        relevance,
        requirement,
        Priority::new(priority).unwrap(),
    )
    .with_achievement("ach")
}

proptest! {
    #[test]
    fn boost_rises_strictly_with_relevance(req in requirement(), priority in 1u8..=5) {
        let boosts: Vec<f64> = Relevance::ASCENDING
            .iter()
            .map(|r| compute_boost(&annotation(*r, req, priority)))
            .collect();
        for pair in boosts.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn aggregate_is_deterministic_and_order_independent(
        levels in prop::collection::vec((relevance(), requirement(), 1u8..=5), 1..8),
        strategy in strategy(),
    ) {
        let annotations: Vec<Annotation> = levels
            .iter()
            .map(|(r, q, p)| annotation(*r, *q, *p))
            .collect();
        let mut reversed = annotations.clone();
        reversed.reverse();

        let calc = BoostCalculator::with_strategy(strategy);
        let target = BoostTarget::Achievement("ach".into());
        let first = calc.aggregate(&annotations, &target);
        prop_assert_eq!(first, calc.aggregate(&annotations, &target));
        prop_assert_eq!(first, calc.aggregate(&reversed, &target));
    }

    #[test]
    fn aggregate_stays_within_member_bounds(
        levels in prop::collection::vec((relevance(), requirement(), 1u8..=5), 1..8),
        strategy in strategy(),
    ) {
        let annotations: Vec<Annotation> = levels
            .iter()
            .map(|(r, q, p)| annotation(*r, *q, *p))
            .collect();
        let boosts: Vec<f64> = annotations.iter().map(compute_boost).collect();
        let lo = boosts.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = boosts.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let value = BoostCalculator::with_strategy(strategy)
            .aggregate(&annotations, &BoostTarget::Achievement("ach".into()));
        prop_assert!(value >= lo - 1e-12 && value <= hi + 1e-12);
    }
}
