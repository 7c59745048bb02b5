use proptest::prelude::*;
use vitae_core::annotation::AnnotationSpan;
use vitae_core::skill::{normalize_skill, SkillConfidence};

proptest! {
    #[test]
    fn confidence_is_clamped_and_zero_when_unobserved(c in -10.0f64..10.0, obs in 0u64..50) {
        let record = SkillConfidence::new(None, c, obs);
        prop_assert!((0.0..=1.0).contains(&record.confidence));
        if obs == 0 {
            prop_assert_eq!(record.confidence, 0.0);
        }
    }

    #[test]
    fn normalize_skill_is_idempotent(s in "[ A-Za-z0-9+#._-]{0,24}") {
        let once = normalize_skill(&s);
        prop_assert_eq!(normalize_skill(&once), once.clone());
    }

    #[test]
    fn span_overlap_is_symmetric(a in 0usize..100, b in 0usize..100, c in 0usize..100, d in 0usize..100) {
        let x = AnnotationSpan::new("x", a, b);
        let y = AnnotationSpan::new("y", c, d);
        prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
    }
}
