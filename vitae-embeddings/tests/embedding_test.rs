use proptest::prelude::*;
use vitae_core::config::EmbeddingConfig;
use vitae_core::traits::IEmbeddingProvider;
use vitae_embeddings::{cosine_similarity, EmbeddingEngine, TfIdfFallback};

#[test]
fn engine_is_deterministic_across_instances() {
    let config = EmbeddingConfig::default();
    let a = EmbeddingEngine::new(&config);
    let b = EmbeddingEngine::new(&config);
    let text = "Led migration of payment services to Kubernetes";
    assert_eq!(a.embed(text).unwrap(), b.embed(text).unwrap());
}

#[test]
fn shared_vocabulary_scores_above_disjoint_vocabulary() {
    let p = TfIdfFallback::new(256);
    let requirement = p.embed("Kubernetes operators and Helm charts").unwrap();
    let related = p.embed("Wrote Kubernetes operators for internal Helm releases").unwrap();
    let unrelated = p.embed("Organised the annual sales conference").unwrap();
    assert!(cosine_similarity(&requirement, &related) > cosine_similarity(&requirement, &unrelated));
}

#[test]
fn batch_through_engine_matches_single() {
    let engine = EmbeddingEngine::new(&EmbeddingConfig::default());
    let texts = vec!["rust".to_string(), "python data pipelines".to_string()];
    let batch = engine.embed_batch(&texts).unwrap();
    assert_eq!(batch[1], engine.embed(&texts[1]).unwrap());
}

proptest! {
    #[test]
    fn cosine_stays_within_unit_range(
        a in proptest::collection::vec(-10.0f32..10.0, 1..32),
        b in proptest::collection::vec(-10.0f32..10.0, 1..32),
    ) {
        let sim = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&sim));
    }

    #[test]
    fn tfidf_vectors_are_unit_or_zero(text in "[a-z ]{0,64}") {
        let v = TfIdfFallback::new(128).embed(&text).unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm < 1e-6 || (norm - 1.0).abs() < 1e-4);
    }
}
