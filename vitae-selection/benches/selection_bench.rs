use std::collections::BTreeSet;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use vitae_core::config::SelectionConfig;
use vitae_core::models::{AchievementRecord, SelectionContext};
use vitae_embeddings::TfIdfFallback;
use vitae_priors::PriorsStore;
use vitae_selection::CandidateSelector;
use vitae_storage::StorageEngine;

fn bench_select(c: &mut Criterion) {
    let priors = Arc::new(PriorsStore::new(Arc::new(
        StorageEngine::open_in_memory().unwrap(),
    )));
    let selector = CandidateSelector::new(SelectionConfig::default(), priors)
        .with_embedder(Arc::new(TfIdfFallback::new(256)));
    let tags = ["Rust", "Go", "Kubernetes", "PostgreSQL", "Terraform"];
    let pool: Vec<AchievementRecord> = (0..200)
        .map(|i| {
            AchievementRecord::new(format!("ach-{i:03}"), format!("company-{}", i % 7))
                .with_tags(&[tags[i % tags.len()]])
                .with_summary(format!("Shipped {} project number {i}", tags[i % tags.len()]))
                .with_requirements(&["scale the platform"])
        })
        .collect();
    let context = SelectionContext::new("Scale the platform with Rust and Kubernetes")
        .with_attributes(&["Rust", "Kubernetes"]);
    let overrides = BTreeSet::new();

    c.bench_function("select_200_records", |b| {
        b.iter(|| selector.select(&context, &pool, &overrides))
    });
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
