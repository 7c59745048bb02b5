//! EffectivenessAggregator: append outcomes, report on demand.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitae_core::errors::VitaeResult;
use vitae_core::models::{EffectivenessRecord, EffectivenessSubject};
use vitae_core::skill::normalize_skill;
use vitae_core::traits::IEffectivenessStorage;

use crate::stats::OutcomeStats;

/// Statistics per skill, per annotation, and across everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessReport {
    pub skills: BTreeMap<String, OutcomeStats>,
    pub annotations: BTreeMap<String, OutcomeStats>,
    pub overall: OutcomeStats,
}

pub struct EffectivenessAggregator {
    storage: Arc<dyn IEffectivenessStorage>,
}

impl EffectivenessAggregator {
    pub fn new(storage: Arc<dyn IEffectivenessStorage>) -> Self {
        Self { storage }
    }

    /// Append one outcome. Skill subjects are normalized.
    pub fn record(&self, record: &EffectivenessRecord) -> VitaeResult<()> {
        let record = match &record.subject {
            EffectivenessSubject::Skill(skill) => EffectivenessRecord {
                subject: EffectivenessSubject::Skill(normalize_skill(skill)),
                ..record.clone()
            },
            EffectivenessSubject::Annotation(_) => record.clone(),
        };
        debug!(outcome = record.outcome.as_str(), "effectiveness outcome recorded");
        self.storage.append_outcome(&record)
    }

    pub fn skill_stats(&self, skill: &str) -> VitaeResult<OutcomeStats> {
        let records = self
            .storage
            .outcomes_for(&EffectivenessSubject::Skill(normalize_skill(skill)))?;
        Ok(OutcomeStats::from_records(&records))
    }

    pub fn annotation_stats(&self, annotation_id: &str) -> VitaeResult<OutcomeStats> {
        let records = self
            .storage
            .outcomes_for(&EffectivenessSubject::Annotation(annotation_id.to_string()))?;
        Ok(OutcomeStats::from_records(&records))
    }

    pub fn report(&self) -> VitaeResult<EffectivenessReport> {
        let records = self.storage.all_outcomes()?;

        let mut by_skill: BTreeMap<String, Vec<&EffectivenessRecord>> = BTreeMap::new();
        let mut by_annotation: BTreeMap<String, Vec<&EffectivenessRecord>> = BTreeMap::new();
        for record in &records {
            match &record.subject {
                EffectivenessSubject::Skill(skill) => by_skill.entry(skill.clone()),
                EffectivenessSubject::Annotation(id) => by_annotation.entry(id.clone()),
            }
            .or_default()
            .push(record);
        }

        Ok(EffectivenessReport {
            skills: summarize(by_skill),
            annotations: summarize(by_annotation),
            overall: OutcomeStats::from_records(&records),
        })
    }
}

fn summarize(groups: BTreeMap<String, Vec<&EffectivenessRecord>>) -> BTreeMap<String, OutcomeStats> {
    groups
        .into_iter()
        .map(|(key, records)| (key, OutcomeStats::from_records(records)))
        .collect()
}
