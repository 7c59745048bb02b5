use crate::errors::VitaeResult;
use crate::models::AchievementRecord;

/// Read-only source of achievement records, owned upstream.
pub trait IAchievementPool: Send + Sync {
    fn records(&self) -> VitaeResult<Vec<AchievementRecord>>;
}

/// In-memory pool over a fixed record list.
#[derive(Debug, Clone, Default)]
pub struct StaticPool {
    records: Vec<AchievementRecord>,
}

impl StaticPool {
    pub fn new(records: Vec<AchievementRecord>) -> Self {
        Self { records }
    }
}

impl IAchievementPool for StaticPool {
    fn records(&self) -> VitaeResult<Vec<AchievementRecord>> {
        Ok(self.records.clone())
    }
}
