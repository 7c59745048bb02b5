//! Per-subject outcome statistics.

use serde::{Deserialize, Serialize};
use vitae_core::models::{EffectivenessRecord, Outcome};

/// Outcome counts and derived rates for one subject (or for all of them).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeStats {
    pub total: u64,
    pub accepted: u64,
    pub edited: u64,
    pub soft_deleted: u64,
    pub hard_deleted: u64,
    /// Interviews and offers.
    pub successes: u64,
    /// `accepted / (accepted + edited + soft_deleted + hard_deleted)`.
    pub acceptance_rate: Option<f64>,
    /// Pearson correlation between annotation density and success, over
    /// records that carry a density.
    pub density_success_correlation: Option<f64>,
}

impl OutcomeStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EffectivenessRecord>) -> Self {
        let mut stats = Self::default();
        let mut densities = Vec::new();
        let mut success = Vec::new();

        for record in records {
            stats.total += 1;
            match record.outcome {
                Outcome::Accepted => stats.accepted += 1,
                Outcome::Edited => stats.edited += 1,
                Outcome::SoftDeleted => stats.soft_deleted += 1,
                Outcome::HardDeleted => stats.hard_deleted += 1,
                Outcome::Interview | Outcome::Offer => stats.successes += 1,
            }
            if let Some(density) = record.annotation_density {
                densities.push(density);
                success.push(if record.outcome.is_success() { 1.0 } else { 0.0 });
            }
        }

        let feedback = stats.accepted + stats.edited + stats.soft_deleted + stats.hard_deleted;
        if feedback > 0 {
            stats.acceptance_rate = Some(stats.accepted as f64 / feedback as f64);
        }
        stats.density_success_correlation = pearson(&densities, &success);
        stats
    }

    pub fn deletions(&self) -> u64 {
        self.soft_deleted + self.hard_deleted
    }
}

/// Sample Pearson correlation. `None` for fewer than two points, unequal
/// lengths, or zero variance on either side.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
