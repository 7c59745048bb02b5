//! Annotations: human or system judgments about spans of requirement text.
//!
//! Annotations are never deleted. Rejection and deactivation flip
//! `is_active` so the audit trail survives.

pub mod kind;
pub mod levels;
pub mod span;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use kind::AnnotationKind;
pub use levels::{AnnotationSource, AnnotationStatus, Priority, Relevance, RequirementType};
pub use span::AnnotationSpan;

use crate::errors::{VitaeError, VitaeResult};
use crate::skill::normalize_skill;

/// A relevance judgment tied to a span of requirement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub span: AnnotationSpan,
    #[serde(flatten)]
    pub kind: AnnotationKind,
    pub relevance: Relevance,
    pub requirement_type: RequirementType,
    pub priority: Priority,
    pub source: AnnotationSource,
    pub status: AnnotationStatus,
    pub is_active: bool,
    /// Achievement records this judgment applies to directly.
    #[serde(default)]
    pub linked_achievement_ids: Vec<String>,
    /// Skills this judgment names (normalized).
    #[serde(default)]
    pub linked_skills: Vec<String>,
    /// Pain points / requirements this judgment addresses.
    #[serde(default)]
    pub linked_pain_points: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes applied by [`Annotation::edit`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct AnnotationEdit {
    pub span: Option<AnnotationSpan>,
    pub kind: Option<AnnotationKind>,
    pub relevance: Option<Relevance>,
    pub requirement_type: Option<RequirementType>,
    pub priority: Option<Priority>,
}

impl Annotation {
    fn build(
        span: AnnotationSpan,
        kind: AnnotationKind,
        relevance: Relevance,
        requirement_type: RequirementType,
        priority: Priority,
        source: AnnotationSource,
        status: AnnotationStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            span,
            kind,
            relevance,
            requirement_type,
            priority,
            source,
            status,
            is_active: true,
            linked_achievement_ids: Vec::new(),
            linked_skills: Vec::new(),
            linked_pain_points: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A human-authored annotation. Starts approved.
    pub fn human(
        span: AnnotationSpan,
        kind: AnnotationKind,
        relevance: Relevance,
        requirement_type: RequirementType,
        priority: Priority,
    ) -> Self {
        Self::build(
            span,
            kind,
            relevance,
            requirement_type,
            priority,
            AnnotationSource::Human,
            AnnotationStatus::Approved,
        )
    }

    /// An annotation applied from a preset. Starts approved.
    pub fn preset(
        span: AnnotationSpan,
        kind: AnnotationKind,
        relevance: Relevance,
        requirement_type: RequirementType,
        priority: Priority,
    ) -> Self {
        Self::build(
            span,
            kind,
            relevance,
            requirement_type,
            priority,
            AnnotationSource::Preset,
            AnnotationStatus::Approved,
        )
    }

    /// A system suggestion. Starts as a draft awaiting review.
    pub fn system_suggestion(
        span: AnnotationSpan,
        kind: AnnotationKind,
        relevance: Relevance,
        requirement_type: RequirementType,
        priority: Priority,
    ) -> Self {
        Self::build(
            span,
            kind,
            relevance,
            requirement_type,
            priority,
            AnnotationSource::SystemSuggested,
            AnnotationStatus::Draft,
        )
    }

    pub fn with_achievement(mut self, achievement_id: impl Into<String>) -> Self {
        self.linked_achievement_ids.push(achievement_id.into());
        self
    }

    pub fn with_skill(mut self, skill: &str) -> Self {
        self.linked_skills.push(normalize_skill(skill));
        self
    }

    pub fn with_pain_point(mut self, pain_point: impl Into<String>) -> Self {
        self.linked_pain_points.push(pain_point.into());
        self
    }

    /// Approve a draft. Approving an approved annotation is a no-op.
    pub fn approve(&mut self) -> VitaeResult<()> {
        match self.status {
            AnnotationStatus::Approved => Ok(()),
            AnnotationStatus::Draft => {
                self.status = AnnotationStatus::Approved;
                self.touch();
                Ok(())
            }
            AnnotationStatus::Rejected => Err(self.invalid("approve")),
        }
    }

    /// Reject the annotation. Rejection also deactivates it.
    pub fn reject(&mut self) -> VitaeResult<()> {
        if self.status == AnnotationStatus::Rejected {
            return Ok(());
        }
        self.status = AnnotationStatus::Rejected;
        self.is_active = false;
        self.touch();
        Ok(())
    }

    /// Apply field edits. Inactive annotations are frozen.
    pub fn edit(&mut self, edit: AnnotationEdit) -> VitaeResult<()> {
        if !self.is_active {
            return Err(self.invalid("edit"));
        }
        if let Some(span) = edit.span {
            self.span = span;
        }
        if let Some(kind) = edit.kind {
            self.kind = kind;
        }
        if let Some(relevance) = edit.relevance {
            self.relevance = relevance;
        }
        if let Some(requirement_type) = edit.requirement_type {
            self.requirement_type = requirement_type;
        }
        if let Some(priority) = edit.priority {
            self.priority = priority;
        }
        self.touch();
        Ok(())
    }

    /// Deactivate without changing review status.
    pub fn deactivate(&mut self) {
        if self.is_active {
            self.is_active = false;
            self.touch();
        }
    }

    /// Whether this annotation names the given (normalized) skill.
    pub fn names_skill(&self, skill: &str) -> bool {
        self.linked_skills.iter().any(|s| s == skill)
    }

    fn touch(&mut self) {
        let now = Utc::now();
        // Keep updated_at strictly increasing so last-write ordering stays total.
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }

    fn invalid(&self, action: &str) -> VitaeError {
        let from = if self.is_active {
            self.status.to_string()
        } else {
            format!("{} (inactive)", self.status)
        };
        VitaeError::InvalidTransition {
            id: self.id.clone(),
            from,
            action: action.to_string(),
        }
    }
}
