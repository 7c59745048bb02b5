use serde::{Deserialize, Serialize};

/// What an annotation asserts, discriminated by `annotation_type`.
///
/// Unrecognised types deserialize to [`AnnotationKind::Unknown`] so
/// newer producers never break older readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "annotation_type", rename_all = "snake_case")]
pub enum AnnotationKind {
    /// The span names a skill the user has.
    SkillMatch,
    /// The span should be answered with a reframed achievement.
    Reframe {
        #[serde(default)]
        reframe_text: String,
    },
    /// The span deserves emphasis.
    Highlight,
    /// A free-form note on the span.
    Comment {
        #[serde(default)]
        text: String,
    },
    /// The span is a concern; suppresses linked achievements.
    Concern {
        #[serde(default)]
        note: String,
    },
    #[serde(other)]
    Unknown,
}

impl AnnotationKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SkillMatch => "skill_match",
            Self::Reframe { .. } => "reframe",
            Self::Highlight => "highlight",
            Self::Comment { .. } => "comment",
            Self::Concern { .. } => "concern",
            Self::Unknown => "unknown",
        }
    }
}
