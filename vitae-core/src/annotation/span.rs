use serde::{Deserialize, Serialize};

/// A span of requirement text with byte offsets `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl AnnotationSpan {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether two spans share at least one offset.
    pub fn overlaps(&self, other: &AnnotationSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
