//! # Geometry Errors
//!
//! Error types for mesh generation. A geometry error is always fatal to the
//! mesh build that raised it; no partially stitched mesh is ever returned.

use thiserror::Error;

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Cross-sections of one build do not share a point count.
    #[error("section {section} has {found} points, expected {expected}")]
    SectionCountMismatch {
        /// Index of the first offending section.
        section: usize,
        /// Point count of section 0.
        expected: usize,
        /// Point count of the offending section.
        found: usize,
    },

    /// Not enough sections to assemble a mesh.
    #[error("need at least one section, got {count}")]
    TooFewSections { count: usize },

    /// Sections contain no points.
    #[error("sections contain no points")]
    EmptySection,

    /// An internal invariant of the element builder was broken.
    #[error("invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl GeometryError {
    /// Creates a section count mismatch error.
    pub fn mismatch(section: usize, expected: usize, found: usize) -> Self {
        Self::SectionCountMismatch {
            section,
            expected,
            found,
        }
    }

    /// Creates an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::mismatch(1, 4, 5);
        let text = err.to_string();
        assert!(text.contains("section 1"));
        assert!(text.contains("5 points"));
        assert!(text.contains("expected 4"));

        let err = GeometryError::invariant("sample count");
        assert!(err.to_string().contains("sample count"));
    }
}
