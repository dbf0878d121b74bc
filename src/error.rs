//! Error types for algovista.
//!
//! [`VisualError`] is a refused operation: a bounds check that failed before
//! anything mutated. It never ends the program, it becomes an alert.
//! [`AppError`] covers startup and terminal I/O.

use crate::state::alerts::AlertLevel;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// A visualizer operation that could not run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisualError {
    /// A fixed-capacity structure has no room left.
    #[error("{structure} is full!")]
    Full { structure: &'static str },

    /// Nothing to remove or inspect.
    #[error("{structure} is empty!")]
    Empty { structure: &'static str },

    #[error("Stack overflow!")]
    StackOverflow,

    #[error("Stack underflow!")]
    StackUnderflow,

    #[error("String is at maximum length!")]
    StringAtMaximum,

    #[error("String has only one character!")]
    SingleCharacter,

    #[error("String too short for substring operation!")]
    StringTooShort,

    #[error("Need at least 2 elements to sort!")]
    TooFewToSort,

    #[error("Array must be sorted for binary search!")]
    NotSorted,

    #[error("Maximum {max} nodes allowed!")]
    TooManyNodes { max: usize },

    #[error("Need at least 2 nodes to create an edge!")]
    TooFewNodes,

    #[error("Edge already exists!")]
    DuplicateEdge,

    #[error("Maximum tree depth reached ({max} levels)")]
    DepthExceeded { max: usize },

    /// A key that no operation of the current component is bound to.
    #[error("Unknown operation '{key}'")]
    UnknownOperation { key: char },
}

impl VisualError {
    /// Severity of the alert this error raises.
    ///
    /// Capacity and emptiness problems are dangers; requests that merely
    /// make no sense for the current contents are warnings.
    pub fn level(&self) -> AlertLevel {
        match self {
            Self::TooFewToSort
            | Self::NotSorted
            | Self::DuplicateEdge
            | Self::SingleCharacter
            | Self::StringTooShort
            | Self::UnknownOperation { .. } => AlertLevel::Warning,
            _ => AlertLevel::Danger,
        }
    }
}

/// Errors that stop the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown theme '{name}' (available: {available})")]
    UnknownTheme { name: String, available: String },

    #[error("unknown component '{name}' (available: {available})")]
    UnknownComponent { name: String, available: String },

    #[error("animation speed {ms} ms is outside {min}..={max} ms")]
    InvalidSpeed { ms: u64, min: u64, max: u64 },

    #[error("layout error: {0}")]
    Layout(#[from] taffy::TaffyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_alert_text() {
        assert_eq!(VisualError::Full { structure: "Array" }.to_string(), "Array is full!");
        assert_eq!(VisualError::Empty { structure: "List" }.to_string(), "List is empty!");
        assert_eq!(VisualError::TooManyNodes { max: 8 }.to_string(), "Maximum 8 nodes allowed!");
        assert_eq!(
            VisualError::DepthExceeded { max: 5 }.to_string(),
            "Maximum tree depth reached (5 levels)"
        );
    }

    #[test]
    fn test_levels() {
        assert_eq!(VisualError::StackOverflow.level(), AlertLevel::Danger);
        assert_eq!(VisualError::DuplicateEdge.level(), AlertLevel::Warning);
        assert_eq!(VisualError::NotSorted.level(), AlertLevel::Warning);
    }

    #[test]
    fn test_io_converts() {
        let err: AppError = std::io::Error::other("boom").into();
        assert!(err.to_string().contains("boom"));
    }
}
