//! Typed errors for highlight operations.
//!
//! None of these are fatal to a session. The session reports the first two
//! to the user as transient messages; the PatternSet is never left partially
//! mutated by a failed operation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    /// User-supplied text does not compile as a search expression.
    #[error("{pattern} is an invalid expression")]
    InvalidPattern {
        /// The offending text, as entered.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A capture was requested with nothing under the caret or in the selection.
    #[error("Nothing selected!")]
    EmptySelection,

    /// The configuration document could not be parsed.
    #[error("invalid highlight configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HighlightError>;
