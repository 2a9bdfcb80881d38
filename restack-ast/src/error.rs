use miette::Diagnostic;
use thiserror::Error;

use crate::NodeKind;

/// Result type for construction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure recorded while building a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error("{offered} cannot be applied to {target}")]
    #[diagnostic(
        code(restack::not_applicable),
        help("open the {offered} inside a construct that accepts it")
    )]
    NotApplicable { target: NodeKind, offered: String },

    #[error("no open construct to receive {offered}")]
    #[diagnostic(
        code(restack::empty_context),
        help("attributes and children must be offered inside an open construct")
    )]
    EmptyContext { offered: String },
}

impl Error {
    /// Create a not-applicable error.
    pub fn not_applicable(target: NodeKind, offered: impl Into<String>) -> Self {
        Self::NotApplicable {
            target,
            offered: offered.into(),
        }
    }

    /// Create an empty-context error.
    pub fn empty_context(offered: impl Into<String>) -> Self {
        Self::EmptyContext {
            offered: offered.into(),
        }
    }

    /// Returns true if this is a not-applicable error.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }
}
