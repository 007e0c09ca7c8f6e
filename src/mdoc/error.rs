//! Hard validation failures

use super::ast::Position;
use super::diagnostics::DiagnosticCode;
use thiserror::Error;

/// Failure that aborts the validation pass. The partially normalized tree
/// must not be used afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input that cannot be represented, e.g. a macro in the wrong parent.
    #[error("{position}: {code}: {context}")]
    Structural {
        code: DiagnosticCode,
        position: Position,
        context: String,
    },
    /// The tree handed to the validator breaks an assumption of the node model.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl ValidationError {
    pub fn structural(code: DiagnosticCode, position: Position, context: impl Into<String>) -> Self {
        ValidationError::Structural {
            code,
            position,
            context: context.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        ValidationError::Invariant(message.into())
    }
}

pub type ValidationResult = Result<(), ValidationError>;
