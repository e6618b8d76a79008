use kelp_core::SourceLocation;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("Unsupported operation: {kind}{}", at(.loc))]
    UnsupportedOperation {
        kind: String,
        loc: Option<SourceLocation>,
    },

    #[error("Wrong number of arguments ({got}) passed to {operator}{}", at(.loc))]
    ArityMismatch {
        operator: String,
        got: usize,
        loc: Option<SourceLocation>,
    },

    #[error("Malformed {kind} node: {reason}{}", at(.loc))]
    MalformedNode {
        kind: String,
        reason: String,
        loc: Option<SourceLocation>,
    },
}

fn at(loc: &Option<SourceLocation>) -> String {
    loc.as_ref()
        .map(|loc| format!(" at {}", loc))
        .unwrap_or_default()
}

impl LowerError {
    pub fn unsupported(kind: impl Into<String>, loc: Option<&SourceLocation>) -> Self {
        LowerError::UnsupportedOperation {
            kind: kind.into(),
            loc: loc.cloned(),
        }
    }

    pub fn arity(operator: impl Into<String>, got: usize, loc: Option<&SourceLocation>) -> Self {
        LowerError::ArityMismatch {
            operator: operator.into(),
            got,
            loc: loc.cloned(),
        }
    }

    pub fn malformed(
        kind: impl Into<String>,
        reason: impl Into<String>,
        loc: Option<&SourceLocation>,
    ) -> Self {
        LowerError::MalformedNode {
            kind: kind.into(),
            reason: reason.into(),
            loc: loc.cloned(),
        }
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            LowerError::UnsupportedOperation { loc, .. }
            | LowerError::ArityMismatch { loc, .. }
            | LowerError::MalformedNode { loc, .. } => loc.as_ref(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LowerError>;
