//! Error and warning types for the annotation pipeline.

use std::fmt;
use thiserror::Error;

/// A condition that stops one annotation block from producing a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `@api` without `{method}` or path, or a field tag without a name.
    #[error("{tag}: missing required {token}")]
    MissingRequiredToken { tag: String, token: &'static str },

    /// `@apiUse` names a definition that no `@apiDefine` block declared.
    #[error("@apiUse: no such @apiDefine `{name}`")]
    UndefinedReference { name: String },

    /// `@apiUse` re-enters a definition that is already being expanded.
    #[error("@apiUse: `{name}` expands into itself")]
    RecursiveReference { name: String },

    /// Any of the above, located in the corpus.
    #[error("{source_id}: block {block}: {error}")]
    Block {
        source_id: String,
        block: usize,
        #[source]
        error: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn missing(tag: &str, token: &'static str) -> Self {
        ParseError::MissingRequiredToken {
            tag: tag.to_string(),
            token,
        }
    }

    pub(crate) fn located(self, source_id: &str, block: usize) -> Self {
        ParseError::Block {
            source_id: source_id.to_string(),
            block,
            error: Box::new(self),
        }
    }

    /// The underlying condition, without location.
    pub fn kind(&self) -> &ParseError {
        match self {
            ParseError::Block { error, .. } => error.kind(),
            other => other,
        }
    }
}

/// Kind of a non-fatal condition recorded in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    UndefinedReference(String),
    RecursiveReference(String),
    /// `@apiUse` with no definition name.
    MissingReferenceName,
}

/// A recovered condition, reported alongside the extracted resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub source_id: String,
    /// 1-based index of the block within its source
    pub block: usize,
    pub kind: WarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UndefinedReference(name) => write!(
                f,
                "{}: block {}: @apiUse `{}` is not defined, expanded as empty",
                self.source_id, self.block, name
            ),
            WarningKind::RecursiveReference(name) => write!(
                f,
                "{}: block {}: @apiUse `{}` expands into itself, expanded as empty",
                self.source_id, self.block, name
            ),
            WarningKind::MissingReferenceName => write!(
                f,
                "{}: block {}: @apiUse without a definition name, ignored",
                self.source_id, self.block
            ),
        }
    }
}
