use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use restack_ast::{NodeKind, Operator};
use thiserror::Error;

/// Result type for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Syntactic slot a node is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Declaration,
    Statement,
    Expression,
    Type,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Declaration => "declaration",
            Self::Statement => "statement",
            Self::Expression => "expression",
            Self::Type => "type",
        })
    }
}

/// Failure while walking a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RenderError {
    #[error("{kind} cannot be rendered in {position} position")]
    #[diagnostic(
        code(restack::go::unhandled),
        help("trees assembled through the builder never place a {kind} here")
    )]
    Unhandled { kind: NodeKind, position: Position },

    #[error("{kind} `{name}` is missing its {missing}")]
    #[diagnostic(code(restack::go::incomplete))]
    Incomplete {
        kind: NodeKind,
        name: String,
        missing: &'static str,
    },

    #[error("operator {operator:?} is not valid for {context}")]
    #[diagnostic(code(restack::go::invalid_operator))]
    InvalidOperator {
        operator: Operator,
        context: NodeKind,
    },

    #[error("tag `{tag}` on field `{field}` cannot be written as a Go struct tag")]
    #[diagnostic(
        code(restack::go::invalid_tag),
        help("tag names need letters without spaces, quotes or colons; no backquotes anywhere")
    )]
    InvalidTag { field: String, tag: String },

    #[error("receiver `{receiver}` of method `{method}` collides with a parameter")]
    #[diagnostic(
        code(restack::go::receiver_collision),
        help("rename the parameter or set `receiver` in the render config")
    )]
    ReceiverCollision { method: String, receiver: String },
}

impl RenderError {
    pub fn unhandled(kind: NodeKind, position: Position) -> Self {
        Self::Unhandled { kind, position }
    }

    pub fn incomplete(kind: NodeKind, name: &str, missing: &'static str) -> Self {
        Self::Incomplete {
            kind,
            name: name.to_string(),
            missing,
        }
    }

    pub fn invalid_operator(operator: Operator, context: NodeKind) -> Self {
        Self::InvalidOperator { operator, context }
    }

    pub fn invalid_tag(field: &str, tag: &str) -> Self {
        Self::InvalidTag {
            field: field.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn receiver_collision(method: &str, receiver: &str) -> Self {
        Self::ReceiverCollision {
            method: method.to_string(),
            receiver: receiver.to_string(),
        }
    }
}

/// Failure reading a [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to parse render config")]
    #[diagnostic(code(restack::go::config))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub(crate) fn parse(src: &str, filename: &str, source: toml::de::Error) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Self::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RenderError::unhandled(NodeKind::Field, Position::Statement).to_string(),
            "field cannot be rendered in statement position"
        );
        assert_eq!(
            RenderError::incomplete(NodeKind::Field, "Name", "type").to_string(),
            "field `Name` is missing its type"
        );
        assert_eq!(
            RenderError::invalid_operator(Operator::Equality, NodeKind::Assignment).to_string(),
            "operator Equality is not valid for assignment"
        );
        assert_eq!(
            RenderError::receiver_collision("Save", "u").to_string(),
            "receiver `u` of method `Save` collides with a parameter"
        );
    }
}
