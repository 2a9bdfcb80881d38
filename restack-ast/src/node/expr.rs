//! Expressions, type constructors and free-form nodes.

use serde::{Deserialize, Serialize};

use super::{Attr, Construct, Header, Node, fill, header_access};
use crate::{Direction, Operator, Scalar};

/// Binary (or unary) comparison: `left op right`.
///
/// Prefix operators use only the left operand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<Node>>,
}

impl Construct for Condition {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Operator(op) if self.operator.is_none() => {
                self.operator = Some(op.operator);
                Ok(())
            }
            other if other.kind().is_expression() => {
                if self.left.is_none() {
                    fill(&mut self.left, other)
                } else {
                    fill(&mut self.right, other)
                }
            }
            other => Err(other),
        }
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Operator(op) if self.operator.is_none() => {
                self.operator = Some(op);
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Standalone operator token, offered to conditions and assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorNode {
    #[serde(default)]
    pub header: Header,
    pub operator: Operator,
}

impl OperatorNode {
    pub fn new(operator: Operator) -> Self {
        Self {
            header: Header::default(),
            operator,
        }
    }
}

impl Construct for OperatorNode {
    header_access!();

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Operator(op) => {
                self.operator = op;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Line comment. Each text attribute adds one line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub header: Header,
    pub lines: Vec<String>,
}

impl Comment {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            header: Header::default(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl Construct for Comment {
    header_access!();

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Text(line) => {
                self.lines.push(line);
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Metadata marker. On a field it becomes a struct tag (`json:"name"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub header: Header,
    pub content: String,
}

impl Annotation {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            content: content.into(),
        }
    }
}

impl Construct for Annotation {
    header_access!();

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Text(content) => {
                self.content = content;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Raw source text emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Literal {
    pub header: Header,
    pub text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            header: Header::default(),
            text: text.into(),
        }
    }
}

impl Construct for Literal {
    header_access!();

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Text(text) => {
                self.text = text;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Constant scalar rendered in target-language syntax.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Value {
    pub header: Header,
    pub value: Scalar,
}

impl Value {
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            header: Header::default(),
            value: value.into(),
        }
    }
}

impl Construct for Value {
    header_access!();

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Value(value) => {
                self.value = value;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Typed channel, optionally restricted to one direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<Node>>,
    pub direction: Direction,
}

impl Construct for Channel {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_element(&mut self.element, child)
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Direction(direction) => {
                self.direction = direction;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Deferred single value of the element type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Future {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<Node>>,
}

impl Construct for Future {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_element(&mut self.element, child)
    }
}

/// Sequence of values of the element type, consumed as they arrive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stream {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<Node>>,
}

impl Construct for Stream {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_element(&mut self.element, child)
    }
}

fn accept_element(slot: &mut Option<Box<Node>>, child: Node) -> Result<(), Node> {
    if !child.kind().is_type_ref() {
        return Err(child);
    }
    fill(slot, child)
}
