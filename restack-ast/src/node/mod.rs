//! The closed node catalog.
//!
//! Every construct that can appear in a generated source tree is one variant
//! of [`Node`]. Each variant decides, for every [`Item`] offered to it,
//! whether to incorporate it or reject it. Rejection hands the item back
//! untouched, so a refused offer never mutates the target.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BaseType, Direction, Error, MemoryLayout, Operator, Result, Scalar};

mod decl;
mod expr;
mod stmt;

pub use decl::{Argument, Data, DataType, Field, Function, Method, Package, ResultParam, TypeDef, Variable};
pub use expr::{
    Annotation, Channel, Comment, Condition, Future, Literal, OperatorNode, Stream, Value,
};
pub use stmt::{Assignment, Call, Case, Clause, ClauseRole, Else, For, If, Loop, Return, Switch};

/// Identity header shared by every node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub name: String,
    /// Free text, rendered as a comment.
    pub description: String,
    /// Only meaningful on a [`Package`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Header {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Apply a header attribute, handing back anything else.
    fn apply(&mut self, attr: Attr) -> std::result::Result<(), Attr> {
        match attr {
            Attr::Name(name) => self.name = name,
            Attr::Description(description) => self.description = description,
            Attr::Version(version) => self.version = Some(version),
            other => return Err(other),
        }
        Ok(())
    }
}

/// A scalar setting offered to the currently open node.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Name(String),
    Description(String),
    Version(String),
    Kind(BaseType),
    Memory(MemoryLayout),
    Operator(Operator),
    Direction(Direction),
    Text(String),
    Value(Scalar),
    /// Pointer receiver on a method.
    Pointer,
    /// Explicit receiver type for a method declared outside its data type.
    Receiver(String),
    /// Assign-to-existing becomes declare-and-assign.
    Short,
    Constant,
    Variadic,
}

impl Attr {
    /// Short label used in error messages.
    pub fn describe(&self) -> String {
        let label = match self {
            Self::Name(_) => "name",
            Self::Description(_) => "description",
            Self::Version(_) => "version",
            Self::Kind(_) => "kind",
            Self::Memory(_) => "memory",
            Self::Operator(_) => "operator",
            Self::Direction(_) => "direction",
            Self::Text(_) => "text",
            Self::Value(_) => "value",
            Self::Pointer => "pointer",
            Self::Receiver(_) => "receiver",
            Self::Short => "short",
            Self::Constant => "constant",
            Self::Variadic => "variadic",
        };
        format!("attribute `{label}`")
    }
}

/// Anything that can be offered to a node: a child or an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Node(Node),
    Attr(Attr),
}

impl Item {
    pub fn describe(&self) -> String {
        match self {
            Self::Node(node) => node.describe(),
            Self::Attr(attr) => attr.describe(),
        }
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Attr> for Item {
    fn from(attr: Attr) -> Self {
        Self::Attr(attr)
    }
}

/// Per-variant aggregation rules.
///
/// Implementations return the offered value in `Err` when they do not accept
/// it, and must not have touched `self` in that case.
pub trait Construct {
    fn header(&self) -> &Header;

    fn header_mut(&mut self) -> &mut Header;

    fn accept_child(&mut self, child: Node) -> std::result::Result<(), Node> {
        Err(child)
    }

    fn accept_attr(&mut self, attr: Attr) -> std::result::Result<(), Attr> {
        Err(attr)
    }
}

macro_rules! header_access {
    () => {
        fn header(&self) -> &$crate::Header {
            &self.header
        }

        fn header_mut(&mut self) -> &mut $crate::Header {
            &mut self.header
        }
    };
}
pub(crate) use header_access;

/// Put `child` into an empty singular slot.
pub(crate) fn fill(slot: &mut Option<Box<Node>>, child: Node) -> std::result::Result<(), Node> {
    if slot.is_some() {
        return Err(child);
    }
    *slot = Some(Box::new(child));
    Ok(())
}

macro_rules! catalog {
    ($($variant:ident($ty:ty) => $label:literal),+ $(,)?) => {
        /// A construct in the generated source.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "node", rename_all = "snake_case")]
        pub enum Node {
            $($variant($ty)),+
        }

        /// Discriminant of a [`Node`], used for dispatch and error reporting.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum NodeKind {
            $($variant),+
        }

        impl NodeKind {
            /// Every kind in the catalog.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Node {
            /// Self-descriptor used for dispatch.
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Self::$variant(_) => NodeKind::$variant),+
                }
            }

            pub fn header(&self) -> &Header {
                match self {
                    $(Self::$variant(node) => node.header()),+
                }
            }

            pub fn header_mut(&mut self) -> &mut Header {
                match self {
                    $(Self::$variant(node) => node.header_mut()),+
                }
            }

            fn accept_child(&mut self, child: Node) -> std::result::Result<(), Node> {
                match self {
                    $(Self::$variant(node) => node.accept_child(child)),+
                }
            }

            fn accept_attr(&mut self, attr: Attr) -> std::result::Result<(), Attr> {
                match self {
                    $(Self::$variant(node) => node.accept_attr(attr)),+
                }
            }
        }

        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

catalog! {
    Package(Package) => "package",
    TypeDef(TypeDef) => "type definition",
    Data(Data) => "data",
    DataType(DataType) => "data type",
    Field(Field) => "field",
    Argument(Argument) => "argument",
    Result(ResultParam) => "result",
    Variable(Variable) => "variable",
    Assignment(Assignment) => "assignment",
    Return(Return) => "return",
    Method(Method) => "method",
    Function(Function) => "function",
    Call(Call) => "call",
    If(If) => "if",
    Else(Else) => "else",
    For(For) => "for",
    Clause(Clause) => "clause",
    Loop(Loop) => "loop",
    Switch(Switch) => "switch",
    Case(Case) => "case",
    Condition(Condition) => "condition",
    Operator(OperatorNode) => "operator",
    Comment(Comment) => "comment",
    Annotation(Annotation) => "annotation",
    Literal(Literal) => "literal",
    Value(Value) => "value",
    Channel(Channel) => "channel",
    Future(Future) => "future",
    Stream(Stream) => "stream",
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    /// Kinds allowed directly under a [`Package`].
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::TypeDef
                | Self::Data
                | Self::DataType
                | Self::Function
                | Self::Method
                | Self::Variable
                | Self::Comment
                | Self::Annotation
        )
    }

    /// Kinds allowed in a body.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Variable
                | Self::Assignment
                | Self::Return
                | Self::Call
                | Self::If
                | Self::For
                | Self::Loop
                | Self::Switch
                | Self::Comment
                | Self::Literal
        )
    }

    /// Kinds that produce a value.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::Value | Self::Literal | Self::Condition | Self::Call
        )
    }

    /// Kinds usable where a type is expected.
    pub fn is_type_ref(&self) -> bool {
        matches!(
            self,
            Self::TypeDef
                | Self::Data
                | Self::DataType
                | Self::Channel
                | Self::Future
                | Self::Stream
        )
    }
}

impl Node {
    /// Offer a child or attribute to this node.
    ///
    /// Header attributes are accepted by every variant. Anything the variant
    /// does not recognize yields [`Error::NotApplicable`] and leaves the node
    /// unchanged.
    pub fn accept(&mut self, item: impl Into<Item>) -> Result<()> {
        let target = self.kind();
        match item.into() {
            Item::Attr(attr) => {
                let attr = match self.header_mut().apply(attr) {
                    Ok(()) => return Ok(()),
                    Err(attr) => attr,
                };
                self.accept_attr(attr)
                    .map_err(|attr| Error::not_applicable(target, attr.describe()))
            }
            Item::Node(child) => self
                .accept_child(child)
                .map_err(|child| Error::not_applicable(target, child.describe())),
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    /// Short label such as `field "Name"`.
    pub fn describe(&self) -> String {
        let name = self.name();
        if name.is_empty() {
            self.kind().to_string()
        } else {
            format!("{} {:?}", self.kind(), name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_attrs_accepted_everywhere() {
        let mut node = Node::from(Comment::default());
        node.accept(Attr::Name("doc".into())).unwrap();
        node.accept(Attr::Description("a comment".into())).unwrap();
        node.accept(Attr::Version("1.0.0".into())).unwrap();

        let header = node.header();
        assert_eq!(header.name, "doc");
        assert_eq!(header.description, "a comment");
        assert_eq!(header.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_describe() {
        let field = Node::from(Field::new("Name"));
        assert_eq!(field.describe(), "field \"Name\"");
        assert_eq!(Node::from(Return::default()).describe(), "return");
    }

    #[test]
    fn test_rejected_child_leaves_node_untouched() {
        let mut comment = Node::from(Comment::default());
        comment.accept(Attr::Text("first".into())).unwrap();
        let before = comment.clone();

        let err = comment.accept(Node::from(Field::new("Name"))).unwrap_err();

        assert_eq!(
            err,
            Error::not_applicable(NodeKind::Comment, "field \"Name\"")
        );
        assert_eq!(comment, before);
    }

    #[test]
    fn test_rejected_attr_names_attribute() {
        let mut field = Node::from(Field::new("Name"));
        let err = field.accept(Attr::Operator(Operator::Addition)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute `operator` cannot be applied to field"
        );
    }

    #[test]
    fn test_accept_is_total_over_catalog() {
        // Offering every kind to every kind must never panic.
        let samples: Vec<Node> = vec![
            Package::new("p").into(),
            TypeDef::default().into(),
            Data::new("D").into(),
            DataType::default().into(),
            Field::new("f").into(),
            Argument::new("a").into(),
            ResultParam::default().into(),
            Variable::new("v").into(),
            Assignment::default().into(),
            Return::default().into(),
            Method::new("m").into(),
            Function::new("f").into(),
            Call::new("c").into(),
            If::default().into(),
            Else::default().into(),
            For::default().into(),
            Clause::new(ClauseRole::Init).into(),
            Loop::default().into(),
            Switch::default().into(),
            Case::default().into(),
            Condition::default().into(),
            OperatorNode::new(Operator::Addition).into(),
            Comment::default().into(),
            Annotation::default().into(),
            Literal::new("x").into(),
            Value::new(1).into(),
            Channel::default().into(),
            Future::default().into(),
            Stream::default().into(),
        ];
        assert_eq!(samples.len(), NodeKind::ALL.len());

        for target in &samples {
            for child in &samples {
                let mut target = target.clone();
                let _ = target.accept(child.clone());
            }
        }
    }

    #[test]
    fn test_kind_classes() {
        assert!(NodeKind::Data.is_declaration());
        assert!(!NodeKind::If.is_declaration());
        assert!(NodeKind::If.is_statement());
        assert!(!NodeKind::Condition.is_statement());
        assert!(NodeKind::Condition.is_expression());
        assert!(NodeKind::Call.is_expression() && NodeKind::Call.is_statement());
        assert!(NodeKind::Channel.is_type_ref());
        assert!(!NodeKind::Field.is_type_ref());
    }
}
