//! Declaration nodes: the package root, types, members and callables.

use serde::{Deserialize, Serialize};

use super::{Attr, Construct, Header, Node, fill, header_access};
use crate::{BaseType, MemoryLayout, NodeKind};

/// Root of every tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    pub header: Header,
    /// Declarations in render order.
    pub children: Vec<Node>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Construct for Package {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        if !child.kind().is_declaration() {
            return Err(child);
        }
        self.children.push(child);
        Ok(())
    }
}

/// Alias of a primitive kind, e.g. `type Celsius float64`.
///
/// Unnamed type definitions are plain type references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    pub header: Header,
    pub kind: BaseType,
    pub memory: MemoryLayout,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }

    /// Unnamed reference to a primitive kind.
    pub fn primitive(kind: BaseType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl Construct for TypeDef {
    header_access!();

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Kind(kind) => self.kind = kind,
            Attr::Memory(memory) => self.memory = memory,
            other => return Err(other),
        }
        Ok(())
    }
}

/// Struct-like type with ordered fields and methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    pub header: Header,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl Data {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }
}

impl Construct for Data {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Field(field) => self.fields.push(field),
            Node::Method(method) => self.methods.push(method),
            other => return Err(other),
        }
        Ok(())
    }
}

/// Named type defined in terms of another type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataType {
    pub header: Header,
    /// Underlying type. A data type without one is a reference by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Node>>,
}

impl DataType {
    /// Reference to an existing type by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            target: None,
        }
    }
}

impl Construct for DataType {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_type(&mut self.target, child)
    }
}

/// Put a type reference into an empty slot.
fn accept_type(slot: &mut Option<Box<Node>>, child: Node) -> Result<(), Node> {
    if !child.kind().is_type_ref() {
        return Err(child);
    }
    fill(slot, child)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<Box<Node>>,
    /// Rendered as a struct tag.
    pub tags: Vec<super::Annotation>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }
}

impl Construct for Field {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Annotation(tag) => {
                self.tags.push(tag);
                Ok(())
            }
            other => accept_type(&mut self.ty, other),
        }
    }
}

/// Parameter of a method or function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Argument {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<Box<Node>>,
    pub variadic: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }
}

impl Construct for Argument {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_type(&mut self.ty, child)
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Variadic => {
                self.variadic = true;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Output slot of a callable, or a binding receiving a call's output.
///
/// The name is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultParam {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<Box<Node>>,
}

impl ResultParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ty: None,
        }
    }
}

impl Construct for ResultParam {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_type(&mut self.ty, child)
    }
}

/// Variable or constant declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Variable {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<Box<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign: Option<super::Assignment>,
    pub constant: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Self {
            constant: true,
            ..Self::new(name)
        }
    }
}

impl Construct for Variable {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Assignment(assign) if self.assign.is_none() => {
                self.assign = Some(assign);
                Ok(())
            }
            other => accept_type(&mut self.ty, other),
        }
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Constant => {
                self.constant = true;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Method attached to a [`Data`] type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    pub header: Header,
    pub arguments: Vec<Argument>,
    pub results: Vec<ResultParam>,
    pub body: Vec<Node>,
    /// Pointer (by-reference) receiver.
    pub pointer: bool,
    /// Receiver type when the method is declared outside its data type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }
}

impl Construct for Method {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_signature(&mut self.arguments, &mut self.results, &mut self.body, child)
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Pointer => self.pointer = true,
            Attr::Receiver(receiver) => self.receiver = Some(receiver),
            other => return Err(other),
        }
        Ok(())
    }
}

/// Free function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Function {
    pub header: Header,
    pub arguments: Vec<Argument>,
    pub results: Vec<ResultParam>,
    pub body: Vec<Node>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: Header::named(name),
            ..Self::default()
        }
    }
}

impl Construct for Function {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_signature(&mut self.arguments, &mut self.results, &mut self.body, child)
    }
}

fn accept_signature(
    arguments: &mut Vec<Argument>,
    results: &mut Vec<ResultParam>,
    body: &mut Vec<Node>,
    child: Node,
) -> Result<(), Node> {
    match child {
        Node::Argument(argument) => arguments.push(argument),
        Node::Result(result) => results.push(result),
        other if other.kind().is_statement() => body.push(other),
        other => return Err(other),
    }
    Ok(())
}

impl NodeKind {
    /// Whether this kind owns an ordered statement body.
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            Self::Method
                | Self::Function
                | Self::If
                | Self::Else
                | Self::For
                | Self::Loop
                | Self::Case
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Comment, Condition, Literal};

    #[test]
    fn test_package_accepts_declarations_in_order() {
        let mut pkg = Node::from(Package::new("models"));
        pkg.accept(Node::from(Data::new("User"))).unwrap();
        pkg.accept(Node::from(Comment::default())).unwrap();
        pkg.accept(Node::from(Function::new("New"))).unwrap();

        let Node::Package(pkg) = pkg else {
            panic!("Expected Package variant");
        };
        let kinds: Vec<_> = pkg.children.iter().map(Node::kind).collect();
        assert_eq!(kinds, [NodeKind::Data, NodeKind::Comment, NodeKind::Function]);
    }

    #[test]
    fn test_package_rejects_statements() {
        let mut pkg = Node::from(Package::new("models"));
        assert!(pkg.accept(Node::from(Literal::new("x := 1"))).is_err());
        assert!(pkg.accept(Node::from(Condition::default())).is_err());
    }

    #[test]
    fn test_type_def_attrs() {
        let mut ty = Node::from(TypeDef::new("Celsius"));
        ty.accept(Attr::Kind(BaseType::Decimal)).unwrap();
        ty.accept(Attr::Memory(MemoryLayout::Bit32)).unwrap();
        let Node::TypeDef(ty) = ty else {
            panic!("Expected TypeDef variant");
        };
        assert_eq!(ty.kind, BaseType::Decimal);
        assert_eq!(ty.memory, MemoryLayout::Bit32);
    }

    #[test]
    fn test_field_single_type_slot() {
        let mut field = Node::from(Field::new("Name"));
        field
            .accept(Node::from(TypeDef::primitive(BaseType::String)))
            .unwrap();
        let err = field
            .accept(Node::from(TypeDef::primitive(BaseType::Integer)))
            .unwrap_err();
        assert!(err.is_not_applicable());

        let Node::Field(field) = field else {
            panic!("Expected Field variant");
        };
        assert_eq!(
            field.ty.as_deref(),
            Some(&Node::from(TypeDef::primitive(BaseType::String)))
        );
    }

    #[test]
    fn test_method_routes_children() {
        let mut method = Node::from(Method::new("Save"));
        method.accept(Node::from(Argument::new("ctx"))).unwrap();
        method.accept(Node::from(ResultParam::default())).unwrap();
        method.accept(Node::from(Literal::new("panic(1)"))).unwrap();
        method.accept(Attr::Pointer).unwrap();
        assert!(method.accept(Node::from(Field::new("x"))).is_err());

        let Node::Method(method) = method else {
            panic!("Expected Method variant");
        };
        assert_eq!(method.arguments.len(), 1);
        assert_eq!(method.results.len(), 1);
        assert_eq!(method.body.len(), 1);
        assert!(method.pointer);
    }

    #[test]
    fn test_function_rejects_method_attrs() {
        let mut func = Node::from(Function::new("main"));
        assert!(func.accept(Attr::Pointer).is_err());
        assert!(func.accept(Attr::Receiver("User".into())).is_err());
    }
}
