//! Closure-based definition API over the builder stack.
//!
//! Every helper that opens a construct pushes it, runs the body against the
//! builder, then folds it into its parent:
//!
//! ```
//! use restack_ast::{BaseType, Package, define};
//!
//! let build = define(Package::new("models"), |b| {
//!     b.data("User", |b| {
//!         b.field("Name", |b| {
//!             b.ty(BaseType::String);
//!         });
//!     });
//! });
//! assert!(build.error.is_none());
//! assert_eq!(build.package.children.len(), 1);
//! ```

use log::debug;

use crate::{
    Annotation, Argument, Assignment, Attr, BaseType, Call, Case, Channel, Clause, ClauseRole,
    Comment, Condition, Data, DataType, Direction, Else, Error, For, Function, Future, If, Item,
    Literal, Loop, MemoryLayout, Method, Node, Operator, OperatorNode, Package, ResultParam,
    Return, Scalar, Stack, Stream, Switch, TypeDef, Value, Variable,
};

/// One deferred definition call, run by [`Builder::run`].
pub type Step = Box<dyn FnOnce(&mut Builder)>;

/// Box a closure as a [`Step`].
pub fn step(f: impl FnOnce(&mut Builder) + 'static) -> Step {
    Box::new(f)
}

/// Sealed result of a build.
///
/// The package holds everything that was accepted, even when the build
/// failed part way.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub package: Package,
    pub error: Option<Error>,
}

impl Build {
    pub fn into_result(self) -> crate::Result<Package> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.package),
        }
    }
}

/// Build a package from a single definition body.
pub fn define(package: Package, body: impl FnOnce(&mut Builder)) -> Build {
    let mut builder = Builder::new(package);
    body(&mut builder);
    builder.finish()
}

/// Build a package from a sequence of steps, stopping at the first failure.
pub fn describe(package: Package, steps: impl IntoIterator<Item = Step>) -> Build {
    let mut builder = Builder::new(package);
    builder.run(steps);
    builder.finish()
}

/// Definition context for one package.
#[derive(Debug)]
pub struct Builder {
    stack: Stack,
}

impl Builder {
    /// Builder whose stack is seeded with `package` as the root.
    pub fn new(package: Package) -> Self {
        let mut stack = Stack::new();
        stack.push(package.into());
        Self { stack }
    }

    /// Push `node`, describe it with `body`, then fold it into its parent.
    pub fn open(&mut self, node: impl Into<Node>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.stack.push(node.into());
        body(self);
        self.stack.release();
        self
    }

    /// Add a node that needs no body.
    pub fn leaf(&mut self, node: impl Into<Node>) -> &mut Self {
        self.stack.push(node.into());
        self.stack.release();
        self
    }

    /// Offer an item to the current construct.
    pub fn offer(&mut self, item: impl Into<Item>) -> &mut Self {
        self.stack.offer(item);
        self
    }

    fn attr(&mut self, attr: Attr) -> &mut Self {
        self.offer(attr)
    }

    /// Run steps in order until one of them fails the build.
    pub fn run(&mut self, steps: impl IntoIterator<Item = Step>) -> &mut Self {
        for (index, step) in steps.into_iter().enumerate() {
            if self.is_failed() {
                debug!("skipping steps from #{index}: build already failed");
                break;
            }
            step(self);
        }
        self
    }

    /// Construct currently being described.
    pub fn current(&self) -> Option<&Node> {
        self.stack.peek()
    }

    /// Open constructs, the root package included.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// First failure of the build, if any.
    pub fn error(&self) -> Option<&Error> {
        self.stack.error()
    }

    /// Whether the build has recorded a failure.
    pub fn is_failed(&self) -> bool {
        self.stack.is_failed()
    }

    /// Record a failure on the build. The first one wins.
    pub fn fail(&mut self, err: Error) -> &mut Self {
        self.stack.set_error(err);
        self
    }

    /// Close everything still open and hand back the package.
    pub fn finish(mut self) -> Build {
        while self.stack.depth() > 1 {
            self.stack.release();
        }
        let package = match self.stack.pop() {
            Some(Node::Package(package)) => package,
            // `new` seeds the root and nothing pops it
            _ => Package::default(),
        };
        Build {
            package,
            error: self.stack.take_error(),
        }
    }

    // Constructs with a body.

    /// Struct-like type. Fields and methods are described in `body`.
    pub fn data(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Data::new(name), body)
    }

    /// Named alias of a primitive kind; set the kind with [`kind`](Self::kind).
    pub fn type_def(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Builder),
    ) -> &mut Self {
        self.open(TypeDef::new(name), body)
    }

    /// Named type defined by the type reference given in `body`.
    pub fn data_type(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Builder),
    ) -> &mut Self {
        self.open(DataType::named(name), body)
    }

    /// Struct field. Give it one type reference and optional tags.
    pub fn field(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(crate::Field::new(name), body)
    }

    /// Parameter of the enclosing function or method.
    pub fn argument(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Builder),
    ) -> &mut Self {
        self.open(Argument::new(name), body)
    }

    /// Output of a callable, or a binding for a call's output. May be unnamed.
    pub fn result(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(ResultParam::new(name), body)
    }

    /// `var` declaration, or a short declaration when its assignment is short.
    pub fn variable(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Builder),
    ) -> &mut Self {
        self.open(Variable::new(name), body)
    }

    /// `const` declaration. Needs an assignment.
    pub fn constant(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Builder),
    ) -> &mut Self {
        self.open(Variable::constant(name), body)
    }

    /// Assignment to `target`, given one value and optionally an operator.
    pub fn assign(&mut self, target: impl Into<String>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Assignment::new(target), body)
    }

    /// `return` statement.
    pub fn returns(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Return::default(), body)
    }

    /// Method. Inside [`data`](Self::data) it attaches to that type.
    pub fn method(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Method::new(name), body)
    }

    /// Free function.
    pub fn function(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Builder),
    ) -> &mut Self {
        self.open(Function::new(name), body)
    }

    /// Call of `callee`. Expressions are arguments, results bind outputs.
    pub fn call(&mut self, callee: impl Into<String>, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Call::new(callee), body)
    }

    /// `if` statement with one condition and an optional [`else_`](Self::else_).
    pub fn if_(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(If::default(), body)
    }

    /// Else branch of the enclosing `if`.
    pub fn else_(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Else::default(), body)
    }

    /// Three-clause `for` loop.
    pub fn for_(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(For::default(), body)
    }

    /// Init clause of the enclosing `for`.
    pub fn init(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Clause::new(ClauseRole::Init), body)
    }

    /// Post clause of the enclosing `for`.
    pub fn post(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Clause::new(ClauseRole::Post), body)
    }

    /// Conditional or infinite loop.
    pub fn loop_(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Loop::default(), body)
    }

    /// `switch` with an optional subject expression.
    pub fn switch(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Switch::default(), body)
    }

    /// Switch arm. Without values or conditions it is the default arm.
    pub fn case(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Case::default(), body)
    }

    /// Boolean or arithmetic expression: left operand, operator, right operand.
    pub fn condition(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Condition::default(), body)
    }

    /// Multi-line comment; add lines with [`text`](Self::text).
    pub fn comment(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Comment::default(), body)
    }

    /// Channel type of the element given in `body`.
    pub fn channel(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Channel::default(), body)
    }

    /// Deferred single value of the element type.
    pub fn future(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Future::default(), body)
    }

    /// Receive-only sequence of the element type.
    pub fn stream(&mut self, body: impl FnOnce(&mut Builder)) -> &mut Self {
        self.open(Stream::default(), body)
    }

    // Leaves.

    /// Reference to a primitive kind at native width.
    pub fn ty(&mut self, kind: BaseType) -> &mut Self {
        self.leaf(TypeDef::primitive(kind))
    }

    /// Reference to a primitive kind at a fixed width.
    pub fn sized(&mut self, kind: BaseType, memory: MemoryLayout) -> &mut Self {
        self.leaf(TypeDef {
            memory,
            ..TypeDef::primitive(kind)
        })
    }

    /// Reference to a declared type by name.
    pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
        self.leaf(DataType::named(name))
    }

    /// Raw source text, emitted verbatim.
    pub fn literal(&mut self, text: impl Into<String>) -> &mut Self {
        self.leaf(Literal::new(text))
    }

    /// Constant scalar spelled in target syntax.
    pub fn value(&mut self, value: impl Into<Scalar>) -> &mut Self {
        self.leaf(Value::new(value))
    }

    /// Operator for the enclosing condition or assignment.
    pub fn operator(&mut self, operator: Operator) -> &mut Self {
        self.leaf(OperatorNode::new(operator))
    }

    /// Annotation. On a field it becomes a struct tag.
    pub fn annotation(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        self.leaf(Annotation::new(name, content))
    }

    /// Single-line comment.
    pub fn comment_line(&mut self, text: impl Into<String>) -> &mut Self {
        self.leaf(Comment::new([text.into()]))
    }

    // Attributes of the current construct.

    /// Rename the current construct.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.attr(Attr::Name(name.into()))
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.attr(Attr::Description(description.into()))
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.attr(Attr::Version(version.into()))
    }

    /// Primitive kind of the current type definition.
    pub fn kind(&mut self, kind: BaseType) -> &mut Self {
        self.attr(Attr::Kind(kind))
    }

    /// Width of the current type definition.
    pub fn memory(&mut self, memory: MemoryLayout) -> &mut Self {
        self.attr(Attr::Memory(memory))
    }

    /// Give the current method a pointer receiver.
    pub fn pointer(&mut self) -> &mut Self {
        self.attr(Attr::Pointer)
    }

    /// Receiver type of a method declared outside its data type.
    pub fn receiver(&mut self, receiver: impl Into<String>) -> &mut Self {
        self.attr(Attr::Receiver(receiver.into()))
    }

    /// Declare rather than assign (`:=`).
    pub fn short(&mut self) -> &mut Self {
        self.attr(Attr::Short)
    }

    /// Mark the current variable as a constant.
    pub fn constant_flag(&mut self) -> &mut Self {
        self.attr(Attr::Constant)
    }

    /// Make the current argument variadic.
    pub fn variadic(&mut self) -> &mut Self {
        self.attr(Attr::Variadic)
    }

    /// Restrict the current channel to one direction.
    pub fn direction(&mut self, direction: Direction) -> &mut Self {
        self.attr(Attr::Direction(direction))
    }

    /// Text of the current comment, annotation or literal.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.attr(Attr::Text(text.into()))
    }

    /// Operator of the current condition or assignment.
    pub fn set_operator(&mut self, operator: Operator) -> &mut Self {
        self.attr(Attr::Operator(operator))
    }

    /// Payload of the current value.
    pub fn set_value(&mut self, value: impl Into<Scalar>) -> &mut Self {
        self.attr(Attr::Value(value.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;

    #[test]
    fn test_open_balances_stack() {
        let mut builder = Builder::new(Package::new("models"));
        builder.data("User", |b| {
            assert_eq!(b.depth(), 2);
            b.field("Name", |b| {
                assert_eq!(b.depth(), 3);
                assert_eq!(b.current().map(Node::kind), Some(NodeKind::Field));
                b.ty(BaseType::String);
            });
        });
        assert_eq!(builder.depth(), 1);
        assert!(!builder.is_failed());
    }

    #[test]
    fn test_attrs_go_to_current() {
        let build = define(Package::new("models"), |b| {
            b.version("1.2.0").description("Generated models.");
            b.data("User", |b| {
                b.description("A registered user.");
            });
        });
        let package = build.into_result().unwrap();
        assert_eq!(package.header.version.as_deref(), Some("1.2.0"));
        assert_eq!(package.header.description, "Generated models.");
        assert_eq!(package.children[0].header().description, "A registered user.");
    }

    #[test]
    fn test_sized_leaf() {
        let build = define(Package::new("p"), |b| {
            b.type_def("Celsius", |b| {
                b.kind(BaseType::Decimal).memory(MemoryLayout::Bit32);
            });
        });
        let package = build.into_result().unwrap();
        let Node::TypeDef(ty) = &package.children[0] else {
            panic!("Expected TypeDef variant");
        };
        assert_eq!(ty.kind, BaseType::Decimal);
        assert_eq!(ty.memory, MemoryLayout::Bit32);
    }

    #[test]
    fn test_run_stops_after_failure() {
        let steps = vec![
            step(|b| {
                b.data("A", |_| {});
            }),
            step(|b| {
                b.literal("not a declaration");
            }),
            step(|b| {
                b.data("B", |_| {});
            }),
        ];
        let build = describe(Package::new("p"), steps);

        assert!(build.error.as_ref().is_some_and(Error::is_not_applicable));
        let names: Vec<_> = build.package.children.iter().map(Node::name).collect();
        assert_eq!(names, ["A"]);
    }

    #[test]
    fn test_finish_closes_open_constructs() {
        let mut builder = Builder::new(Package::new("p"));
        builder.stack.push(Function::new("main").into());
        let package = builder.finish().into_result().unwrap();
        assert_eq!(package.children.len(), 1);
    }

    #[test]
    fn test_fail_keeps_first_error() {
        let mut builder = Builder::new(Package::new("p"));
        builder.fail(Error::empty_context("first"));
        builder.fail(Error::empty_context("second"));
        assert_eq!(builder.error(), Some(&Error::empty_context("first")));
    }
}
