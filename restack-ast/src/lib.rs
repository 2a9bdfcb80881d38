//! Stack-based construction of source-code trees.
//!
//! A tree is described by nesting definition calls on a [`Builder`]. Each call
//! opens a construct, describes it, and folds it into the construct that was
//! open before it. The result is a [`Package`] that renderers walk to emit
//! source text.
//!
//! # Module Organization
//!
//! - [`node`] - The closed node catalog and its aggregation rules
//! - [`stack`] - The builder stack and its sticky error
//! - [`define`] - The closure-based definition API

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod define;
mod error;
mod kinds;
pub mod node;
mod serde_helpers;
pub mod stack;

pub use define::{Build, Builder, Step, define, describe, step};
pub use error::{Error, Result};
pub use kinds::{Arity, BaseType, Direction, MemoryLayout, Operator, Scalar};
pub use node::{
    Annotation, Argument, Assignment, Attr, Call, Case, Channel, Clause, ClauseRole, Comment,
    Condition, Construct, Data, DataType, Else, Field, For, Function, Future, Header, If, Item,
    Literal, Loop, Method, Node, NodeKind, OperatorNode, Package, Return, ResultParam, Stream,
    Switch, TypeDef, Value, Variable,
};
pub use stack::Stack;
