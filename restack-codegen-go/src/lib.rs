//! Go renderer for restack code trees.
//!
//! [`GoRenderer`] walks a [`Package`](restack_ast::Package) depth first and
//! emits one gofmt-style source file through a
//! [`Backend`](restack_codegen::Backend).
//!
//! # Module Organization
//!
//! - `renderer` - Tree walk and Go statement layout
//! - `syntax` - Literal spelling and the package/import prelude
//! - `operators` - Operator tokens
//! - `type_mapper` - Primitive kinds to Go types
//! - `naming` - Reserved words and receiver names
//! - `config` - TOML render options

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod naming;
mod operators;
mod renderer;
mod syntax;
mod type_mapper;

pub use config::{GENERATED_HEADER, RenderConfig};
pub use error::{ConfigError, Position, RenderError, Result};
pub use naming::{is_reserved, safe_name};
pub use renderer::GoRenderer;
pub use syntax::{GoSyntax, quote};
pub use type_mapper::GoTypeMapper;
