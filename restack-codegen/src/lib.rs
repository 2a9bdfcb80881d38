//! Code emission backend for restack renderers.
//!
//! Renderers walk a node tree and describe what to emit through the
//! [`Backend`] trait; this crate turns those calls into text.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented text building (CodeBuilder, Indent)
//! - [`Line`], [`Token`] - Token-level description of a line
//! - [`Backend`], [`Syntax`], [`SourceWriter`] - The emission interface
//! - [`ImportCollector`] - Deduplicated imports
//! - [`GeneratedFile`] - Writing output to disk
//! - [`testing`] - Test utilities (feature-gated)

mod backend;
pub mod builder;
mod imports;
mod output;
mod token;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{Backend, SourceWriter, Syntax};
pub use builder::{CodeBuilder, Indent};
pub use imports::ImportCollector;
pub use output::{GeneratedFile, Overwrite, WriteResult};
pub use token::{Line, Literal, Token};
