//! Text-level building blocks.
//!
//! - [`CodeBuilder`] - Indented line buffer
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
