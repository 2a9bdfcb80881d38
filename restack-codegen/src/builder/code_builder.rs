//! Indentation-aware text buffer.

use super::Indent;

/// Builds indented code line by line behind a `&mut` borrow.
///
/// # Example
///
/// ```
/// use restack_codegen::builder::{CodeBuilder, Indent};
///
/// let mut code = CodeBuilder::new(Indent::GO);
/// code.push_line("func main() {")
///     .push_indent()
///     .push_line("println(\"hello\")")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(code.build(), "func main() {\n\tprintln(\"hello\")\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Add a line at the current indentation. An empty line gets no indent.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.indent.write(&mut self.buffer, self.indent_level);
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Step out one level. Saturates at the left margin.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a comment line per line of `text`, each behind `prefix`.
    pub fn push_comment(&mut self, prefix: &str, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.is_empty() {
                self.push_line(prefix);
            } else {
                self.push_line(&format!("{prefix} {line}"));
            }
        }
        self
    }

    /// Whether the buffer is empty or ends with an empty line.
    pub fn ends_with_blank(&self) -> bool {
        self.buffer.is_empty() || self.buffer.ends_with("\n\n")
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}
