//! The emission interface renderers write to.

use log::trace;

use crate::{
    ImportCollector, Line, Literal, Token,
    builder::{CodeBuilder, Indent},
};

/// Character-level sink for a renderer.
///
/// Renderers describe structure (lines, blocks, imports); the backend owns
/// indentation, spacing, literal spelling and import layout.
pub trait Backend {
    /// Begin a file for `package`, preceded by `header` comment lines.
    fn start_file(&mut self, package: &str, header: &[String]);

    /// Require an import. Duplicates are merged.
    fn import(&mut self, path: &str);

    /// Comment at the current indentation, one comment line per text line.
    fn comment(&mut self, text: &str);

    fn line(&mut self, line: Line);

    fn blank(&mut self);

    /// Emit `header` followed by a block opener and indent.
    fn open_block(&mut self, header: Line);

    /// Close the current block and open a new one on the same line.
    fn continue_block(&mut self, header: Line);

    /// Dedent and close the current block.
    fn close_block(&mut self);

    fn indent(&mut self);

    fn dedent(&mut self);
}

/// Spelling rules of a target language.
pub trait Syntax {
    /// Prefix of a line comment.
    fn comment_prefix(&self) -> &'static str {
        "//"
    }

    fn block_open(&self) -> &'static str {
        "{"
    }

    fn block_close(&self) -> &'static str {
        "}"
    }

    /// Spell a literal constant.
    fn literal(&self, literal: &Literal) -> String;

    /// Everything that precedes the body: header comments, package clause
    /// and imports.
    fn prelude(&self, package: &str, header: &[String], imports: &ImportCollector) -> String;
}

/// [`Backend`] producing source text through a [`Syntax`].
#[derive(Debug, Clone)]
pub struct SourceWriter<S> {
    syntax: S,
    package: String,
    header: Vec<String>,
    imports: ImportCollector,
    code: CodeBuilder,
}

impl<S: Syntax> SourceWriter<S> {
    pub fn new(syntax: S, indent: Indent) -> Self {
        Self {
            syntax,
            package: String::new(),
            header: Vec::new(),
            imports: ImportCollector::new(),
            code: CodeBuilder::new(indent),
        }
    }

    /// Spell a line with this writer's syntax.
    pub fn render_line(&self, line: &Line) -> String {
        let mut out = String::new();
        for token in line.tokens() {
            match token {
                Token::Keyword(s)
                | Token::Ident(s)
                | Token::Operator(s)
                | Token::Punct(s)
                | Token::Raw(s) => out.push_str(s),
                Token::Literal(literal) => out.push_str(&self.syntax.literal(literal)),
                Token::Space => out.push(' '),
            }
        }
        out
    }

    pub fn imports(&self) -> &ImportCollector {
        &self.imports
    }

    /// Assemble the file.
    pub fn finish(self) -> String {
        let mut out = self
            .syntax
            .prelude(&self.package, &self.header, &self.imports);
        let body = self.code.build();
        if !body.is_empty() {
            out.push('\n');
            out.push_str(&body);
        }
        out
    }
}

impl<S: Syntax> Backend for SourceWriter<S> {
    fn start_file(&mut self, package: &str, header: &[String]) {
        trace!("start file for package {package}");
        self.package = package.to_string();
        self.header = header.to_vec();
    }

    fn import(&mut self, path: &str) {
        self.imports.add(path);
    }

    fn comment(&mut self, text: &str) {
        let prefix = self.syntax.comment_prefix();
        self.code.push_comment(prefix, text);
    }

    fn line(&mut self, line: Line) {
        let text = self.render_line(&line);
        self.code.push_line(&text);
    }

    fn blank(&mut self) {
        // never stack blank lines or open the body with one
        if !self.code.ends_with_blank() {
            self.code.push_blank();
        }
    }

    fn open_block(&mut self, header: Line) {
        let text = self.render_line(&header);
        let open = self.syntax.block_open();
        self.code.push_line(&format!("{text} {open}")).push_indent();
    }

    fn continue_block(&mut self, header: Line) {
        let text = self.render_line(&header);
        let open = self.syntax.block_open();
        let close = self.syntax.block_close();
        self.code
            .push_dedent()
            .push_line(&format!("{close} {text} {open}"))
            .push_indent();
    }

    fn close_block(&mut self) {
        let close = self.syntax.block_close();
        self.code.push_dedent().push_line(close);
    }

    fn indent(&mut self) {
        self.code.push_indent();
    }

    fn dedent(&mut self) {
        self.code.push_dedent();
    }
}
