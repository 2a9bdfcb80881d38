//! Token-level description of one emitted line.

/// A constant to be spelled in target syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Char(char),
}

/// One piece of a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(String),
    Ident(String),
    Literal(Literal),
    Operator(String),
    Punct(String),
    /// A single separating space.
    Space,
    /// Text emitted verbatim.
    Raw(String),
}

/// Ordered tokens making up a line of code.
///
/// # Example
///
/// ```
/// use restack_codegen::Line;
///
/// let line = Line::new()
///     .keyword("return")
///     .space()
///     .ident("err");
/// assert_eq!(line.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(self, s: impl Into<String>) -> Self {
        self.token(Token::Keyword(s.into()))
    }

    pub fn ident(self, s: impl Into<String>) -> Self {
        self.token(Token::Ident(s.into()))
    }

    pub fn literal(self, literal: Literal) -> Self {
        self.token(Token::Literal(literal))
    }

    pub fn op(self, s: impl Into<String>) -> Self {
        self.token(Token::Operator(s.into()))
    }

    pub fn punct(self, s: impl Into<String>) -> Self {
        self.token(Token::Punct(s.into()))
    }

    pub fn space(self) -> Self {
        self.token(Token::Space)
    }

    pub fn raw(self, s: impl Into<String>) -> Self {
        self.token(Token::Raw(s.into()))
    }

    /// Append every token of `other`.
    pub fn append(mut self, other: Line) -> Self {
        self.tokens.extend(other.tokens);
        self
    }

    fn token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Join items with `sep` followed by a space, e.g. `a, b, c`.
    pub fn join(items: impl IntoIterator<Item = Line>, sep: &str) -> Self {
        let mut out = Line::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out = out.punct(sep).space();
            }
            out = out.append(item);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_order() {
        let line = Line::new().keyword("var").space().ident("x");
        assert_eq!(
            line.tokens(),
            [
                Token::Keyword("var".into()),
                Token::Space,
                Token::Ident("x".into())
            ]
        );
    }

    #[test]
    fn test_join() {
        let joined = Line::join(
            [Line::new().ident("a"), Line::new().ident("b")],
            ",",
        );
        assert_eq!(
            joined.tokens(),
            [
                Token::Ident("a".into()),
                Token::Punct(",".into()),
                Token::Space,
                Token::Ident("b".into())
            ]
        );
        assert!(Line::join(Vec::new(), ",").is_empty());
    }
}
