/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// How a token's text was written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Plain word, no quotes or escapes.
    Word,
    /// Word containing quoted or backslash-escaped characters.
    ///
    /// `prefix_len` is the byte length of `text` produced before the
    /// first quote or escape; only that prefix may name a parameter.
    Quoted { prefix_len: usize },
}

/// A single argument token with quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// The leading part of `text` written without quotes or escapes.
    #[must_use]
    pub fn unquoted_prefix(&self) -> &str {
        match self.kind {
            TokenKind::Word => &self.text,
            TokenKind::Quoted { prefix_len } => &self.text[..prefix_len],
        }
    }
}

/// A tokenized command line: keyword plus raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub keyword: String,
    pub keyword_span: Span,
    pub args: Vec<Token>,
}
