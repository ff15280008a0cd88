use std::fmt;

use crate::token::{Line, Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Line contains no keyword.
    EmptyLine,
    /// Opening quote without a matching closing quote.
    UnterminatedQuote { quote: char },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLine => write!(f, "empty command line"),
            Self::UnterminatedQuote { quote } => {
                write!(f, "unterminated {quote} quote")
            }
        }
    }
}

/// Error produced while tokenizing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// The offending line as written.
    pub text: String,
}

/// Tokenize one command line into its keyword and raw arguments.
///
/// `line` is the 1-based source line number used for spans. Leading
/// and trailing whitespace is ignored.
///
/// # Errors
///
/// Returns `LexError` when the line is blank or a quote is left open.
pub fn tokenize_line(input: &str, line: usize) -> Result<Line, LexError> {
    Lexer::new(input, line).tokenize()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, line: usize) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            line,
        }
    }

    fn tokenize(mut self) -> Result<Line, LexError> {
        self.skip_whitespace();
        let keyword_span = self.span();
        let keyword = self.read_keyword();
        if keyword.is_empty() {
            return Err(self.error(LexErrorKind::EmptyLine, keyword_span));
        }

        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            args.push(self.read_token()?);
        }

        Ok(Line {
            keyword,
            keyword_span,
            args,
        })
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.pos + 1,
        }
    }

    fn error(&self, kind: LexErrorKind, span: Span) -> LexError {
        LexError {
            kind,
            span,
            text: self.source.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_keyword(&mut self) -> String {
        let mut keyword = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                break;
            }
            keyword.push(ch);
            self.advance();
        }
        keyword
    }

    fn read_token(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let mut text = String::new();
        let mut prefix_len = None;

        while let Some(ch) = self.peek() {
            match ch {
                c if c.is_whitespace() => break,
                '\'' | '"' => {
                    prefix_len = prefix_len.or(Some(text.len()));
                    self.read_quoted(ch, &mut text)?;
                }
                '\\' => {
                    prefix_len = prefix_len.or(Some(text.len()));
                    self.advance();
                    match self.peek() {
                        Some(escaped) => {
                            text.push(escaped);
                            self.advance();
                        }
                        None => text.push('\\'),
                    }
                }
                _ => {
                    text.push(ch);
                    self.advance();
                }
            }
        }

        let kind = prefix_len.map_or(TokenKind::Word, |prefix_len| TokenKind::Quoted {
            prefix_len,
        });
        Ok(Token { kind, text, span })
    }

    /// Append the body of a quoted segment to `text`.
    ///
    /// Single quotes are fully literal; double quotes honour `\"`
    /// and `\\`.
    fn read_quoted(&mut self, quote: char, text: &mut String) -> Result<(), LexError> {
        let start = self.span();
        self.advance(); // skip opening quote

        loop {
            match self.peek() {
                None => {
                    return Err(self.error(LexErrorKind::UnterminatedQuote { quote }, start));
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(());
                }
                Some('\\') if quote == '"' => {
                    self.advance();
                    match self.peek() {
                        Some(c @ ('"' | '\\')) => {
                            text.push(c);
                            self.advance();
                        }
                        _ => text.push('\\'),
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<&str> {
        line.args.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn keyword_and_args() {
        let line = tokenize_line("WORKDIR foo/bar", 1).expect("should tokenize");
        assert_eq!(line.keyword, "WORKDIR");
        assert_eq!(texts(&line), ["foo/bar"]);
        assert_eq!(line.args[0].kind, TokenKind::Word);
    }

    #[test]
    fn keyword_only() {
        let line = tokenize_line("WORKDIR", 1).expect("should tokenize");
        assert!(line.args.is_empty());
    }

    #[test]
    fn single_quotes_keep_whitespace() {
        let line = tokenize_line("WORKDIR 'a b  c'", 1).expect("should tokenize");
        assert_eq!(texts(&line), ["a b  c"]);
        assert_eq!(line.args[0].kind, TokenKind::Quoted { prefix_len: 0 });
    }

    #[test]
    fn double_quote_escapes() {
        let line = tokenize_line(r#"RUN "say \"hi\" \\ \n""#, 1).expect("should tokenize");
        assert_eq!(texts(&line), [r#"say "hi" \ \n"#]);
    }

    #[test]
    fn single_quotes_are_literal() {
        let line = tokenize_line(r"RUN 'a\b'", 1).expect("should tokenize");
        assert_eq!(texts(&line), [r"a\b"]);
    }

    #[test]
    fn named_with_quoted_value() {
        let line = tokenize_line("WORKDIR path:'foo bar'", 1).expect("should tokenize");
        assert_eq!(texts(&line), ["path:foo bar"]);
        assert_eq!(line.args[0].unquoted_prefix(), "path:");
    }

    #[test]
    fn backslash_escapes_space() {
        let line = tokenize_line(r"WORKDIR a\ b\ c", 1).expect("should tokenize");
        assert_eq!(texts(&line), ["a b c"]);
        assert_eq!(line.args[0].unquoted_prefix(), "a");
    }

    #[test]
    fn trailing_backslash_is_literal() {
        let line = tokenize_line(r"COPY dir\", 1).expect("should tokenize");
        assert_eq!(texts(&line), [r"dir\"]);
    }

    #[test]
    fn unterminated_quote() {
        let err = tokenize_line("WORKDIR 'foo", 3).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedQuote { quote: '\'' });
        assert_eq!(err.span, Span { line: 3, column: 9 });
        assert_eq!(err.text, "WORKDIR 'foo");
    }

    #[test]
    fn mismatched_quotes_are_unterminated() {
        let err = tokenize_line("WORKDIR \"foo'", 1).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedQuote { quote: '"' });
    }

    #[test]
    fn blank_line() {
        let err = tokenize_line("   ", 1).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::EmptyLine);
    }

    #[test]
    fn span_tracking() {
        let line = tokenize_line("  COPY a  bb", 7).expect("should tokenize");
        assert_eq!(line.keyword_span, Span { line: 7, column: 3 });
        assert_eq!(line.args[0].span.column, 8);
        assert_eq!(line.args[1].span.column, 11);
    }

    #[test]
    fn multibyte_text() {
        let line = tokenize_line("WORKDIR 'dossier é'", 1).expect("should tokenize");
        assert_eq!(texts(&line), ["dossier é"]);
    }
}
