use std::fmt;

use crate::Error;
use crate::binder;
use crate::command::Command;
use crate::expand::Env;
use crate::lexer::tokenize_line;
use crate::registry::{self, Entry};
use crate::script::Script;
use crate::token::Span;

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// First token is not a registered keyword.
    UnknownKeyword(String),
    /// Default parameter bound zero times while required, or more
    /// than once.
    Arity {
        keyword: String,
        parameter: String,
        found: usize,
    },
    /// Named parameter given more than once.
    DuplicateParameter { keyword: String, parameter: String },
    /// Value cannot be converted to the parameter's type.
    InvalidValue {
        keyword: String,
        parameter: String,
        value: String,
        expected: String,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyword(keyword) => {
                write!(f, "unknown keyword '{keyword}'")
            }
            Self::Arity {
                keyword,
                parameter,
                found: 0,
            } => {
                write!(f, "{keyword} requires a value for '{parameter}'")
            }
            Self::Arity {
                keyword,
                parameter,
                found,
            } => {
                write!(
                    f,
                    "{keyword} accepts one value for '{parameter}', got {found}"
                )
            }
            Self::DuplicateParameter { keyword, parameter } => {
                write!(f, "{keyword} parameter '{parameter}' given more than once")
            }
            Self::InvalidValue {
                keyword,
                parameter,
                value,
                expected,
            } => {
                write!(
                    f,
                    "{keyword} parameter '{parameter}' has invalid value \
                     '{value}', expected {expected}"
                )
            }
        }
    }
}

/// Error produced while binding or constructing a directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// The offending line as written.
    pub text: String,
}

/// Parse a whole script.
///
/// Blank lines and lines starting with `#` are skipped. Parsing stops
/// at the first failing line.
///
/// # Errors
///
/// Returns the first lexer or parser error encountered.
pub fn parse(input: &str, env: &Env) -> Result<Script, Error> {
    let mut parser = Parser::new(env);
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        parser.parse_line(line, index + 1)?;
    }
    Ok(parser.finish())
}

/// Parse one command line into a typed command and its registry entry.
///
/// # Errors
///
/// Returns `Error::Lex` for tokenizer failures and `Error::Parse` for
/// unknown keywords, arity violations, and invalid values.
pub fn parse_command(
    line: &str,
    line_no: usize,
    env: &Env,
) -> Result<(Command, &'static Entry), Error> {
    let tokens = tokenize_line(line, line_no)?;
    log::trace!("line {line_no}: {tokens:?}");

    let fail = |kind: ParseErrorKind, span: Span| ParseError {
        kind,
        span,
        text: line.to_string(),
    };

    let entry = registry::lookup(&tokens.keyword).ok_or_else(|| {
        fail(
            ParseErrorKind::UnknownKeyword(tokens.keyword.clone()),
            tokens.keyword_span,
        )
    })?;

    let bound = binder::bind(
        entry.keyword(),
        tokens.keyword_span,
        &entry.schema,
        &tokens.args,
        env,
    )
    .map_err(|(kind, span)| fail(kind, span))?;
    let command = (entry.build)(&bound).map_err(|kind| fail(kind, tokens.keyword_span))?;

    Ok((command, entry))
}

/// Line-at-a-time parser feeding a [`Script`].
///
/// Each script gets its own `Parser`; nothing is shared between parses.
pub struct Parser<'e> {
    env: &'e Env,
    script: Script,
}

impl<'e> Parser<'e> {
    #[must_use]
    pub fn new(env: &'e Env) -> Self {
        Self {
            env,
            script: Script::new(),
        }
    }

    /// Parse `line` and file the resulting command.
    ///
    /// # Errors
    ///
    /// See [`parse_command`]. The script is left unchanged on error.
    pub fn parse_line(&mut self, line: &str, line_no: usize) -> Result<(), Error> {
        let (command, entry) = parse_command(line, line_no, self.env)?;
        let kind = command.kind();

        match self.script.push(command, entry.preamble) {
            Some(previous) => {
                log::debug!("line {line_no}: {kind} replaces earlier `{previous}`");
            }
            None if entry.preamble => log::debug!("line {line_no}: {kind} set as preamble"),
            None => log::debug!("line {line_no}: {kind} appended as instruction"),
        }
        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> Script {
        self.script
    }
}
