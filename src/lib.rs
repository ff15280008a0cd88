//! Directive parser for line-oriented, Dockerfile-like build scripts.
//!
//! Each line is a keyword followed by arguments. Arguments bind to the
//! keyword's default parameter by position or to named parameters as
//! `name:value`, may be single or double quoted, and expand `${NAME}`
//! from an explicit environment.
//!
//! # Quick start
//!
//! ```
//! use buildscript_rs::{CommandKind, Env, parse};
//!
//! let env = Env::new().with("foopath", "foo/bar");
//! let script = parse("WORKDIR /tmp\nWORKDIR path:'${foopath}'\nRUN 'uname -a'", &env).unwrap();
//!
//! // Preambles keep only their last occurrence.
//! let dirs = script.preambles(CommandKind::Workdir);
//! assert_eq!(dirs.len(), 1);
//! assert_eq!(dirs[0].as_workdir().unwrap().path(), "foo/bar");
//! assert_eq!(script.instructions().len(), 1);
//! ```
//!
//! ## Format a script
//!
//! ```
//! use buildscript_rs::{format, parse_str};
//!
//! let script = parse_str("RUN   \"ls -l\"   echo:true\nWORKDIR out").unwrap();
//! assert_eq!(format(&script), "WORKDIR out\nRUN 'ls -l' echo:true\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod binder;
pub mod command;
pub mod expand;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod script;
pub mod token;

pub use binder::{Bound, Schema};
pub use command::{
    AsCommand, Command, CommandKind, CopyCommand, ExecCommand, FromCommand, OutputCommand,
    WorkdirCommand,
};
pub use expand::{Env, expand};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, tokenize_line};
pub use parser::{ParseError, ParseErrorKind, Parser, parse, parse_command};
pub use script::Script;
pub use token::{Line, Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Location of the failing line.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }

    /// The failing line as written.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Lex(e) => &e.text,
            Self::Parse(e) => &e.text,
        }
    }
}

/// Parse a script against a snapshot of the process environment.
pub fn parse_str(input: &str) -> Result<Script, Error> {
    parse(input, &Env::from_process())
}
