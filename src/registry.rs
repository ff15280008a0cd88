//! Keyword registry: schema, preamble flag and constructor per directive.

use crate::binder::{Bound, Schema};
use crate::command::{
    AsCommand, Command, CommandKind, CopyCommand, ExecCommand, FromCommand, OutputCommand,
    WorkdirCommand,
};
use crate::parser::ParseErrorKind;

/// Builds a typed command from bound parameters.
pub type Constructor = fn(&Bound) -> Result<Command, ParseErrorKind>;

/// One registered directive.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub kind: CommandKind,
    pub schema: Schema,
    /// Preamble directives keep only their last occurrence.
    pub preamble: bool,
    pub build: Constructor,
}

impl Entry {
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }
}

static ENTRIES: [Entry; 7] = [
    Entry {
        kind: CommandKind::From,
        schema: Schema::new("hosts").optional().named(&["port"]),
        preamble: true,
        build: build_from,
    },
    Entry {
        kind: CommandKind::Workdir,
        schema: Schema::new("path"),
        preamble: true,
        build: build_workdir,
    },
    Entry {
        kind: CommandKind::Output,
        schema: Schema::new("path"),
        preamble: true,
        build: build_output,
    },
    Entry {
        kind: CommandKind::As,
        schema: Schema::new("userid").named(&["groupid"]),
        preamble: true,
        build: build_as,
    },
    Entry {
        kind: CommandKind::Copy,
        schema: Schema::new("paths"),
        preamble: false,
        build: build_copy,
    },
    Entry {
        kind: CommandKind::Run,
        schema: Schema::new("cmd").named(&["shell", "echo"]),
        preamble: false,
        build: build_run,
    },
    Entry {
        kind: CommandKind::Capture,
        schema: Schema::new("cmd").named(&["shell", "echo"]),
        preamble: false,
        build: build_capture,
    },
];

/// All registered directives in registry order.
#[must_use]
pub fn entries() -> &'static [Entry] {
    &ENTRIES
}

/// Find the directive registered for `keyword` (case-sensitive).
#[must_use]
pub fn lookup(keyword: &str) -> Option<&'static Entry> {
    ENTRIES.iter().find(|e| e.keyword() == keyword)
}

fn build_from(bound: &Bound) -> Result<Command, ParseErrorKind> {
    FromCommand::from_bound(bound).map(Command::From)
}

fn build_workdir(bound: &Bound) -> Result<Command, ParseErrorKind> {
    WorkdirCommand::from_bound(bound).map(Command::Workdir)
}

fn build_output(bound: &Bound) -> Result<Command, ParseErrorKind> {
    OutputCommand::from_bound(bound).map(Command::Output)
}

fn build_as(bound: &Bound) -> Result<Command, ParseErrorKind> {
    AsCommand::from_bound(bound).map(Command::As)
}

fn build_copy(bound: &Bound) -> Result<Command, ParseErrorKind> {
    CopyCommand::from_bound(bound).map(Command::Copy)
}

fn build_run(bound: &Bound) -> Result<Command, ParseErrorKind> {
    ExecCommand::from_bound(CommandKind::Run, bound).map(Command::Run)
}

fn build_capture(bound: &Bound) -> Result<Command, ParseErrorKind> {
    ExecCommand::from_bound(CommandKind::Capture, bound).map(Command::Capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("WORKDIR").is_some());
        assert!(lookup("workdir").is_none());
        assert!(lookup("Workdir").is_none());
    }

    #[test]
    fn default_never_shadows_named() {
        for e in entries() {
            assert!(
                !e.schema.named.contains(&e.schema.default),
                "{} declares {} twice",
                e.keyword(),
                e.schema.default
            );
        }
    }

    #[test]
    fn keywords_are_unique() {
        for (i, a) in entries().iter().enumerate() {
            for b in &entries()[i + 1..] {
                assert_ne!(a.keyword(), b.keyword());
            }
        }
    }

    #[test]
    fn workdir_is_preamble() {
        let e = lookup("WORKDIR").expect("registered");
        assert!(e.preamble);
        assert_eq!(e.schema.default, "path");
        assert!(e.schema.required);
    }

    #[test]
    fn run_is_instruction() {
        assert!(!lookup("RUN").expect("registered").preamble);
    }
}
