//! Accumulated parse result.

use std::collections::BTreeMap;

use crate::command::{Command, CommandKind, WorkdirCommand};

/// Parsed script: ordered instructions plus one slot per preamble kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    instructions: Vec<Command>,
    preambles: BTreeMap<CommandKind, Command>,
}

impl Script {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File a constructed command.
    ///
    /// Preamble commands replace any earlier command of the same kind
    /// and the replaced command is returned. Instructions are appended.
    pub(crate) fn push(&mut self, command: Command, preamble: bool) -> Option<Command> {
        if preamble {
            self.preambles.insert(command.kind(), command)
        } else {
            self.instructions.push(command);
            None
        }
    }

    /// Instruction commands in script order.
    #[must_use]
    pub fn instructions(&self) -> &[Command] {
        &self.instructions
    }

    /// Current preamble of `kind` as a list of length 0 or 1.
    #[must_use]
    pub fn preambles(&self, kind: CommandKind) -> &[Command] {
        self.preambles
            .get(&kind)
            .map(std::slice::from_ref)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn preamble(&self, kind: CommandKind) -> Option<&Command> {
        self.preambles.get(&kind)
    }

    /// All preambles, ordered by kind.
    pub fn all_preambles(&self) -> impl Iterator<Item = &Command> {
        self.preambles.values()
    }

    #[must_use]
    pub fn workdir(&self) -> Option<&WorkdirCommand> {
        self.preamble(CommandKind::Workdir)
            .and_then(Command::as_workdir)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty() && self.preambles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::bind;
    use crate::expand::Env;
    use crate::registry;
    use crate::token::{Span, Token, TokenKind};

    fn command(keyword: &str, value: &str) -> (Command, bool) {
        let entry = registry::lookup(keyword).expect("registered");
        let span = Span { line: 1, column: 1 };
        let token = Token {
            kind: TokenKind::Quoted { prefix_len: 0 },
            text: value.to_string(),
            span,
        };
        let bound = bind(keyword, span, &entry.schema, &[token], &Env::new()).expect("bind");
        ((entry.build)(&bound).expect("build"), entry.preamble)
    }

    #[test]
    fn preamble_last_write_wins() {
        let mut script = Script::new();
        let (first, preamble) = command("WORKDIR", "a");
        assert!(script.push(first.clone(), preamble).is_none());
        let (second, preamble) = command("WORKDIR", "b");
        assert_eq!(script.push(second, preamble), Some(first));

        let dirs = script.preambles(CommandKind::Workdir);
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].as_workdir().map(WorkdirCommand::path), Some("b"));
    }

    #[test]
    fn instructions_keep_order() {
        let mut script = Script::new();
        for cmd in ["one", "two", "three"] {
            let (c, preamble) = command("RUN", cmd);
            script.push(c, preamble);
        }
        let cmds: Vec<_> = script
            .instructions()
            .iter()
            .filter_map(Command::as_exec)
            .map(|e| e.cmd())
            .collect();
        assert_eq!(cmds, ["one", "two", "three"]);
        assert!(script.preambles(CommandKind::Workdir).is_empty());
    }

    #[test]
    fn missing_preamble_is_empty_list() {
        let script = Script::new();
        assert!(script.preambles(CommandKind::Output).is_empty());
        assert!(script.workdir().is_none());
        assert!(script.is_empty());
    }
}
