//! Serializes a parsed `Script` back into canonical directive lines.
//!
//! Preambles come first in registry order, then instructions in
//! script order. Values are quoted only when they would not survive
//! tokenization bare.

use std::fmt::{self, Write as _};

use crate::command::{Command, DEFAULT_PORT, ExecCommand};
use crate::script::Script;

/// Format a `Script` into one directive per line.
#[must_use]
pub fn format(script: &Script) -> String {
    let mut out = String::new();
    for command in script.all_preambles().chain(script.instructions()) {
        let _ = writeln!(out, "{command}");
    }
    out
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().keyword())?;
        match self {
            Self::From(c) => {
                write_default(f, &c.hosts().join(" "))?;
                if c.port() != DEFAULT_PORT {
                    write_named(f, "port", &c.port().to_string())?;
                }
                Ok(())
            }
            Self::Workdir(c) => write_default(f, c.path()),
            Self::Output(c) => write_default(f, c.path()),
            Self::As(c) => {
                write_default(f, c.userid())?;
                if let Some(groupid) = c.groupid() {
                    write_named(f, "groupid", groupid)?;
                }
                Ok(())
            }
            Self::Copy(c) => write_default(f, &c.paths().join(" ")),
            Self::Run(c) | Self::Capture(c) => write_exec(f, c),
        }
    }
}

fn write_exec(f: &mut fmt::Formatter<'_>, c: &ExecCommand) -> fmt::Result {
    write_default(f, c.cmd())?;
    if let Some(shell) = c.shell() {
        write_named(f, "shell", shell)?;
    }
    if c.echo() {
        write_named(f, "echo", "true")?;
    }
    Ok(())
}

fn write_default(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    // A bare colon could be read back as a `name:` prefix.
    write!(f, " {}", quote(value, value.contains(':')))
}

fn write_named(f: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    write!(f, " {name}:{}", quote(value, false))
}

/// Quote `value` if it is empty, contains whitespace or quoting
/// characters, or `force` is set.
fn quote(value: &str, force: bool) -> String {
    let bare = !force
        && !value.is_empty()
        && !value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if bare {
        return value.to_string();
    }

    if !value.contains('\'') {
        return format!("'{value}'");
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_value() {
        assert_eq!(quote("foo/bar", false), "foo/bar");
    }

    #[test]
    fn whitespace_uses_single_quotes() {
        assert_eq!(quote("a b", false), "'a b'");
    }

    #[test]
    fn empty_is_quoted() {
        assert_eq!(quote("", false), "''");
    }

    #[test]
    fn forced_quote() {
        assert_eq!(quote("c:/temp", true), "'c:/temp'");
    }

    #[test]
    fn single_quote_uses_double_quotes() {
        assert_eq!(quote(r#"it's "x" \ y"#, false), r#""it's \"x\" \\ y""#);
    }
}
