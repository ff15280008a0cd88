//! Typed directives produced by the registry constructors.

use std::fmt;

use crate::binder::Bound;
use crate::parser::ParseErrorKind;

/// Directive kind, one per registered keyword.
///
/// Ordering follows registry order and is the order preambles are
/// formatted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandKind {
    From,
    Workdir,
    Output,
    As,
    Copy,
    Run,
    Capture,
}

impl CommandKind {
    /// Keyword as written in scripts.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::From => "FROM",
            Self::Workdir => "WORKDIR",
            Self::Output => "OUTPUT",
            Self::As => "AS",
            Self::Copy => "COPY",
            Self::Run => "RUN",
            Self::Capture => "CAPTURE",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `FROM hosts [port:N]`: machines the script runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromCommand {
    hosts: Vec<String>,
    port: u16,
}

/// `WORKDIR path`: directory collected files are staged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdirCommand {
    path: String,
}

/// `OUTPUT path`: archive produced by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCommand {
    path: String,
}

/// `AS userid [groupid:G]`: identity commands run under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsCommand {
    userid: String,
    groupid: Option<String>,
}

/// `COPY paths`: files to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    paths: Vec<String>,
}

/// Shared shape of `RUN` and `CAPTURE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCommand {
    cmd: String,
    shell: Option<String>,
    echo: bool,
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    From(FromCommand),
    Workdir(WorkdirCommand),
    Output(OutputCommand),
    As(AsCommand),
    Copy(CopyCommand),
    /// Run a command, discarding its output.
    Run(ExecCommand),
    /// Run a command and keep its output.
    Capture(ExecCommand),
}

impl Command {
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::From(_) => CommandKind::From,
            Self::Workdir(_) => CommandKind::Workdir,
            Self::Output(_) => CommandKind::Output,
            Self::As(_) => CommandKind::As,
            Self::Copy(_) => CommandKind::Copy,
            Self::Run(_) => CommandKind::Run,
            Self::Capture(_) => CommandKind::Capture,
        }
    }

    #[must_use]
    pub const fn as_from(&self) -> Option<&FromCommand> {
        match self {
            Self::From(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_workdir(&self) -> Option<&WorkdirCommand> {
        match self {
            Self::Workdir(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_output(&self) -> Option<&OutputCommand> {
        match self {
            Self::Output(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_as(&self) -> Option<&AsCommand> {
        match self {
            Self::As(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_copy(&self) -> Option<&CopyCommand> {
        match self {
            Self::Copy(c) => Some(c),
            _ => None,
        }
    }

    /// The `RUN` or `CAPTURE` payload.
    #[must_use]
    pub const fn as_exec(&self) -> Option<&ExecCommand> {
        match self {
            Self::Run(c) | Self::Capture(c) => Some(c),
            _ => None,
        }
    }
}

pub const DEFAULT_HOST: &str = "local";
pub const DEFAULT_PORT: u16 = 22;

impl FromCommand {
    pub(crate) fn from_bound(bound: &Bound) -> Result<Self, ParseErrorKind> {
        let hosts = match bound.get("hosts") {
            Some(raw) => non_empty_list(CommandKind::From, "hosts", raw)?,
            None => vec![DEFAULT_HOST.to_string()],
        };
        let port = match bound.get("port") {
            Some(raw) => raw
                .parse()
                .map_err(|_| invalid(CommandKind::From, "port", raw, "a port number"))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { hosts, port })
    }

    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl WorkdirCommand {
    pub(crate) fn from_bound(bound: &Bound) -> Result<Self, ParseErrorKind> {
        Ok(Self {
            path: non_empty(CommandKind::Workdir, "path", bound.get("path"))?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl OutputCommand {
    pub(crate) fn from_bound(bound: &Bound) -> Result<Self, ParseErrorKind> {
        Ok(Self {
            path: non_empty(CommandKind::Output, "path", bound.get("path"))?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl AsCommand {
    pub(crate) fn from_bound(bound: &Bound) -> Result<Self, ParseErrorKind> {
        Ok(Self {
            userid: non_empty(CommandKind::As, "userid", bound.get("userid"))?,
            groupid: bound.get("groupid").map(str::to_string),
        })
    }

    #[must_use]
    pub fn userid(&self) -> &str {
        &self.userid
    }

    #[must_use]
    pub fn groupid(&self) -> Option<&str> {
        self.groupid.as_deref()
    }
}

impl CopyCommand {
    pub(crate) fn from_bound(bound: &Bound) -> Result<Self, ParseErrorKind> {
        let raw = bound.get("paths").unwrap_or_default();
        Ok(Self {
            paths: non_empty_list(CommandKind::Copy, "paths", raw)?,
        })
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

impl ExecCommand {
    pub(crate) fn from_bound(kind: CommandKind, bound: &Bound) -> Result<Self, ParseErrorKind> {
        let echo = match bound.get("echo") {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => return Err(invalid(kind, "echo", other, "true or false")),
        };
        Ok(Self {
            cmd: non_empty(kind, "cmd", bound.get("cmd"))?,
            shell: bound.get("shell").map(str::to_string),
            echo,
        })
    }

    #[must_use]
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    #[must_use]
    pub fn shell(&self) -> Option<&str> {
        self.shell.as_deref()
    }

    #[must_use]
    pub const fn echo(&self) -> bool {
        self.echo
    }
}

fn invalid(kind: CommandKind, parameter: &str, value: &str, expected: &str) -> ParseErrorKind {
    ParseErrorKind::InvalidValue {
        keyword: kind.keyword().to_string(),
        parameter: parameter.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn non_empty(
    kind: CommandKind,
    parameter: &str,
    value: Option<&str>,
) -> Result<String, ParseErrorKind> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        other => Err(invalid(
            kind,
            parameter,
            other.unwrap_or_default(),
            "a non-empty value",
        )),
    }
}

/// Split a whitespace separated list, rejecting an empty one.
fn non_empty_list(
    kind: CommandKind,
    parameter: &str,
    raw: &str,
) -> Result<Vec<String>, ParseErrorKind> {
    let items: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    if items.is_empty() {
        return Err(invalid(kind, parameter, raw, "at least one entry"));
    }
    Ok(items)
}
