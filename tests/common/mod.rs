#![allow(dead_code)]

use buildscript_rs::{CommandKind, Env, Error, Script, WorkdirCommand, format, parse};

pub fn parse_ok(input: &str, env: &Env) -> Script {
    parse(input, env).unwrap_or_else(|e| {
        panic!("parse failed: {e}\n--- input ---\n{input}")
    })
}

pub fn parse_err(input: &str) -> Error {
    match parse(input, &Env::new()) {
        Ok(script) => panic!("expected failure, got {script:?}\n--- input ---\n{input}"),
        Err(e) => e,
    }
}

/// The single WORKDIR preamble's path; panics unless exactly one exists.
pub fn workdir_path(script: &Script) -> String {
    let dirs = script.preambles(CommandKind::Workdir);
    assert_eq!(dirs.len(), 1, "unexpected number of WORKDIR: {}", dirs.len());
    dirs[0]
        .as_workdir()
        .map(WorkdirCommand::path)
        .unwrap_or_else(|| panic!("unexpected command {:?}", dirs[0]))
        .to_string()
}

/// Format, reparse, and require the same script back.
pub fn assert_format_roundtrip(script: &Script) {
    let formatted = format(script);
    let reparsed = parse(&formatted, &Env::new()).unwrap_or_else(|e| {
        panic!("failed to re-parse formatted output: {e}\n--- formatted ---\n{formatted}")
    });
    assert_eq!(
        &reparsed, script,
        "script mismatch\n--- formatted ---\n{formatted}"
    );
}
