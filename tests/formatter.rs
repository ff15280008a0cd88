//! Canonical formatting.

mod common;

use buildscript_rs::{Env, format};
use common::{assert_format_roundtrip, parse_ok};

#[test]
fn format_orders_preambles_first() {
    let script = parse_ok("RUN ls\nWORKDIR b\nFROM h1\nWORKDIR c", &Env::new());
    assert_eq!(format(&script), "FROM h1\nWORKDIR c\nRUN ls\n");
}

#[test]
fn format_omits_default_named_values() {
    let script = parse_ok("FROM local port:22\nRUN ls echo:false", &Env::new());
    assert_eq!(format(&script), "FROM local\nRUN ls\n");
}

#[test]
fn format_keeps_non_default_named_values() {
    let script = parse_ok(
        "AS 1000 groupid:1000\nCAPTURE 'ps aux' shell:'/bin/sh -c' echo:true",
        &Env::new(),
    );
    assert_eq!(
        format(&script),
        "AS 1000 groupid:1000\nCAPTURE 'ps aux' shell:'/bin/sh -c' echo:true\n"
    );
}

#[test]
fn format_quotes_colon_in_default() {
    let script = parse_ok("WORKDIR c:/temp", &Env::new());
    assert_eq!(format(&script), "WORKDIR 'c:/temp'\n");
    assert_format_roundtrip(&script);
}

#[test]
fn format_empty_script() {
    let script = parse_ok("# nothing\n", &Env::new());
    assert_eq!(format(&script), "");
}

#[test]
fn format_roundtrip_mixed_quoting() {
    let script = parse_ok(
        r#"FROM 'h1  h2' port:2022
RUN "echo 'it''s'" shell:bash
COPY a\ b\ c
CAPTURE "say \"hi\" \\ there"
WORKDIR "don't panic"
OUTPUT shell:x"#,
        &Env::new(),
    );
    assert_format_roundtrip(&script);
}

#[test]
fn format_is_idempotent() {
    let script = parse_ok("RUN   'ls'\nWORKDIR   path:x", &Env::new());
    let once = format(&script);
    let twice = format(&parse_ok(&once, &Env::new()));
    assert_eq!(once, twice);
}
