//! CLI tool to validate and format build scripts.

use std::fs;
use std::process::ExitCode;

use buildscript_rs::{CommandKind, Env, registry};

fn usage() -> ExitCode {
    eprintln!("Usage: buildscript <command> [--env NAME=VALUE]... [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  validate  Check if script(s) are valid");
    eprintln!("  fmt       Format script(s) and print to stdout");
    eprintln!("  check     Check if script(s) are formatted");
    eprintln!();
    eprintln!("Variables are read from the process environment;");
    eprintln!("--env adds or overrides one for the parse.");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    if !matches!(command, "validate" | "fmt" | "check") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    let mut env = Env::from_process();
    let mut files = Vec::new();

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        if arg != "--env" {
            files.push(arg.as_str());
            continue;
        }
        let Some((name, value)) = rest.next().and_then(|kv| kv.split_once('=')) else {
            eprintln!("Error: --env expects NAME=VALUE");
            return ExitCode::from(2);
        };
        env.set(name, value);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let script = match buildscript_rs::parse(&content, &env) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("{path}: {e}");
                eprintln!("    {}", e.text().trim());
                had_error = true;
                continue;
            }
        };

        match command {
            "validate" => {
                let instructions = script.instructions().len();
                let preambles: Vec<&str> = registry::entries()
                    .iter()
                    .map(|e| e.kind)
                    .filter(|kind| !script.preambles(*kind).is_empty())
                    .map(CommandKind::keyword)
                    .collect();
                eprintln!(
                    "{path}: valid ({instructions} instruction(s), \
                     preambles: [{}])",
                    preambles.join(", ")
                );
            }
            "fmt" => {
                print!("{}", buildscript_rs::format(&script));
            }
            _ => {
                if buildscript_rs::format(&script) == content {
                    eprintln!("{path}: formatted");
                } else {
                    eprintln!("{path}: not formatted");
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
