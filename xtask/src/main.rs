// xtask - Build automation for skink
// Copyright (c) 2026 The skink authors. MIT licensed.

use std::env;
use std::process::{Command, exit};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("test") => test(&args[1..]),
        Some("help") | Some("-h") | Some("--help") | None => help(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            help();
            exit(1);
        }
    }
}

fn help() {
    println!(
        r#"skink xtask - Build automation

USAGE:
    cargo xtask <COMMAND>

COMMANDS:
    test [OPTIONS] [FILTER]   Run the workspace test suite
    help                      Show this message

TEST OPTIONS:
    --release       Run tests with release build
    -p <CRATE>      Test a single workspace crate
    FILTER          Forwarded to cargo test (test name filter)

EXAMPLES:
    cargo xtask test                 Run all tests
    cargo xtask test closure         Run tests matching "closure"
    cargo xtask test -p skink-vm     Run skink-vm's tests only
    cargo xtask test --release       Run all tests with release build
"#
    );
}

fn test(args: &[String]) {
    let mut cargo_args: Vec<String> = vec!["test".into(), "--workspace".into()];
    let mut filter: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--release" => cargo_args.push("--release".into()),
            "-p" | "--package" => {
                let Some(package) = iter.next() else {
                    eprintln!("-p requires a crate name");
                    exit(1);
                };
                // Selecting a package replaces the workspace-wide run.
                cargo_args.retain(|a| a != "--workspace");
                cargo_args.push("-p".into());
                cargo_args.push(package.clone());
            }
            other => filter = Some(other.to_string()),
        }
    }

    if let Some(filter) = filter {
        cargo_args.push(filter);
    }

    let status = Command::new("cargo")
        .args(&cargo_args)
        .status()
        .expect("Failed to run cargo test");

    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}
