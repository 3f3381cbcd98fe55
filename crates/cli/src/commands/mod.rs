//! Subcommand implementations. Each reads the file, delegates to the
//! core library, prints the canonical rendering, and exits non-zero on
//! any read, parse, or validation failure.

use std::fs;
use std::path::Path;
use std::process;

use pddl_core::PddlError;

use crate::OutputFormat;

pub(crate) fn cmd_domain(file: &Path, output: OutputFormat, quiet: bool) {
    let text = read_or_exit(file);
    let filename = file.display().to_string();
    match pddl_core::parse_domain_named(&text, &filename) {
        Ok(domain) => {
            if !quiet {
                println!("{}", pddl_core::render_domain(&domain));
            }
        }
        Err(e) => report_and_exit(&e, output),
    }
}

pub(crate) fn cmd_problem(file: &Path, output: OutputFormat, quiet: bool) {
    let text = read_or_exit(file);
    let filename = file.display().to_string();
    match pddl_core::parse_problem_named(&text, &filename) {
        Ok(problem) => {
            if !quiet {
                println!("{}", pddl_core::render_problem(&problem));
            }
        }
        Err(e) => report_and_exit(&e, output),
    }
}

fn read_or_exit(file: &Path) -> String {
    match fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("cannot read {}: {}", file.display(), e);
            process::exit(1);
        }
    }
}

fn report_and_exit(e: &PddlError, output: OutputFormat) -> ! {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            eprintln!("{}", e);
        }
    }
    process::exit(1);
}
