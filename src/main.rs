mod cli;
mod engine;
mod error_handling;
mod grammar;
mod parser;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use engine::Engine;
use grammar::Grammar;
use parser::FileResult;

// Typed instead of a string to end the interactive loop
const EXIT_COMMAND: &str = "salir";

// Returns None at end of input
fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

fn load_grammar(cli: &Cli) -> FileResult<Grammar> {
    if !cli.rules.is_empty() {
        return Grammar::load(&cli.rules);
    }

    let path = match &cli.file {
        Some(path) => path.clone(),
        None => {
            let name = prompt("Enter the grammar file name (e.g. 'grammar.txt'): ")
                .ok()
                .flatten()
                .unwrap_or_default();
            PathBuf::from(name)
        }
    };

    parser::parse_file(&path)
}

fn check(engine: &Engine, input: &str, quiet: bool) {
    if quiet {
        let verdict = if engine.run(input).is_accepted() { "accepted" } else { "rejected" };
        println!("{}: {}", input, verdict);
    } else {
        engine.parse(input);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let grammar = match load_grammar(&cli) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    if !cli.no_grammar {
        println!("\nLoaded grammar:\n{}", grammar);
    }

    let engine = Engine::new(&grammar);

    if !cli.inputs.is_empty() {
        for input in &cli.inputs {
            check(&engine, input, cli.quiet);
        }
        return ExitCode::SUCCESS;
    }

    let message = format!("\nEnter a string to parse (or type '{}' to quit): ", EXIT_COMMAND);
    loop {
        let line = match prompt(&message) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        if is_exit(&line) {
            break;
        }

        check(&engine, &line, cli.quiet);
    }

    ExitCode::SUCCESS
}
