//! # Coffee Bean
//!
//! This binary is the command-line front end and REPL for Coffee Bean. It
//! owns everything the core library treats as an external collaborator:
//! argument parsing, file reading, the REPL prompt loop and `-d/--debug`
//! token/AST dumping.
extern crate coffee_bean;

mod cli;

use cli::Cli;

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::debug;

use coffee_bean::environment::Environment;
use coffee_bean::error::CoffeeBeanError;
use coffee_bean::interpreter::{self, global_environment};
use coffee_bean::{parse, tokenize};

fn main() -> ExitCode {
    let args = Cli::init();

    let log_level = if args.debug { log::Level::Debug } else { log::Level::Warn };
    simple_logger::init_with_level(log_level).expect("only one logger is ever installed");

    match args.file {
        Some(file) => run_file(&file, args.debug),
        None => {
            run_repl(args.debug);
            ExitCode::SUCCESS
        }
    }
}

/// Reads `path` as UTF-8, runs the whole pipeline and prints `echo` output
/// to stdout. Any pipeline error is printed and the process exits non-zero.
fn run_file(path: &std::path::Path, debug: bool) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            println!("Error: Cannot open file '{}': {error}", path.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&source, None, debug, Box::new(io::stdout())) {
        (_, Ok(())) => ExitCode::SUCCESS,
        (_, Err(error)) => {
            println!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Reads lines from stdin, each an independent input sharing one persistent
/// global environment. Exits cleanly on EOF.
fn run_repl(debug: bool) {
    println!("Coffee Bean interpreter.");

    let mut env = global_environment();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) | None => {
                println!();
                break;
            }
        };

        let (new_env, result) = run(&line, Some(env), debug, Box::new(io::stdout()));
        env = new_env;

        if let Err(error) = result {
            println!("{error}");
        }
    }
}

/// Runs the tokenize → parse → interpret pipeline once over `source`,
/// returning the (possibly newly created) global environment alongside the
/// unified pipeline result.
fn run(
    source: &str,
    env: Option<Environment>,
    debug: bool,
    output: Box<dyn Write>,
) -> (Environment, Result<(), CoffeeBeanError>) {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            return (env.unwrap_or_else(global_environment), Err(error.into()));
        }
    };

    if debug {
        debug!("Tokens:\n{tokens:#?}");
    }

    let statements = match parse(tokens) {
        Ok(statements) => statements,
        Err(error) => {
            return (env.unwrap_or_else(global_environment), Err(error.into()));
        }
    };

    if debug {
        debug!("Parsed statements:\n{statements:#?}");
    }

    let (env, result) = interpreter::interpret(&statements, env, output);
    (env, result.map_err(CoffeeBeanError::from))
}
