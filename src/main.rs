//! CLI driver for the Lak tree-walking interpreter.
//!
//! A thin wrapper over `lak`'s library surface: parses command-line
//! arguments with [clap](https://docs.rs/clap), drives lex/parse/eval
//! against a source file or an interactive REPL loop, and renders parse
//! diagnostics with [ariadne](https://docs.rs/ariadne). None of the
//! language's actual semantics live here — this binary only decides how
//! to present what the library already computed, per the core crate's
//! "accept a source string, return a value or an error message" contract.
//!
//! # Usage
//!
//! ```text
//! lak tokens <file>   # print every token up to and including EOF
//! lak parse <file>    # print the parsed program's canonical form
//! lak run <file>      # parse and evaluate, printing the result
//! lak repl            # interactive read-eval-print loop
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser as ClapParser, Subcommand};
use lak::evaluator::Evaluator;
use lak::lexer::Lexer;
use lak::parser::{ParseError, Parser as LakParser};
use lak::token::TokenKind;
use std::io::{self, BufRead, Write};

/// Command-line interface for the Lak interpreter.
#[derive(ClapParser)]
#[command(name = "lak")]
#[command(about = "The Lak programming language", long_about = None)]
struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI subcommands, one per mode in the language contract.
#[derive(Subcommand)]
enum Commands {
    /// Print every token scanned from a source file, ending with EOF.
    Tokens {
        /// The source file to tokenize.
        file: String,
    },
    /// Parse a source file and print its canonical AST form.
    Parse {
        /// The source file to parse.
        file: String,
    },
    /// Parse and evaluate a source file, printing the result.
    Run {
        /// The source file to run.
        file: String,
    },
    /// Start an interactive read-eval-print loop.
    Repl,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Tokens { file } => run_tokens(&file),
        Commands::Parse { file } => run_parse(&file),
        Commands::Run { file } => run_eval(&file),
        Commands::Repl => {
            run_repl();
            Ok(())
        }
    };

    if let Err(code) = outcome {
        std::process::exit(code);
    }
}

fn read_source(file: &str) -> Result<String, i32> {
    std::fs::read_to_string(file).map_err(|e| {
        eprintln!("error: failed to read `{}`: {}", file, e);
        1
    })
}

fn run_tokens(file: &str) -> Result<(), i32> {
    log::info!("dispatching `tokens` on {}", file);
    let source = read_source(file)?;
    let mut lexer = Lexer::new(&source);

    loop {
        let token = lexer.next_token();
        let is_eof = token.kind == TokenKind::Eof;
        println!("{:?}", token.kind);
        if is_eof {
            break;
        }
    }
    Ok(())
}

fn run_parse(file: &str) -> Result<(), i32> {
    log::info!("dispatching `parse` on {}", file);
    let source = read_source(file)?;
    let tokens = Lexer::new(&source).tokenize();
    let (program, errors) = LakParser::new(tokens).parse_program();

    if !errors.is_empty() {
        report_parse_errors(file, &source, &errors);
        return Err(1);
    }

    println!("{}", program);
    Ok(())
}

fn run_eval(file: &str) -> Result<(), i32> {
    log::info!("dispatching `run` on {}", file);
    let source = read_source(file)?;
    let tokens = Lexer::new(&source).tokenize();
    let (program, errors) = LakParser::new(tokens).parse_program();

    if !errors.is_empty() {
        report_parse_errors(file, &source, &errors);
        return Err(1);
    }

    let result = Evaluator::new().eval_program(&program, &errors);
    println!("{}", result.inspect());
    if result.is_error() {
        return Err(1);
    }
    Ok(())
}

/// The REPL is deliberately the thinnest possible driver: read a line,
/// evaluate it against a persistent global environment, print the
/// result. No history, no line editing, no colorized output — those
/// stay outside the core library as external collaborators.
fn run_repl() {
    log::info!("starting repl");
    let evaluator = Evaluator::new();
    let stdin = io::stdin();

    print!(">> ");
    io::stdout().flush().ok();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line == "quit" {
            break;
        }

        let tokens = Lexer::new(&line).tokenize();
        let (program, errors) = LakParser::new(tokens).parse_program();
        let result = evaluator.eval_program(&program, &errors);
        println!("{}", result.inspect());

        print!(">> ");
        io::stdout().flush().ok();
    }
}

fn report_parse_errors(filename: &str, source: &str, errors: &[ParseError]) {
    for error in errors {
        log::debug!("parse error recorded: {}", error.message);
        let start = error.span.start;
        let end = error.span.end.max(start + 1);
        Report::build(ReportKind::Error, (filename, start..end))
            .with_message(&error.message)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&error.message)
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
            .ok();
    }
}
