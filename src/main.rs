use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use lox_frontend as lox;

use lox::ast_printer::AstPrinter;
use lox::error::LoxError;
use lox::parser::Parser;
use lox::scanner::{Scanned, Scanner};

/// Exit status for malformed input (lexical or syntax errors).
const EXIT_DATA_ERR: u8 = 65;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox expression front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// Print tokens / syntax trees as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses input from a file as a single expression and prints its AST
    Parse { filename: Option<PathBuf> },
}

/// Reads a file and checks that it is valid UTF‑8.
fn read_source(filename: &Path) -> lox::error::Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader.read_to_end(&mut buf)?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(String::from_utf8(buf)?)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("lox_frontend::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Print every lexical error to stderr and hand back the first one.
fn check_lex_errors(scanned: &Scanned<'_>) -> lox::error::Result<()> {
    for e in &scanned.errors {
        eprintln!("{}", e);
    }

    match scanned.errors.first() {
        Some(first) => Err(first.clone().into()),
        None => Ok(()),
    }
}

/// Prints the token stream; lexical errors go to stderr as they are found.
fn tokenize(source: &str, json: bool) -> lox::error::Result<()> {
    info!("Running Tokenize subcommand");

    let scanned = Scanner::new(source).scan_tokens();

    if json {
        println!("{}", serde_json::to_string_pretty(&scanned.tokens)?);
    } else {
        for token in &scanned.tokens {
            println!("{}", token);
        }
    }

    check_lex_errors(&scanned)?;

    info!("Tokenization completed successfully");
    Ok(())
}

/// Prints the tree of a single expression.  Lexical errors stop the run
/// before parsing.
fn parse(source: &str, json: bool) -> lox::error::Result<()> {
    info!("Running Parse subcommand");

    let scanned = Scanner::new(source).scan_tokens();
    check_lex_errors(&scanned)?;

    let expr = Parser::new(&scanned.tokens).parse()?;
    info!("Expression parsed successfully");

    if json {
        println!("{}", serde_json::to_string_pretty(&expr)?);
    } else {
        let ast_str = AstPrinter::print(&expr);
        debug!("AST: {}", ast_str);
        println!("{}", ast_str);
    }

    Ok(())
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .parse_default_env()
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let (filename, run): (Option<PathBuf>, fn(&str, bool) -> lox::error::Result<()>) =
        match args.commands {
            Commands::Tokenize { filename } => (filename, tokenize),
            Commands::Parse { filename } => (filename, parse),
        };

    let Some(filename) = filename else {
        info!("No filepath provided");
        println!("No input filepath was provided. Exiting...");
        return Ok(ExitCode::SUCCESS);
    };

    let source = read_source(&filename).context(format!("Failed to read {:?}", filename))?;

    match run(&source, args.json) {
        Ok(()) => Ok(ExitCode::SUCCESS),

        Err(e) if e.is_source_error() => {
            match &e {
                // Every lexical error has already been printed.
                LoxError::Lex(first) => {
                    debug!("Lexical errors, first on line {}", first.line());
                }
                _ => {
                    debug!("Parse debug: {}", e);
                    eprintln!("{}", e);
                }
            }

            Ok(ExitCode::from(EXIT_DATA_ERR))
        }

        Err(e) => Err(anyhow::Error::new(e).context("Failed to write output")),
    }
}
