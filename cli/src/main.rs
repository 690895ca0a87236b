#![allow(clippy::result_large_err)]

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use kaiju::{KaijuError, ParseError, ParseOptions, SourceType};
use miette::{NamedSource, Report};
use owo_colors::OwoColorize;

mod repl;

#[derive(Parser)]
#[command(name = "kaiju", about = "Parse JavaScript into a babylon-compatible JSON AST")]
struct Cli {
    /// Path to a .js file to parse; stdin when omitted
    file: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
    /// Parse as an ES module (enables import/export)
    #[arg(long)]
    module: bool,
    /// Accept `return` at the top level
    #[arg(long)]
    allow_return_outside_function: bool,
    /// Dump the token stream to stderr
    #[arg(long)]
    tokens: bool,
    /// Print regenerated source instead of JSON
    #[arg(long)]
    print: bool,
    /// Start the interactive parser loop
    #[arg(long)]
    repl: bool,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        let source_type = if self.module {
            SourceType::Module
        } else {
            SourceType::Script
        };
        ParseOptions::new()
            .with_source_type(source_type)
            .with_allow_return_outside_function(self.allow_return_outside_function)
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!(
            "{} {}",
            "kaiju".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    if cli.repl {
        if let Err(err) = repl::run(cli.options(), cli.pretty) {
            eprintln!("{} {err}", "repl error:".red().bold());
            process::exit(1);
        }
        return;
    }

    let name = cli
        .file
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |path| path.display().to_string());
    let source = match read_source(cli.file.as_ref()) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{} could not read '{}': {err}", "error:".red().bold(), name.yellow());
            process::exit(2);
        }
    };

    if let Err(err) = run(&cli, &source) {
        match err {
            KaijuError::Parse(err) => report_parse_error(&name, &source, err),
            KaijuError::Io(err) => {
                eprintln!("{} {err}", "error:".red().bold());
                process::exit(2);
            }
            err => eprintln!("{:?}", Report::new(err)),
        }
        process::exit(1);
    }
}

fn read_source(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn run(cli: &Cli, source: &str) -> Result<(), KaijuError> {
    if cli.tokens {
        for token in kaiju::lexer::scanner::Scanner::new(source) {
            let token = token?;
            eprintln!(
                "{} {:<24} {}..{} {:?}",
                "token".bright_black(),
                format!("{:?}", token.kind),
                token.span.start,
                token.span.end,
                token.lexeme
            );
        }
    }

    let program = kaiju::parse_with_options(source, &cli.options())?;
    if cli.print {
        print!("{}", kaiju::print(&program));
    } else if cli.pretty {
        println!("{}", kaiju::to_json_pretty(&program)?);
    } else {
        println!("{}", kaiju::to_json(&program)?);
    }
    Ok(())
}

fn report_parse_error(name: &str, source: &str, err: ParseError) {
    let report = Report::new(err).with_source_code(NamedSource::new(name, source.to_string()));
    eprintln!("{report:?}");
}
