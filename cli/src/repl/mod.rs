mod completer;
mod helper;
mod highlighter;
mod hinter;

use std::fs;

use kaiju::{KaijuError, ParseOptions, SourceType};
use owo_colors::OwoColorize;
use rustyline::error::ReadlineError;
use rustyline::{Config, EditMode, Editor};

use self::helper::ReplHelper;

/// What the loop prints for each successfully parsed entry.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Output {
    Json { pretty: bool },
    Source,
}

struct Session {
    options: ParseOptions,
    output: Output,
}

pub fn run(options: ParseOptions, pretty: bool) -> Result<(), ReadlineError> {
    let config = Config::builder()
        .history_ignore_dups(true)?
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut rl: Editor<ReplHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(ReplHelper { options }));

    let mut session = Session {
        options,
        output: Output::Json { pretty },
    };

    println!(
        "{} {}",
        "kaiju".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "Type .help for REPL commands".bright_black());

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match handle_command(trimmed, &mut session) {
                    Some(Command::Exit) => break,
                    Some(Command::Handled) => {
                        if let Some(helper) = rl.helper_mut() {
                            helper.options = session.options;
                        }
                    }
                    None => parse_entry(&session, &line),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "bye".bright_black());
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

enum Command {
    Handled,
    Exit,
}

fn handle_command(trimmed: &str, session: &mut Session) -> Option<Command> {
    match trimmed {
        ".exit" => return Some(Command::Exit),
        ".help" => {
            for line in [
                ".help                show commands",
                ".module              parse entries as modules",
                ".script              parse entries as scripts",
                ".print               echo regenerated source",
                ".json                echo the JSON tree",
                ".load <file.js>      parse a file",
                ".exit                exit REPL",
            ] {
                println!("{}", line.bright_blue());
            }
        }
        ".module" => {
            session.options = session.options.with_source_type(SourceType::Module);
            println!("{}", "source type: module".green());
        }
        ".script" => {
            session.options = session.options.with_source_type(SourceType::Script);
            println!("{}", "source type: script".green());
        }
        ".print" => session.output = Output::Source,
        ".json" => {
            let pretty = matches!(session.output, Output::Json { pretty: true });
            session.output = Output::Json { pretty };
        }
        _ => {
            let path = trimmed.strip_prefix(".load ")?.trim();
            match fs::read_to_string(path) {
                Ok(source) => parse_entry(session, &source),
                Err(err) => eprintln!("{} {err}", "load error:".red().bold()),
            }
        }
    }
    Some(Command::Handled)
}

fn parse_entry(session: &Session, source: &str) {
    match render(session, source) {
        Ok(text) => println!("{text}"),
        Err(KaijuError::Parse(err)) => {
            let report = miette::Report::new(err).with_source_code(source.to_string());
            eprintln!("{report:?}");
        }
        Err(err) => eprintln!("{} {err}", "error:".red().bold()),
    }
}

fn render(session: &Session, source: &str) -> Result<String, KaijuError> {
    let program = kaiju::parse_with_options(source, &session.options)?;
    match session.output {
        Output::Source => Ok(kaiju::print(&program).trim_end().to_string()),
        Output::Json { pretty: true } => kaiju::to_json_pretty(&program),
        Output::Json { pretty: false } => kaiju::to_json(&program),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            options: ParseOptions::default(),
            output: Output::Json { pretty: false },
        }
    }

    #[test]
    fn module_command_switches_source_type() {
        let mut session = session();
        assert!(matches!(
            handle_command(".module", &mut session),
            Some(Command::Handled)
        ));
        assert!(session.options.is_module());
        assert!(render(&session, "export const a = 1;").is_ok());
    }

    #[test]
    fn plain_input_is_not_a_command() {
        assert!(handle_command("let a = 1", &mut session()).is_none());
    }

    #[test]
    fn print_mode_renders_source() {
        let mut session = session();
        handle_command(".print", &mut session);
        assert_eq!(render(&session, "a+b").ok().as_deref(), Some("a + b;"));
    }
}
