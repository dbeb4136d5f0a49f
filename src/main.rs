use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use simulado::{
    Config, OptionLabel, QuestionEdit, Quiz, QuizError, RecordId, RecordStore, StoreError,
    logging, parse_block,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Write multiple-choice questions as text and practice them", long_about = None)]
struct Args {
    /// JSON file holding the saved questions
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a question block and save its questions
    Import {
        /// Text file to read; stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Only parse and report, without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// List the saved questions
    List,
    /// Delete a saved question
    Remove { id: String },
    /// Change the text, options, answer or justification of a saved question
    Edit {
        id: String,
        /// New question text
        #[arg(long)]
        question: Option<String>,
        /// New text for one option, as LETTER=TEXT; repeatable
        #[arg(long = "option", value_name = "LETTER=TEXT", value_parser = parse_option_arg)]
        options: Vec<(OptionLabel, String)>,
        /// Correct option letter (a to e)
        #[arg(long, value_parser = parse_label)]
        answer: Option<OptionLabel>,
        /// New justification text; an empty string removes it
        #[arg(long)]
        explanation: Option<String>,
    },
    /// Delete every saved question
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Print the saved questions as JSON
    Export,
    /// Start a quiz over the saved questions
    Start {
        /// Keep the saved order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(store) = args.store {
        config.store_path = store;
    }
    logging::init(&config.log_filter);

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<(), CliError> {
    match command {
        Command::Import { file, dry_run } => cmd_import(config, file, dry_run),
        Command::List => cmd_list(config),
        Command::Remove { id } => cmd_remove(config, &id),
        Command::Edit {
            id,
            question,
            options,
            answer,
            explanation,
        } => {
            let edit = QuestionEdit {
                question_text: question,
                options,
                answer,
                explanation,
            };
            cmd_edit(config, &id, &edit)
        }
        Command::Clear { yes } => cmd_clear(config, yes),
        Command::Export => cmd_export(config),
        Command::Start { no_shuffle } => cmd_start(config, config.shuffle && !no_shuffle),
    }
}

fn parse_label(value: &str) -> Result<OptionLabel, String> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            OptionLabel::from_char(c).ok_or_else(|| format!("'{}' is not a letter from a to e", c))
        }
        _ => Err(format!("expected one letter from a to e, got '{}'", value)),
    }
}

fn parse_option_arg(value: &str) -> Result<(OptionLabel, String), String> {
    let (letter, text) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LETTER=TEXT, got '{}'", value))?;
    Ok((parse_label(letter)?, text.to_string()))
}

fn read_input(file: Option<PathBuf>) -> io::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn cmd_import(config: &Config, file: Option<PathBuf>, dry_run: bool) -> Result<(), CliError> {
    let text = read_input(file)?;

    if dry_run {
        let records = parse_block(&text).map_err(StoreError::from)?;
        println!("{} valid questions.", records.len());
        return Ok(());
    }

    let mut store = RecordStore::open(&config.store_path);
    let summary = store.import_block(&text)?;
    println!(
        "Imported {}. Duplicates: {}.",
        summary.added, summary.duplicates
    );
    Ok(())
}

fn cmd_list(config: &Config) -> Result<(), CliError> {
    let store = RecordStore::open(&config.store_path);

    if store.is_empty() {
        println!("No saved questions.");
        return Ok(());
    }

    for (index, stored) in store.list().iter().enumerate() {
        let record = &stored.record;
        println!("#{} [{}] {}", index + 1, stored.id, record.question_text);

        for (label, option) in OptionLabel::ALL.iter().zip(record.options.iter()) {
            let marker = if record.is_correct(label.index()) { '*' } else { ' ' };
            println!("  {} {}) {}", marker, label, option);
        }

        let explanation = if record.explanation.is_empty() {
            "(none)"
        } else {
            record.explanation.as_str()
        };
        println!("  Explanation: {}\n", explanation);
    }

    Ok(())
}

fn cmd_remove(config: &Config, id: &str) -> Result<(), CliError> {
    let mut store = RecordStore::open(&config.store_path);

    if store.remove(&RecordId::from(id))? {
        println!("Question removed.");
        Ok(())
    } else {
        Err(CliError::Usage(format!("no question with id {}", id)))
    }
}

fn cmd_edit(config: &Config, id: &str, edit: &QuestionEdit) -> Result<(), CliError> {
    if edit.is_empty() {
        return Err(CliError::Usage(
            "nothing to change: pass --question, --option, --answer or --explanation".to_string(),
        ));
    }

    let mut store = RecordStore::open(&config.store_path);
    let id = RecordId::from(id);

    let mut record = store
        .get(&id)
        .map(|stored| stored.record.clone())
        .ok_or_else(|| CliError::Usage(format!("no question with id {}", id)))?;

    edit.apply_to(&mut record);

    match store.update(&id, record)? {
        Some(new_id) => {
            println!("Question updated. [{}]", new_id);
            Ok(())
        }
        None => Err(CliError::Usage(format!("no question with id {}", id))),
    }
}

fn cmd_clear(config: &Config, yes: bool) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::Usage(
            "refusing to delete every question without --yes".to_string(),
        ));
    }

    RecordStore::open(&config.store_path).clear()?;
    println!("All questions deleted.");
    Ok(())
}

fn cmd_export(config: &Config) -> Result<(), CliError> {
    if !config.export_enabled {
        return Err(CliError::Usage(
            "JSON export is disabled (set SIMULADO_EXPORT=1 to enable it)".to_string(),
        ));
    }

    let store = RecordStore::open(&config.store_path);
    println!("{}", store.export_json()?);
    Ok(())
}

fn cmd_start(config: &Config, shuffle: bool) -> Result<(), CliError> {
    let store = RecordStore::open(&config.store_path);
    let records = store.questions();

    let quiz = if shuffle {
        Quiz::shuffled(records)?
    } else {
        Quiz::new(records)?
    };

    let outcome = quiz.run()?;
    info!(
        correct = outcome.correct,
        total = outcome.total,
        "quiz finished"
    );
    println!(
        "Quiz finished. Score: {:.0}% ({} / {})",
        outcome.percentage(),
        outcome.correct,
        outcome.total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_arg() {
        assert_eq!(
            parse_option_arg("b=Rome, Italy").unwrap(),
            (OptionLabel::B, "Rome, Italy".to_string())
        );
        assert_eq!(
            parse_option_arg(" E =x=y").unwrap(),
            (OptionLabel::E, "x=y".to_string())
        );
        assert!(parse_option_arg("b Rome").is_err());
        assert!(parse_option_arg("f=Rome").is_err());
        assert!(parse_option_arg("ab=Rome").is_err());
    }

    #[test]
    fn test_edit_arguments() {
        let args = Args::try_parse_from([
            "simulado", "edit", "0123", "--option", "a=one", "--option", "c=three",
            "--answer", "C",
        ])
        .unwrap();

        match args.command {
            Command::Edit {
                id,
                question,
                options,
                answer,
                explanation,
            } => {
                assert_eq!(id, "0123");
                assert_eq!(question, None);
                assert_eq!(
                    options,
                    vec![
                        (OptionLabel::A, "one".to_string()),
                        (OptionLabel::C, "three".to_string())
                    ]
                );
                assert_eq!(answer, Some(OptionLabel::C));
                assert_eq!(explanation, None);
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Args::try_parse_from(["simulado", "edit", "0123", "--answer", "z"]).is_err());
    }
}
