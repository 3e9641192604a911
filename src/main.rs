use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use spellnav::cli::output::{self, Action, Location, OutputFormat};
use spellnav::config::Overrides;
use spellnav::parser::Format;
use spellnav::{
    dict, logging, Config, DictionaryChecker, Document, FindResult, MemoryDocument,
    ReplaceOutcome, Session, WordList,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(name = "spellnav")]
#[command(version, about = "Step through the spelling problems of a document", long_about = None)]
struct Cli {
    /// File to check
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Prompt for a correction at every problem and save the result
    #[arg(short, long)]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if problems are found
    #[arg(long)]
    no_fail: bool,

    /// Language/dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Plain word list to use instead of the installed dictionary
    #[arg(long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    /// Personal dictionary file
    #[arg(long, value_name = "PATH")]
    personal_dict: Option<PathBuf>,

    /// Word to ignore everywhere in the document (repeatable)
    #[arg(long, value_name = "WORD")]
    ignore_word: Vec<String>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Characters checked per scan window
    #[arg(long, env = "SPELLNAV_WINDOW")]
    window: Option<usize>,

    /// Characters read around each window
    #[arg(long)]
    padding: Option<usize>,

    /// Keep reporting after the scan wraps past the first problem
    #[arg(long)]
    no_wrap_detection: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Build a dictionary from a plain word list
    Install {
        /// Language code (e.g., en_US, en_GB, fr_FR)
        language: String,
        /// Word list, one word per line
        word_list: PathBuf,
    },
    /// Remove an installed dictionary
    Remove {
        /// Language code
        language: String,
    },
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

/// Everything a session needs besides the session itself.
struct Workspace {
    path: PathBuf,
    doc: MemoryDocument,
    checker: DictionaryChecker,
    words: WordList,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellnav", &mut io::stdout());
        return Ok(());
    }

    logging::init_logging(cli.verbose)?;

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let Some(path) = cli.file.clone() else {
        anyhow::bail!("No file specified. Use --help for usage information.");
    };

    let config = Config::load(Overrides {
        language: cli.language.clone(),
        dictionary: cli.dictionary.clone(),
        personal_dictionary: cli.personal_dict.clone(),
        ignore_patterns: cli.ignore_pattern.clone(),
        ignored_words: cli.ignore_word.clone(),
        window: cli.window,
        padding: cli.padding,
        no_wrap_detection: cli.no_wrap_detection,
    })?;
    debug!(?config, "loaded configuration");

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let checker = DictionaryChecker::new(&config)?.with_format(Format::from_path(&path));
    let mut workspace = Workspace {
        doc: MemoryDocument::new(&text),
        words: WordList::from(&config.ignored_words),
        checker,
        path,
    };
    let mut session = Session::new(config.scan.clone());
    let colored = !cli.no_color;

    if cli.interactive {
        if !console::user_attended() {
            anyhow::bail!("Interactive mode needs a terminal");
        }
        run_interactive(&mut workspace, &mut session, colored)?;
        return Ok(());
    }

    let total = run_report(&workspace, &mut session, colored, cli.format)?;
    if total > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

/// Walk the whole document and print every problem. Returns the count.
fn run_report(
    workspace: &Workspace,
    session: &mut Session,
    colored: bool,
    format: OutputFormat,
) -> Result<usize> {
    let progress = if format == OutputFormat::Text && console::user_attended_stderr() {
        let pb = ProgressBar::new(workspace.doc.len() as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos}/{len} {msg}")?);
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results: Vec<FindResult> = Vec::new();
    while let Some(found) = session.find_next(&workspace.doc, &workspace.checker, &workspace.words)? {
        // Without wrap detection the walk would cycle forever.
        if session.state().wrapped() {
            break;
        }
        progress.set_position(found.start_offset as u64);
        progress.set_message(found.word.clone());
        results.push(found);
    }
    progress.finish_and_clear();

    output::print_report(
        &workspace.path,
        &workspace.doc.to_string(),
        &results,
        colored,
        format,
    )?;
    if format == OutputFormat::Text {
        output::print_check_summary(results.len(), colored);
    }

    Ok(results.len())
}

fn run_interactive(workspace: &mut Workspace, session: &mut Session, colored: bool) -> Result<()> {
    let mut fixed = 0;
    let mut next = session.find_next(&workspace.doc, &workspace.checker, &workspace.words)?;

    while let Some(found) = next {
        let location = Location::of(&workspace.doc.to_string(), found.start_offset);
        next = match output::prompt_action(&found, &location, colored)? {
            Action::Replace(word) => replace(workspace, session, &word, false, &mut fixed)?,
            Action::ReplaceAll(word) => replace(workspace, session, &word, true, &mut fixed)?,
            Action::Ignore => session.ignore_current_and_find_next(
                &workspace.doc,
                &workspace.checker,
                &workspace.words,
            )?,
            Action::Skip => {
                session.find_next(&workspace.doc, &workspace.checker, &workspace.words)?
            }
            Action::Quit => break,
        };
    }

    if fixed > 0 {
        save(&workspace.path, &workspace.doc)?;
    }
    output::print_fix_summary(fixed, &workspace.path, colored);

    Ok(())
}

fn replace(
    workspace: &mut Workspace,
    session: &mut Session,
    new_word: &str,
    replace_all: bool,
    fixed: &mut usize,
) -> Result<Option<FindResult>> {
    let outcome = session.replace_and_find_next(
        &mut workspace.doc,
        &workspace.checker,
        &workspace.words,
        new_word,
        replace_all,
    )?;

    match outcome {
        ReplaceOutcome::Next(next) => {
            *fixed += 1;
            Ok(next)
        }
        ReplaceOutcome::WordChanged => {
            warn!("word changed before it could be replaced; moving on");
            Ok(session.find_next(&workspace.doc, &workspace.checker, &workspace.words)?)
        }
        ReplaceOutcome::Rejected { reason } => {
            eprintln!("Replacement rejected: {}", reason);
            Ok(session.find_next(&workspace.doc, &workspace.checker, &workspace.words)?)
        }
    }
}

fn save(path: &Path, doc: &MemoryDocument) -> Result<()> {
    fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries()?;
            }
            DictCommands::Install {
                language,
                word_list,
            } => {
                dict::manager::install_dictionary(&language, &word_list)?;
            }
            DictCommands::Remove { language } => {
                dict::manager::remove_dictionary(&language)?;
            }
            DictCommands::Info { language } => {
                dict::manager::show_info(&language)?;
            }
        },
    }
    Ok(())
}
