use crate::FindResult;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// 1-based line and column of a character offset, plus the line's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub context: String,
}

impl Location {
    pub fn of(text: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut line_start = 0;
        for (i, ch) in text.chars().take(offset).enumerate() {
            if ch == '\n' {
                line += 1;
                line_start = i + 1;
            }
        }

        let context = text
            .chars()
            .skip(line_start)
            .take_while(|&ch| ch != '\n')
            .collect::<String>()
            .trim_end()
            .to_string();

        Self {
            line,
            column: offset - line_start + 1,
            context,
        }
    }
}

/// What the user picked for one problem in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Replace(String),
    ReplaceAll(String),
    Ignore,
    Skip,
    Quit,
}

pub fn print_report(
    file_path: &Path,
    text: &str,
    results: &[FindResult],
    colored_output: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text_report(file_path, text, results, colored_output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
    }
    Ok(())
}

fn print_text_report(file_path: &Path, text: &str, results: &[FindResult], colored_output: bool) {
    if results.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for result in results {
        let location = Location::of(text, result.start_offset);
        let line_info = format!("{}:{}", location.line, location.column);

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                result.word.red().bold(),
                format_context(&location.context, &result.word, colored_output)
            );
        } else {
            println!("  {} {} {}", line_info, result.word, location.context);
        }

        if !result.suggestions.is_empty() {
            println!(
                "    {} {}",
                arrow(colored_output),
                join_suggestions(&result.suggestions, colored_output)
            );
        }
    }
}

fn arrow(colored: bool) -> String {
    if colored {
        "→".dimmed().to_string()
    } else {
        "→".to_string()
    }
}

fn join_suggestions(suggestions: &[String], colored: bool) -> String {
    if colored {
        suggestions
            .iter()
            .take(5)
            .map(|s| s.green().to_string())
            .collect::<Vec<_>>()
            .join(&", ".dimmed().to_string())
    } else {
        suggestions
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

pub fn print_check_summary(total_problems: usize, colored: bool) {
    println!();
    if total_problems == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let noun = if total_problems == 1 { "error" } else { "errors" };
        if colored {
            println!(
                "{} {} {} found",
                "✗".red().bold(),
                total_problems.to_string().red().bold(),
                noun
            );
        } else {
            println!("✗ {} {} found", total_problems, noun);
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, file_path: &Path, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections made".green().bold());
        } else {
            println!("No corrections made");
        }
    } else {
        let noun = if total_fixed == 1 { "correction" } else { "corrections" };
        if colored {
            println!(
                "{} {} {} applied to {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                noun,
                file_path.display()
            );
        } else {
            println!("✓ {} {} applied to {}", total_fixed, noun, file_path.display());
        }
    }
}

/// Ask what to do with `result`, shown in the line it sits on.
pub fn prompt_action(
    result: &FindResult,
    location: &Location,
    colored: bool,
) -> anyhow::Result<Action> {
    if colored {
        println!(
            "\n{} {}:{}",
            "Misspelling found:".yellow().bold(),
            location.line.to_string().blue(),
            location.column.to_string().blue()
        );
    } else {
        println!("\nMisspelling found: {}:{}", location.line, location.column);
    }
    println!("  {}", format_context(&location.context, &result.word, colored));

    let choices = menu(result);
    let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("'{}'", result.word))
        .items(&labels)
        .default(0)
        .interact()?;

    match choices.into_iter().nth(picked).map(|(_, choice)| choice) {
        Some(Choice::Action(action)) => Ok(action),
        Some(Choice::Custom) => {
            let replacement: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Replace with")
                .with_initial_text(result.word.clone())
                .interact_text()?;
            Ok(Action::Replace(replacement))
        }
        None => Ok(Action::Skip),
    }
}

enum Choice {
    Action(Action),
    Custom,
}

fn menu(result: &FindResult) -> Vec<(String, Choice)> {
    let mut choices: Vec<(String, Choice)> = result
        .suggestions
        .iter()
        .take(9)
        .map(|s| (s.clone(), Choice::Action(Action::Replace(s.clone()))))
        .collect();

    if let Some(top) = result.suggestions.first() {
        choices.push((
            format!("Replace all '{}' with '{}'", result.word, top),
            Choice::Action(Action::ReplaceAll(top.clone())),
        ));
    }
    choices.push(("Type a replacement".to_string(), Choice::Custom));
    choices.push(("Ignore".to_string(), Choice::Action(Action::Ignore)));
    choices.push(("Skip".to_string(), Choice::Action(Action::Skip)));
    choices.push(("Quit".to_string(), Choice::Action(Action::Quit)));
    choices
}
