use crate::checker::dictionary::Dictionary;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub struct DictionaryInfo {
    pub language: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

fn data_dir() -> Result<PathBuf> {
    crate::config::Config::data_dir().context("Failed to get data directory")
}

fn dictionary_path(data_dir: &Path, language: &str) -> PathBuf {
    data_dir.join(format!("{}.dict", language))
}

/// Dictionaries installed in `data_dir`, sorted by language.
pub fn installed(data_dir: &Path) -> Result<Vec<DictionaryInfo>> {
    if !data_dir.exists() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("dict") {
            continue;
        }
        let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        found.push(DictionaryInfo {
            language: language.to_string(),
            size_bytes: fs::metadata(&path)?.len(),
            path,
        });
    }

    found.sort_by(|a, b| a.language.cmp(&b.language));
    Ok(found)
}

/// Build `<language>.dict` in `data_dir` from a plain word list.
///
/// Returns the dictionary path and the number of distinct words written.
pub fn install_into(data_dir: &Path, language: &str, word_list: &Path) -> Result<(PathBuf, usize)> {
    let content = fs::read_to_string(word_list)
        .with_context(|| format!("Failed to read word list: {}", word_list.display()))?;
    let words: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if words.is_empty() {
        anyhow::bail!("Word list {} contains no words", word_list.display());
    }

    fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    let path = dictionary_path(data_dir, language);
    Dictionary::build_from_words(&words, &path)?;

    let count = Dictionary::load_from_path(&path)?.len();
    info!(%language, count, path = %path.display(), "installed dictionary");
    Ok((path, count))
}

pub fn list_dictionaries() -> Result<()> {
    let data_dir = data_dir()?;
    let dictionaries = installed(&data_dir)?;

    if dictionaries.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to build one from a word list.",
            "spellnav dict install en_US words.txt".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();
    for dictionary in &dictionaries {
        println!(
            "  {} {} ({})",
            "✓".green(),
            dictionary.language.cyan().bold(),
            format!("{}KB", dictionary.size_bytes / 1024).dimmed()
        );
    }
    println!();
    println!(
        "Data directory: {}",
        data_dir.display().to_string().dimmed()
    );

    Ok(())
}

pub fn install_dictionary(language: &str, word_list: &Path) -> Result<()> {
    println!(
        "{} dictionary for {} from {}...",
        "Building".cyan().bold(),
        language.yellow(),
        word_list.display().to_string().dimmed()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Building FST...");

    let result = install_into(&data_dir()?, language, word_list);
    pb.finish_and_clear();
    let (path, count) = result?;

    println!(
        "{} Dictionary installed: {} ({} words)",
        "✓".green().bold(),
        path.display().to_string().cyan(),
        count.to_string().yellow()
    );

    Ok(())
}

pub fn remove_dictionary(language: &str) -> Result<()> {
    let path = dictionary_path(&data_dir()?, language);
    if !path.exists() {
        println!(
            "{} Dictionary for {} not found.",
            "✗".red().bold(),
            language.yellow()
        );
        return Ok(());
    }

    fs::remove_file(&path)
        .with_context(|| format!("Failed to remove dictionary: {}", path.display()))?;
    println!("{} Removed {}", "✓".green().bold(), language.cyan());
    Ok(())
}

pub fn show_info(language: &str) -> Result<()> {
    let dict_path = dictionary_path(&data_dir()?, language);

    if !dict_path.exists() {
        println!(
            "{} Dictionary for {} not found; the built-in word list is used.",
            "✗".red().bold(),
            language.yellow()
        );
        println!(
            "Run {} to build it.",
            format!("spellnav dict install {} <WORDLIST>", language).cyan()
        );
        return Ok(());
    }

    let metadata = fs::metadata(&dict_path)?;

    println!("{}", format!("Dictionary: {}", language).bold());
    println!("  Path: {}", dict_path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Format: FST (Finite State Transducer)");

    match Dictionary::load_from_path(&dict_path) {
        Ok(dictionary) => println!("  Words: {}", dictionary.len().to_string().yellow()),
        Err(e) => println!("  {}: {}", "Error loading dictionary".red(), e),
    }

    Ok(())
}
