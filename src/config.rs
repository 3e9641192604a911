use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters per scan window.
pub const DEFAULT_WINDOW: usize = 1000;
/// Characters read on each side of a window so edge words are seen whole.
pub const DEFAULT_PADDING: usize = 50;

const LOCAL_CONFIG_FILE: &str = ".spellnav.toml";

/// Tuning and capability flags for a spellcheck session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub window: usize,
    pub padding: usize,
    /// Stop the session once the scan wraps back to where it started.
    pub detect_wrap: bool,
    /// Ask the checker for suggestions when a problem carries none.
    pub lookup_suggestions: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            padding: DEFAULT_PADDING,
            detect_wrap: true,
            lookup_suggestions: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: String,

    /// Plain word list used instead of the installed dictionary.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,

    #[serde(default)]
    pub personal_dictionary: Option<PathBuf>,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Words ignored everywhere, grouped by language tag.
    #[serde(default)]
    pub ignored_words: BTreeMap<String, Vec<String>>,

    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(default)]
    pub scan: ScanOptions,
}

fn default_language() -> String {
    "en_US".to_string()
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            dictionary: None,
            personal_dictionary: None,
            ignore_patterns: vec![
                r"^[A-Z0-9_]{2,}$".to_string(),                                 // ALL_CAPS
                r"https?://\S+".to_string(),                                    // URLs
                r"^[a-fA-F0-9]{32,}$".to_string(),                              // Hashes
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
            ],
            ignored_words: BTreeMap::new(),
            max_suggestions: default_max_suggestions(),
            case_sensitive: false,
            scan: ScanOptions::default(),
        }
    }
}

/// Values given on the command line; `None` and empty mean "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub ignored_words: Vec<String>,
    pub window: Option<usize>,
    pub padding: Option<usize>,
    pub no_wrap_detection: bool,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        config.apply(overrides);

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if overrides.dictionary.is_some() {
            self.dictionary = overrides.dictionary;
        }
        if overrides.personal_dictionary.is_some() {
            self.personal_dictionary = overrides.personal_dictionary;
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
        if !overrides.ignored_words.is_empty() {
            self.ignored_words
                .entry(self.language.clone())
                .or_default()
                .extend(overrides.ignored_words);
        }
        if let Some(window) = overrides.window {
            self.scan.window = window;
        }
        if let Some(padding) = overrides.padding {
            self.scan.padding = padding;
        }
        if overrides.no_wrap_detection {
            self.scan.detect_wrap = false;
        }
    }

    fn merge(mut self, other: Self) -> Self {
        // Values still at their defaults in `other` do not override
        if other.language != default_language() {
            self.language = other.language;
        }
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if !other.ignore_patterns.is_empty() {
            self.ignore_patterns = other.ignore_patterns;
        }
        for (language, words) in other.ignored_words {
            self.ignored_words.entry(language).or_default().extend(words);
        }
        if other.max_suggestions != default_max_suggestions() {
            self.max_suggestions = other.max_suggestions;
        }
        self.case_sensitive = other.case_sensitive;
        if other.scan != ScanOptions::default() {
            self.scan = other.scan;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellnav").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellnav").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellnav").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language, "en_US");
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.scan.window, 1000);
        assert_eq!(config.scan.padding, 50);
        assert!(config.scan.detect_wrap);
        assert!(!config.case_sensitive);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            language: "en_GB".to_string(),
            ignored_words: BTreeMap::from([("en".to_string(), vec!["colour".to_string()])]),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.language, "en_GB");
        assert_eq!(merged.ignored_words["en"], vec!["colour"]);
        assert_eq!(merged.scan, ScanOptions::default());
    }

    #[test]
    fn test_from_file_with_scan_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
language = "fr_FR"

[ignored_words]
fr_FR = ["tarte"]

[scan]
window = 250
detect_wrap = false
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.language, "fr_FR");
        assert_eq!(config.ignored_words["fr_FR"], vec!["tarte"]);
        assert_eq!(config.scan.window, 250);
        assert_eq!(config.scan.padding, DEFAULT_PADDING);
        assert!(!config.scan.detect_wrap);
        assert!(config.scan.lookup_suggestions);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        config.apply(Overrides {
            language: Some("de_DE".to_string()),
            ignored_words: vec!["Strasse".to_string()],
            window: Some(64),
            no_wrap_detection: true,
            ..Overrides::default()
        });

        assert_eq!(config.language, "de_DE");
        assert_eq!(config.ignored_words["de_DE"], vec!["Strasse"]);
        assert_eq!(config.scan.window, 64);
        assert!(!config.scan.detect_wrap);
    }
}
