use anyhow::{Context, Result};
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Words every bootstrap dictionary knows, so a first run is usable offline.
const BASIC_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "as", "at", "back", "be",
    "because", "but", "by", "can", "come", "could", "day", "do", "even", "first", "for",
    "from", "get", "give", "go", "good", "have", "he", "her", "him", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "just", "know", "like", "look", "make", "me", "most",
    "my", "new", "no", "not", "now", "of", "on", "one", "only", "or", "other", "our", "out",
    "over", "people", "say", "see", "she", "so", "some", "take", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "think", "this", "time", "to", "two",
    "up", "us", "use", "want", "was", "way", "we", "well", "what", "when", "which", "who",
    "will", "with", "work", "would", "year", "you", "your",
    // editing vocabulary
    "document", "editor", "error", "file", "find", "ignore", "language", "next", "page",
    "replace", "section", "spelling", "text", "word", "words",
];

/// A sorted, immutable word set backed by an FST.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load the installed dictionary for a language, or the bootstrap list.
    pub fn load(language: &str) -> Result<Self> {
        match Self::installed_path(language) {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Self::from_words(BASIC_WORDS),
        }
    }

    /// Load a dictionary previously written by `build_from_words`.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes)
            .with_context(|| format!("Failed to parse dictionary: {}", path.display()))?;
        Ok(Self { set })
    }

    /// Build an in-memory dictionary from a plain word list, one word per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_word_list(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_words(words)
    }

    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        let set = Set::from_iter(sorted).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.len() == 0
    }

    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                results.push(word.to_string());
            }
        }

        results
    }

    /// Write a word list as an FST file that `load_from_path` can read.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        let sorted: BTreeSet<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;
        let mut builder =
            SetBuilder::new(BufWriter::new(file)).context("Failed to create FST builder")?;

        for word in sorted {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    fn installed_path(language: &str) -> Option<PathBuf> {
        crate::config::Config::data_dir().map(|dir| dir.join(format!("{}.dict", language)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_and_load_dictionary() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("test.dict");

        let words = vec!["hello".to_string(), "World".to_string(), "test".to_string()];
        Dictionary::build_from_words(&words, &dict_path).unwrap();

        let dict = Dictionary::load_from_path(&dict_path).unwrap();
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(!dict.contains("notfound"));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_word_list_skips_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "# header\nalpha\n\n  beta  \nalpha\n").unwrap();

        let dict = Dictionary::from_word_list(&path).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("beta"));
        assert!(!dict.contains("# header"));
    }

    #[test]
    fn test_prefix_search() {
        let dict = Dictionary::from_words(["spell", "spelling", "spot", "apple"]).unwrap();
        assert_eq!(dict.words_with_prefix("spe"), vec!["spell", "spelling"]);
        assert!(dict.words_with_prefix("zz").is_empty());
    }

    #[test]
    fn test_bootstrap_words_are_known() {
        let dict = Dictionary::from_words(BASIC_WORDS).unwrap();
        assert!(dict.contains("the"));
        assert!(dict.contains("spelling"));
    }
}
