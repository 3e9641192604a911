pub mod markdown;
pub mod plaintext;

use crate::checker::TextChunk;
use std::path::Path;

/// How a document's text is split into checkable chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Markdown,
    #[default]
    PlainText,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" => Format::Markdown,
            _ => Format::PlainText,
        }
    }
}

/// Split `text`, which starts at document offset `base`, into chunks.
///
/// Chunks are returned in document order and carry document offsets.
pub fn segment(text: &str, base: usize, format: Format) -> Vec<TextChunk> {
    match format {
        Format::Markdown => markdown::segment(text, base),
        Format::PlainText => plaintext::segment(text, base),
    }
}

/// The parts of `chunks` that fall inside `[start, end)`.
///
/// Chunks keep their document offsets; a chunk crossing an edge is cut at
/// the edge.
pub fn clip(chunks: &[TextChunk], start: usize, end: usize) -> Vec<TextChunk> {
    chunks
        .iter()
        .filter_map(|chunk| {
            let len = chunk.text.chars().count();
            let from = chunk.start.max(start);
            let to = (chunk.start + len).min(end);
            (from < to).then(|| {
                let text: String = chunk
                    .text
                    .chars()
                    .skip(from - chunk.start)
                    .take(to - from)
                    .collect();
                TextChunk::new(from, text)
            })
        })
        .collect()
}

/// Counts characters up to increasing byte offsets without rescanning.
pub(crate) struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    /// Character offset of `byte`.
    pub(crate) fn char_offset(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
