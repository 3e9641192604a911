use super::{check_range, Document, Position, StablePosition};
use crate::{Error, Result};
use regex::Regex;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

#[derive(Debug)]
struct Anchor {
    offset: Cell<usize>,
}

impl StablePosition for Anchor {
    fn offset(&self) -> usize {
        self.offset.get()
    }
}

/// In-memory document with tracked stable positions.
///
/// Inserting `n` characters at `at` moves every position at or after `at`
/// forward by `n`. Deleting `[start, end)` collapses the positions inside the
/// range onto `start` and moves the ones after it back.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    chars: Vec<char>,
    anchors: RefCell<Vec<Weak<Anchor>>>,
    read_only: bool,
}

impl MemoryDocument {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            anchors: RefCell::new(Vec::new()),
            read_only: false,
        }
    }

    /// Refuse every edit with `Error::OperationRejected`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn insert(&mut self, at: usize, text: &str) -> Result<()> {
        self.ensure_editable()?;
        check_range(at, at, self.chars.len())?;
        self.splice(at, at, text);
        Ok(())
    }

    pub fn delete(&mut self, start: usize, end: usize) -> Result<()> {
        self.ensure_editable()?;
        check_range(start, end, self.chars.len())?;
        self.splice(start, end, "");
        Ok(())
    }

    /// Number of positions still referenced by someone.
    pub fn live_positions(&self) -> usize {
        self.anchors
            .borrow()
            .iter()
            .filter(|a| a.strong_count() > 0)
            .count()
    }

    /// Number of positions the document still keeps a handle to.
    #[cfg(test)]
    pub(crate) fn tracked_positions(&self) -> usize {
        self.anchors.borrow().len()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.read_only {
            return Err(Error::OperationRejected {
                reason: "document is read-only".to_string(),
            });
        }
        Ok(())
    }

    /// Removes `[start, end)` then inserts `text` at `start`, moving anchors.
    fn splice(&mut self, start: usize, end: usize, text: &str) {
        let removed = end - start;
        let inserted: Vec<char> = text.chars().collect();
        let added = inserted.len();
        self.chars.splice(start..end, inserted);

        let mut anchors = self.anchors.borrow_mut();
        anchors.retain(|weak| match weak.upgrade() {
            Some(anchor) => {
                let mut offset = anchor.offset.get();
                if offset >= end {
                    offset -= removed;
                } else if offset > start {
                    offset = start;
                }
                if offset >= start && added > 0 {
                    offset += added;
                }
                anchor.offset.set(offset);
                true
            }
            None => false,
        });
        trace!(start, end, added, positions = anchors.len(), "document edited");
    }
}

impl Document for MemoryDocument {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn create_position(&self, offset: usize) -> Result<Position> {
        if offset > self.chars.len() {
            return Err(Error::InvalidOffset {
                offset,
                len: self.chars.len(),
            });
        }
        let anchor = Rc::new(Anchor {
            offset: Cell::new(offset),
        });
        let mut anchors = self.anchors.borrow_mut();
        anchors.retain(|weak| weak.strong_count() > 0);
        anchors.push(Rc::downgrade(&anchor));
        let position: Position = anchor;
        Ok(position)
    }

    fn text(&self, start: usize, end: usize) -> Result<String> {
        check_range(start, end, self.chars.len())?;
        Ok(self.chars[start..end].iter().collect())
    }

    fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        self.ensure_editable()?;
        check_range(start, end, self.chars.len())?;
        self.splice(start, end, text);
        Ok(())
    }

    fn replace_all(&mut self, word: &str, replacement: &str) -> Result<usize> {
        self.ensure_editable()?;
        if word.is_empty() {
            return Err(Error::invalid_argument("word", "cannot replace an empty word"));
        }

        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(word)))?;
        let text: String = self.chars.iter().collect();

        let mut ranges = Vec::new();
        let mut chars_before = 0;
        let mut last_byte = 0;
        for m in pattern.find_iter(&text) {
            chars_before += text[last_byte..m.start()].chars().count();
            let len = m.as_str().chars().count();
            ranges.push((chars_before, chars_before + len));
            chars_before += len;
            last_byte = m.end();
        }

        // Back to front so earlier ranges stay valid.
        for &(start, end) in ranges.iter().rev() {
            self.splice(start, end, replacement);
        }
        Ok(ranges.len())
    }
}

impl fmt::Display for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
