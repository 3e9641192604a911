pub mod memory;

pub use memory::MemoryDocument;

use crate::Result;
use std::fmt;
use std::rc::Rc;

/// An offset into a document that follows edits made elsewhere in the text.
///
/// Positions are read on demand: `offset()` always reflects the document as
/// it is now, not as it was when the position was created. Two positions are
/// only ever compared through their current offsets.
pub trait StablePosition: fmt::Debug {
    fn offset(&self) -> usize;
}

/// Shared handle to a stable position.
pub type Position = Rc<dyn StablePosition>;

/// The host document model consumed by a spellcheck session.
///
/// Offsets count characters, not bytes. Ranges are half-open.
pub trait Document {
    /// Number of characters in the document.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a position bound to `offset`.
    ///
    /// Fails with `Error::InvalidOffset` outside `[0, len]`.
    fn create_position(&self, offset: usize) -> Result<Position>;

    /// Text between `start` and `end`.
    fn text(&self, start: usize, end: usize) -> Result<String>;

    /// Replace the characters in `[start, end)` with `text`.
    fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<()>;

    /// Replace every whole-word, case-sensitive occurrence of `word`.
    ///
    /// Returns the number of replacements made.
    fn replace_all(&mut self, word: &str, replacement: &str) -> Result<usize>;
}

/// Fails with `Error::InvalidOffset` unless `start <= end <= len`.
pub fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
    if end > len {
        return Err(crate::Error::InvalidOffset { offset: end, len });
    }
    if start > end {
        return Err(crate::Error::InvalidOffset { offset: start, len });
    }
    Ok(())
}
