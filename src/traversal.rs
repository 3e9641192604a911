//! Windowed scanning for the next unresolved problem.
//!
//! A range is walked in fixed-size windows. Each window asks the checker
//! about a slightly wider, padded range so words cut by the window edge are
//! seen whole, but only problems that *start* inside the window itself are
//! accepted. A word straddling an edge therefore belongs to exactly one
//! window: the one holding its first character.

use crate::checker::TextChecker;
use crate::config::ScanOptions;
use crate::document::{check_range, Document};
use crate::ignore::{IgnoreSet, WordList};
use crate::{Error, Problem, Result};
use tracing::{debug, trace};

pub struct Traversal<'a> {
    checker: &'a dyn TextChecker,
    ignored: &'a mut IgnoreSet,
    words: &'a WordList,
    window: usize,
    padding: usize,
}

impl<'a> Traversal<'a> {
    pub fn new(
        checker: &'a dyn TextChecker,
        ignored: &'a mut IgnoreSet,
        words: &'a WordList,
        options: &ScanOptions,
    ) -> Self {
        Self {
            checker,
            ignored,
            words,
            window: options.window,
            padding: options.padding,
        }
    }

    /// First problem starting in `[start, end)` that is not ignored.
    ///
    /// A checker failure aborts the scan: skipping the chunk could hide a
    /// real problem.
    pub fn scan(&mut self, doc: &dyn Document, start: usize, end: usize) -> Result<Option<Problem>> {
        let len = doc.len();
        check_range(start, end, len)?;
        if self.window == 0 {
            return Err(Error::invalid_argument("window", "scan window must be positive"));
        }

        debug!(start, end, "checking range");
        let mut window_start = start;
        while window_start < end {
            let window_end = window_start.saturating_add(self.window).min(end);
            if let Some(problem) = self.scan_window(doc, window_start, window_end, len)? {
                debug!(word = %problem.word, start = problem.start, "found problem");
                return Ok(Some(problem));
            }
            window_start = window_end;
        }

        Ok(None)
    }

    fn scan_window(
        &mut self,
        doc: &dyn Document,
        start: usize,
        end: usize,
        len: usize,
    ) -> Result<Option<Problem>> {
        let padded_start = start.saturating_sub(self.padding);
        let padded_end = end.saturating_add(self.padding).min(len);
        trace!(start, end, padded_start, padded_end, "checking window");

        for chunk in self.checker.checkable_chunks(doc, padded_start, padded_end)? {
            let Some(mut problems) = self.checker.check(&chunk)? else {
                continue;
            };
            problems.sort_by_key(|problem| problem.start);

            for problem in problems {
                if problem.start < start || problem.start >= end {
                    continue;
                }
                if self.is_ignored(doc, &problem)? {
                    trace!(word = %problem.word, start = problem.start, "skipping ignored word");
                    continue;
                }
                return Ok(Some(problem));
            }
        }

        Ok(None)
    }

    fn is_ignored(&mut self, doc: &dyn Document, problem: &Problem) -> Result<bool> {
        if self.words.contains(problem) {
            return Ok(true);
        }
        self.ignored.is_ignored(doc, problem)
    }
}
