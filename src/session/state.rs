//! Resume and wrap-around bookkeeping for one spellcheck session.

use crate::document::{Document, Position};
use crate::ignore::IgnoredWord;
use crate::traversal::Traversal;
use crate::{Problem, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Started, but nothing has been found yet.
    FirstMatchPending,
    Active,
    /// The document has no unresolved problem left, or the scan came back
    /// around to where it started.
    Done,
}

/// Where the session started, what it reported last and whether the scan has
/// gone past the end of the document since.
#[derive(Debug, Default)]
pub struct SessionState {
    phase: Phase,
    start: Option<Position>,
    current: Option<IgnoredWord>,
    wrapped: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The match reported last, at its current offsets.
    pub fn current(&self) -> Option<&IgnoredWord> {
        self.current.as_ref()
    }

    /// Offset of the first match of the session, as currently resolved.
    pub fn start_offset(&self) -> Option<usize> {
        self.start.as_ref().map(|start| start.offset())
    }

    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    /// Start a new manual spellcheck.
    pub fn begin(&mut self) {
        debug!("beginning spellcheck session");
        self.start = None;
        self.current = None;
        self.wrapped = false;
        self.phase = Phase::FirstMatchPending;
    }

    /// Find the next problem after the current one, wrapping to the top of
    /// the document once.
    ///
    /// With `detect_wrap`, a match at or after the session start found after
    /// wrapping ends the session instead of being reported.
    pub fn find_next(
        &mut self,
        doc: &dyn Document,
        traversal: &mut Traversal<'_>,
        detect_wrap: bool,
    ) -> Result<Option<Problem>> {
        if matches!(self.phase, Phase::Idle | Phase::Done) {
            self.begin();
        }

        let len = doc.len();
        let resume = self
            .current
            .as_ref()
            .map_or(0, |current| current.end().min(len));

        let mut found = traversal.scan(doc, resume, len)?;
        if found.is_none() {
            found = traversal.scan(doc, 0, resume)?;
            if found.is_some() {
                debug!(resume, "wrapped to the top of the document");
                self.wrapped = true;
            }
        }

        let Some(problem) = found else {
            self.finish();
            return Ok(None);
        };

        if let Some(current) = &self.current {
            if current.probably_same(&problem) || problem.start < current.start() {
                self.wrapped = true;
            }
        }

        if detect_wrap && self.wrapped {
            if let Some(start) = self.start_offset() {
                if problem.start >= start {
                    debug!(start, found = problem.start, "scan is back at the session start");
                    self.finish();
                    return Ok(None);
                }
            }
        }

        if self.phase == Phase::FirstMatchPending {
            self.start = Some(doc.create_position(problem.start)?);
            self.wrapped = false;
            self.phase = Phase::Active;
        }
        self.current = Some(IgnoredWord::from_problem(doc, &problem)?);

        Ok(Some(problem))
    }

    /// Forget everything and go back to `Idle`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn finish(&mut self) {
        debug!("spellcheck session done");
        self.start = None;
        self.current = None;
        self.wrapped = false;
        self.phase = Phase::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanOptions;
    use crate::ignore::{IgnoreSet, WordList};
    use crate::testing::{dotted, MarkedChecker};
    use crate::MemoryDocument;

    struct Harness {
        state: SessionState,
        checker: MarkedChecker,
        ignored: IgnoreSet,
        words: WordList,
        options: ScanOptions,
    }

    impl Harness {
        fn new(misspelled: &[&str]) -> Self {
            Self {
                state: SessionState::new(),
                checker: MarkedChecker::new(misspelled),
                ignored: IgnoreSet::new(),
                words: WordList::new(),
                options: ScanOptions::default(),
            }
        }

        fn next(&mut self, doc: &MemoryDocument) -> Option<usize> {
            let mut traversal =
                Traversal::new(&self.checker, &mut self.ignored, &self.words, &self.options);
            self.state
                .find_next(doc, &mut traversal, self.options.detect_wrap)
                .unwrap()
                .map(|problem| problem.start)
        }
    }

    #[test]
    fn test_single_problem_terminates_after_wrap() {
        let doc = MemoryDocument::new(&dotted(40, &[(5, "zzz")]));
        let mut harness = Harness::new(&["zzz"]);

        assert_eq!(harness.next(&doc), Some(5));
        assert_eq!(harness.state.phase(), Phase::Active);
        assert_eq!(harness.state.start_offset(), Some(5));

        assert_eq!(harness.next(&doc), None);
        assert_eq!(harness.state.phase(), Phase::Done);
        assert!(harness.state.current().is_none());
        assert!(harness.state.start_offset().is_none());
    }

    #[test]
    fn test_walks_forward_then_stops_at_start() {
        let doc = MemoryDocument::new(&dotted(60, &[(3, "aaa"), (20, "bbb"), (40, "ccc")]));
        let mut harness = Harness::new(&["aaa", "bbb", "ccc"]);

        assert_eq!(harness.next(&doc), Some(3));
        assert_eq!(harness.next(&doc), Some(20));
        assert_eq!(harness.next(&doc), Some(40));
        assert!(!harness.state.wrapped());
        assert_eq!(harness.next(&doc), None);
    }

    #[test]
    fn test_problem_before_session_start_is_reported_after_wrap() {
        let mut doc = MemoryDocument::new(&dotted(30, &[(10, "zzz")]));
        let mut harness = Harness::new(&["zzz", "yyy"]);

        assert_eq!(harness.next(&doc), Some(10));

        doc.replace(2, 5, "yyy").unwrap();
        assert_eq!(harness.next(&doc), Some(2));
        assert!(harness.state.wrapped());
        assert_eq!(harness.state.start_offset(), Some(10));

        assert_eq!(harness.next(&doc), None);
        assert_eq!(harness.state.phase(), Phase::Done);
    }

    #[test]
    fn test_done_restarts_from_the_top() {
        let doc = MemoryDocument::new(&dotted(30, &[(12, "zzz")]));
        let mut harness = Harness::new(&["zzz"]);

        assert_eq!(harness.next(&doc), Some(12));
        assert_eq!(harness.next(&doc), None);
        assert_eq!(harness.next(&doc), Some(12));
        assert_eq!(harness.state.phase(), Phase::Active);
    }

    #[test]
    fn test_empty_document_is_done_immediately() {
        let doc = MemoryDocument::new("");
        let mut harness = Harness::new(&["zzz"]);

        assert_eq!(harness.next(&doc), None);
        assert_eq!(harness.state.phase(), Phase::Done);
        assert!(harness.checker.requests().is_empty());
    }

    #[test]
    fn test_without_wrap_detection_matches_repeat() {
        let doc = MemoryDocument::new(&dotted(40, &[(5, "zzz")]));
        let mut harness = Harness::new(&["zzz"]);
        harness.options.detect_wrap = false;

        assert_eq!(harness.next(&doc), Some(5));
        assert_eq!(harness.next(&doc), Some(5));
        assert!(harness.state.wrapped());
        assert_eq!(harness.next(&doc), Some(5));
    }

    #[test]
    fn test_unset_start_never_suppresses() {
        let doc = MemoryDocument::new(&dotted(40, &[(5, "zzz")]));
        let mut harness = Harness::new(&["zzz"]);

        assert_eq!(harness.next(&doc), Some(5));
        harness.state.start = None;
        assert_eq!(harness.next(&doc), Some(5));
        assert!(harness.state.wrapped());
    }

    #[test]
    fn test_resume_follows_edits_before_current() {
        let mut doc = MemoryDocument::new(&dotted(40, &[(5, "aaa"), (20, "bbb")]));
        let mut harness = Harness::new(&["aaa", "bbb"]);

        assert_eq!(harness.next(&doc), Some(5));
        doc.insert(0, "....").unwrap();
        assert_eq!(harness.state.current().map(IgnoredWord::start), Some(9));
        assert_eq!(harness.next(&doc), Some(24));
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let doc = MemoryDocument::new(&dotted(40, &[(5, "zzz")]));
        let mut harness = Harness::new(&["zzz"]);

        harness.next(&doc);
        harness.state.clear();
        assert_eq!(harness.state.phase(), Phase::Idle);
        assert!(harness.state.current().is_none());
        assert_eq!(harness.next(&doc), Some(5));
    }
}
