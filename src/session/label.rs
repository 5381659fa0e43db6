// Manual labeling session
// Owns the pick table and the traversal position for one annotation pass.
// The annotator UI composes this with a TraceSource and a plot; nothing
// here blocks on input or renders anything.

use std::path::Path;
use thiserror::Error;

use crate::picks::{Pick, PickSet, PickStoreError};
use crate::trace::TraceId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session has no traces")]
    Empty,

    #[error("trace index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Store(#[from] PickStoreError),
}

/// One annotator's pass over a pick table.
///
/// Starts at the table's resume point, so reopening a half-labeled table
/// continues at the first unlabeled trace. All navigation is bounds-safe;
/// the only I/O is [`LabelSession::save`].
#[derive(Debug)]
pub struct LabelSession {
    picks: PickSet,
    index: usize,
}

impl LabelSession {
    pub fn new(picks: PickSet) -> Self {
        let index = picks.resume_point();
        LabelSession { picks, index }
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Current traversal position
    pub fn position(&self) -> usize {
        self.index
    }

    /// Identifier of the trace under the cursor
    pub fn current_id(&self) -> Option<&TraceId> {
        self.picks.row(self.index).map(|p| &p.id)
    }

    /// Pick recorded for the trace under the cursor
    pub fn current_pick(&self) -> Option<&Pick> {
        self.picks.row(self.index)
    }

    /// Record an onset for the current trace
    pub fn mark(&mut self, sample: usize) -> Result<(), SessionError> {
        if !self.picks.set_at(self.index, Some(sample)) {
            return Err(SessionError::Empty);
        }
        Ok(())
    }

    /// Reset the current trace to the sentinel
    pub fn clear(&mut self) -> Result<(), SessionError> {
        if !self.picks.set_at(self.index, None) {
            return Err(SessionError::Empty);
        }
        Ok(())
    }

    /// Step forward; no-op on the last trace
    pub fn next(&mut self) {
        if self.index + 1 < self.picks.len() {
            self.index += 1;
        }
    }

    /// Step backward; no-op on the first trace
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Jump to a trace by table position
    pub fn jump(&mut self, index: usize) -> Result<(), SessionError> {
        if index < self.picks.len() {
            self.index = index;
            Ok(())
        } else {
            Err(SessionError::OutOfRange {
                index,
                len: self.picks.len(),
            })
        }
    }

    /// Persist the full table
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        self.picks.persist(path)?;
        Ok(())
    }

    pub fn picks(&self) -> &PickSet {
        &self.picks
    }

    pub fn into_picks(self) -> PickSet {
        self.picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picks::PickSource;
    use tempfile::TempDir;

    fn ids(n: usize) -> Vec<TraceId> {
        TraceId::for_file("Exp_T1", "Run1", "EventID_5_x", n)
    }

    #[test]
    fn test_fresh_session_starts_at_zero() {
        let session = LabelSession::new(PickSet::create(PickSource::Manual, ids(3)));
        assert_eq!(session.position(), 0);
        assert_eq!(session.current_id().unwrap().trace_index(), 1);
    }

    #[test]
    fn test_session_resumes_at_first_sentinel() {
        let all = ids(5);
        let mut set = PickSet::create(PickSource::Manual, all.clone());
        for id in &all[..3] {
            set.set(id, Some(42)).unwrap();
        }

        let session = LabelSession::new(set);
        assert_eq!(session.position(), 3);
    }

    #[test]
    fn test_mark_clear_and_navigate() {
        let mut session = LabelSession::new(PickSet::create(PickSource::Manual, ids(3)));

        session.mark(512).unwrap();
        assert_eq!(session.current_pick().unwrap().sample, Some(512));

        session.next();
        assert_eq!(session.position(), 1);
        session.mark(99).unwrap();
        session.clear().unwrap();
        assert!(session.current_pick().unwrap().is_sentinel());

        session.previous();
        session.previous();
        assert_eq!(session.position(), 0);

        session.jump(2).unwrap();
        assert_eq!(session.position(), 2);
        assert!(matches!(
            session.jump(3),
            Err(SessionError::OutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_empty_session_mark_fails() {
        let mut session = LabelSession::new(PickSet::create(PickSource::Manual, Vec::new()));
        assert!(session.is_empty());
        assert!(session.current_id().is_none());
        assert!(matches!(session.mark(5), Err(SessionError::Empty)));
    }

    #[test]
    fn test_save_and_reopen_continues_labeling() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p_picks_Exp_T1_Run1_EventID_5.csv");

        let all = ids(4);
        let mut session = LabelSession::new(PickSet::create(PickSource::Manual, all.clone()));
        session.mark(100).unwrap();
        session.next();
        session.mark(200).unwrap();
        session.save(&path).unwrap();

        let reopened = LabelSession::new(PickSet::load_or_create(
            &path,
            PickSource::Manual,
            all,
        ));
        assert_eq!(reopened.position(), 2);
        assert_eq!(reopened.picks().sentinel_count(), 2);
    }
}
