//! Session transcript.
//!
//! Ordered, append-only record of the turns of one session, seeded with the
//! welcome turn. Turns are stored behind `Arc` so readers can take a
//! snapshot and keep it while the writer continues appending.
//!
//! Writes are crate-private: outside the crate the transcript is read-only,
//! and all mutation goes through the orchestrator's turn guard.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::response::WELCOME_MESSAGE;
use crate::types::{Speaker, Turn};

// =============================================================================
// SessionTranscript
// =============================================================================

/// Append-only turn log for one session.
#[derive(Debug)]
pub struct SessionTranscript {
    session_id: Uuid,
    started_on: NaiveDate,
    turns: RwLock<Vec<Arc<Turn>>>,
}

impl Default for SessionTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTranscript {
    /// Start a session seeded with exactly one assistant welcome turn.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_on: Local::now().date_naive(),
            turns: RwLock::new(vec![Arc::new(welcome_turn())]),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Calendar date the session started on; used to stamp exports.
    pub fn started_on(&self) -> NaiveDate {
        self.started_on
    }

    /// Append a turn at the end of the transcript.
    pub(crate) fn append(&self, turn: Turn) -> Arc<Turn> {
        let turn = Arc::new(turn);
        let mut turns = self.write();
        turns.push(Arc::clone(&turn));
        tracing::debug!(
            session_id = %self.session_id,
            speaker = %turn.speaker,
            len = turns.len(),
            "Turn appended"
        );
        turn
    }

    /// Drop every turn and restore the single welcome turn.
    pub(crate) fn reset(&self) {
        let mut turns = self.write();
        turns.clear();
        turns.push(Arc::new(welcome_turn()));
        tracing::info!(session_id = %self.session_id, "Transcript reset");
    }

    /// Point-in-time copy of the turn list.
    pub fn snapshot(&self) -> Vec<Arc<Turn>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Always false: a transcript holds at least the welcome turn.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn last(&self) -> Option<Arc<Turn>> {
        self.read().last().cloned()
    }

    /// Whether anything beyond the seeded welcome turn has been recorded.
    pub fn has_conversation(&self) -> bool {
        self.len() > 1
    }

    // -- Private helpers --

    // Turns are immutable once pushed, so a poisoned lock still guards a
    // consistent list and can be recovered.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Turn>>> {
        self.turns.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Turn>>> {
        self.turns.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn welcome_turn() -> Turn {
    Turn::new(Speaker::Assistant, WELCOME_MESSAGE)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_welcome_turn() {
        let t = SessionTranscript::new();
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
        assert!(!t.has_conversation());
        let first = t.last().unwrap();
        assert_eq!(first.speaker, Speaker::Assistant);
        assert_eq!(first.content, WELCOME_MESSAGE);
    }

    #[test]
    fn test_started_on_is_today() {
        let t = SessionTranscript::new();
        assert_eq!(t.started_on(), Local::now().date_naive());
    }

    #[test]
    fn test_append_n_turns() {
        let t = SessionTranscript::new();
        for i in 0..5 {
            t.append(Turn::user(format!("message {}", i)));
        }
        assert_eq!(t.len(), 6);
        assert!(t.has_conversation());
    }

    #[test]
    fn test_append_preserves_order() {
        let t = SessionTranscript::new();
        t.append(Turn::user("first"));
        t.append(Turn::assistant("second"));
        t.append(Turn::user("third"));

        let snap = t.snapshot();
        let contents: Vec<&str> = snap.iter().skip(1).map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_returns_stored_turn() {
        let t = SessionTranscript::new();
        let stored = t.append(Turn::user("calories in rice?"));
        assert_eq!(t.last().unwrap().id, stored.id);
    }

    #[test]
    fn test_reset_restores_single_welcome() {
        let t = SessionTranscript::new();
        t.append(Turn::user("a"));
        t.append(Turn::assistant("b"));
        t.reset();
        assert_eq!(t.len(), 1);
        assert_eq!(t.last().unwrap().content, WELCOME_MESSAGE);
    }

    #[test]
    fn test_reset_keeps_session_identity() {
        let t = SessionTranscript::new();
        let id = t.session_id();
        t.reset();
        assert_eq!(t.session_id(), id);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_appends() {
        let t = SessionTranscript::new();
        t.append(Turn::user("before"));
        let snap = t.snapshot();
        t.append(Turn::user("after"));
        assert_eq!(snap.len(), 2);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_concurrent_readers_during_appends() {
        use std::thread;

        let t = Arc::new(SessionTranscript::new());
        let writer = {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for i in 0..100 {
                    t.append(Turn::user(format!("m{}", i)));
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let t = Arc::clone(&t);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let snap = t.snapshot();
                        // Prefix of the final order: welcome, m0, m1, ...
                        for (i, turn) in snap.iter().skip(1).enumerate() {
                            assert_eq!(turn.content, format!("m{}", i));
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(t.len(), 101);
    }
}
