//! Undo/redo journal.
//!
//! Each entry pairs an `ActionRecord` with snapshots taken just before and
//! just after the action. Snapshots are expected to be cheap to clone (the
//! board keeps its state in `im` vectors), so the journal simply stores them.

use im::Vector;

use crate::core::ActionRecord;

#[derive(Clone, Debug)]
struct Entry<S> {
    record: ActionRecord,
    before: S,
    after: S,
}

/// Linear undo/redo history over snapshots of type `S`.
///
/// ```
/// use titan_circuits::core::{Action, ActionRecord, NodeId, Player};
/// use titan_circuits::rules::History;
///
/// let mut history: History<u32> = History::new();
/// let record = ActionRecord::new(Player::Red, Action::Place { node: NodeId(0) }, 1);
/// history.record(record.clone(), 0, 1);
///
/// assert_eq!(history.undo(), Some((record.clone(), 0)));
/// assert_eq!(history.redo(), Some((record, 1)));
/// ```
#[derive(Clone, Debug)]
pub struct History<S: Clone> {
    done: Vector<Entry<S>>,
    undone: Vector<Entry<S>>,
}

impl<S: Clone> Default for History<S> {
    fn default() -> Self {
        Self {
            done: Vector::new(),
            undone: Vector::new(),
        }
    }
}

impl<S: Clone> History<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal a completed action. Clears anything that could be redone.
    pub fn record(&mut self, record: ActionRecord, before: S, after: S) {
        self.undone.clear();
        self.done.push_back(Entry { record, before, after });
    }

    /// Step back one action, returning it with the state to restore.
    pub fn undo(&mut self) -> Option<(ActionRecord, S)> {
        let entry = self.done.pop_back()?;
        let restored = (entry.record.clone(), entry.before.clone());
        self.undone.push_back(entry);
        Some(restored)
    }

    /// Step forward one undone action, returning it with the state to restore.
    pub fn redo(&mut self) -> Option<(ActionRecord, S)> {
        let entry = self.undone.pop_back()?;
        let restored = (entry.record.clone(), entry.after.clone());
        self.done.push_back(entry);
        Some(restored)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Actions currently applied, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.done.iter().map(|entry| &entry.record)
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}
