//! Browser-history mirroring.
//!
//! Every normal `show_section` transition is mirrored into the host's
//! navigation history as a serialized `{ "index": n }` record plus a
//! `#<index>` fragment, so browser back/forward traverses sections. The
//! host surface is the [`HistorySink`] trait; [`MemoryHistory`] is the
//! in-memory implementation used by tests.
//!
//! The first recorded transition replaces the current entry instead of
//! pushing, so the landing state does not leave a stale extra entry on
//! the stack.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The state record attached to each history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub index: usize,
}

/// Whether an entry replaced the current one or was pushed on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOp {
    Replace,
    Push,
}

/// Host surface for history mirroring. `state` is the serialized
/// [`HistoryState`] JSON; `fragment` is the URL fragment (with `#`).
pub trait HistorySink {
    fn replace(&mut self, state: &str, fragment: &str);
    fn push(&mut self, state: &str, fragment: &str);
}

/// Drives a [`HistorySink`]: replace on the first transition, push on
/// every later one. Replay suppression is the caller's job (the viewer
/// only records while in normal navigation mode).
pub struct HistorySync {
    sink: Box<dyn HistorySink>,
    primed: bool,
}

impl HistorySync {
    pub fn new(sink: Box<dyn HistorySink>) -> Self {
        Self {
            sink,
            primed: false,
        }
    }

    /// Record a transition to `index`.
    pub fn record(&mut self, index: usize) {
        let state = HistoryState { index };
        let json = match serde_json::to_string(&state) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize history state: {e}");
                return;
            },
        };
        let fragment = format!("#{index}");
        if self.primed {
            self.sink.push(&json, &fragment);
        } else {
            self.sink.replace(&json, &fragment);
            self.primed = true;
        }
    }
}

/// Parse the state record carried by a history entry. Malformed or
/// absent state yields `None`; the caller falls back to the fragment.
pub fn parse_state(state: Option<&str>) -> Option<HistoryState> {
    let raw = state?;
    match serde_json::from_str(raw) {
        Ok(state) => Some(state),
        Err(e) => {
            log::debug!("ignoring malformed history state {raw:?}: {e}");
            None
        },
    }
}

// -----------------------------------------------------------------------
// In-memory sink
// -----------------------------------------------------------------------

/// One recorded history operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub op: HistoryOp,
    pub state: String,
    pub fragment: String,
}

/// A fully in-memory history sink. Clones share the same entry log, so
/// a test can keep a handle while the viewer owns the sink.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<HistoryEntry>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.borrow().clone()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<HistoryEntry> {
        self.entries.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl HistorySink for MemoryHistory {
    fn replace(&mut self, state: &str, fragment: &str) {
        let mut entries = self.entries.borrow_mut();
        entries.push(HistoryEntry {
            op: HistoryOp::Replace,
            state: state.to_string(),
            fragment: fragment.to_string(),
        });
    }

    fn push(&mut self, state: &str, fragment: &str) {
        let mut entries = self.entries.borrow_mut();
        entries.push(HistoryEntry {
            op: HistoryOp::Push,
            state: state.to_string(),
            fragment: fragment.to_string(),
        });
    }
}
