//! Test utilities and mock types for doomsuite development.
//!
//! Provides [`MockEngine`], a scripted [`GameEngine`](doomsuite_core::GameEngine)
//! that records every call, and small fixtures for building variable
//! histories.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod mock_engine;

pub use mock_engine::{EngineCall, FailPoint, MockEngine, ScriptedStep};

use doomsuite_core::{VariableHistory, VariableSnapshot};

/// Build a history of the given capacity from rows of variables,
/// oldest first.
pub fn history_of(capacity: usize, rows: &[&[f64]]) -> VariableHistory {
    let mut history = VariableHistory::new(capacity);
    for row in rows {
        history.push(VariableSnapshot::new(row.iter().copied()));
    }
    history
}
