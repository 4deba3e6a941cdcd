//! Application state for the Commission Engine API.

use std::sync::Arc;

use crate::engine::CommissionEngine;

/// Shared application state.
///
/// Holds the engine, and with it the commission policy, for every handler.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<CommissionEngine>,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: CommissionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &CommissionEngine {
        &self.engine
    }
}
