//! Visualization sinks

use crate::FocusSnapshot;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives full chart snapshots
pub trait VisualizationSink: Send {
    fn publish(&mut self, snapshot: &FocusSnapshot);
}

/// Sink that keeps every published snapshot in memory.
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    published: Arc<Mutex<Vec<FocusSnapshot>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<FocusSnapshot> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn latest(&self) -> Option<FocusSnapshot> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl VisualizationSink for MemorySink {
    fn publish(&mut self, snapshot: &FocusSnapshot) {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
    }
}
