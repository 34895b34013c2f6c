use super::backend::StorageBackend;
use crate::error::{PokedexError, Result};
use crate::model::Record;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory storage backend.
///
/// Holds the last saved snapshot so tests can observe what a store wrote
/// through, and can be told to fail writes to exercise error handling.
#[derive(Default)]
pub struct MemBackend {
    saved: Mutex<Vec<Record>>,
    simulate_write_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Vec<Record>> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| PokedexError::Store("memory backend lock poisoned".to_string()))?;
        Ok(saved.clone())
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(PokedexError::Store("Simulated write error".to_string()));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| PokedexError::Store("memory backend lock poisoned".to_string()))?;
        *saved = records.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory://records".to_string()
    }
}
