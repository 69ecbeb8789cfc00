use crate::{Timestamp, NEVER_UPDATED};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatermarkError {
    #[error("failed to persist watermark: {0}")]
    Persist(String),
}

/// Persisted "last notified release" timestamp.
///
/// Only the background poll writes it, so implementations need no locking
/// beyond what `Send` requires.
pub trait WatermarkStore: Send {
    /// Stored value, or [`NEVER_UPDATED`] if nothing was ever stored.
    fn get(&self) -> Timestamp;
    fn set(&mut self, timestamp: Timestamp) -> Result<(), WatermarkError>;
}

/// Process-local store, handy for tests and dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryWatermarkStore {
    value: Timestamp,
    writes: usize,
    fail_writes: bool,
}

impl Default for InMemoryWatermarkStore {
    fn default() -> Self {
        Self::new(NEVER_UPDATED)
    }
}

impl InMemoryWatermarkStore {
    pub fn new(value: Timestamp) -> Self {
        Self {
            value,
            writes: 0,
            fail_writes: false,
        }
    }

    /// A store whose `set` always fails, leaving the value untouched.
    pub fn failing(value: Timestamp) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(value)
        }
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl WatermarkStore for InMemoryWatermarkStore {
    fn get(&self) -> Timestamp {
        self.value
    }

    fn set(&mut self, timestamp: Timestamp) -> Result<(), WatermarkError> {
        if self.fail_writes {
            return Err(WatermarkError::Persist("store is read-only".into()));
        }
        self.value = timestamp;
        self.writes += 1;
        Ok(())
    }
}
