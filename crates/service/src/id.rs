//! Id minting for new todos.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Produces opaque, unique identifiers for new records.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 128 random bits rendered as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomHexIdGenerator;

impl IdGenerator for RandomHexIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic `todo-1`, `todo-2`, ... ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self { Self::new("todo") }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
