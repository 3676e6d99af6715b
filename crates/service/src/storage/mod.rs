//! Storage abstractions for the todo collection.
//!
//! The service reads the whole collection, mutates it in memory and writes
//! the whole collection back; backends only need `load` and `save`.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::todo::Todo;

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Whole-collection persistence for todos.
/// Implementations can be file-backed, in-memory, or database-backed.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn save(&self, todos: &[Todo]) -> Result<(), ServiceError>;
}
