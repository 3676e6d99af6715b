use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::TodoRepository;
use crate::todo::Todo;

/// In-process collection, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self { inner: RwLock::new(todos) }
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn load(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, todos: &[Todo]) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        *guard = todos.to_vec();
        Ok(())
    }
}
