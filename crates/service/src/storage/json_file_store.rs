use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::TodoRepository;
use crate::todo::Todo;

/// JSON file holding the todo array.
///
/// Nothing is cached: every `load` reads the file and every `save` rewrites
/// it, so the file stays the only source of truth across restarts.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Wrap a path without touching the filesystem.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    /// Initialize the store from a path. Creates the file with an empty
    /// array if missing; an existing file is left as is. The parent
    /// directory must already exist.
    pub async fn init<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = Self::new(path);
        match fs::metadata(&store.file_path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&store.file_path, b"[]")
                    .await
                    .map_err(|e| ServiceError::storage("seed todo file", e))?;
                info!(path = %store.file_path.display(), "created empty todo file");
            }
            Err(e) => return Err(ServiceError::storage("stat todo file", e)),
        }
        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl TodoRepository for JsonFileStore {
    async fn load(&self) -> Result<Vec<Todo>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::storage("read todo file", e))?;
        let todos: Vec<Todo> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::storage("parse todo file", e))?;
        debug!(path = %self.file_path.display(), count = todos.len(), "loaded todos");
        Ok(todos)
    }

    async fn save(&self, todos: &[Todo]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(todos)
            .map_err(|e| ServiceError::storage("encode todos", e))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::storage("write todo file", e))?;
        debug!(path = %self.file_path.display(), count = todos.len(), "saved todos");
        Ok(())
    }
}
