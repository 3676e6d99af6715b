#![cfg(test)]
use std::path::PathBuf;

use crate::todo::Todo;

/// Unique file path under the system temp dir.
pub fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("todo_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
}

pub fn todo(id: &str, title: &str, description: &str) -> Todo {
    Todo {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        completed: false,
    }
}
