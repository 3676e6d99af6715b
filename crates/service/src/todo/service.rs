use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::id::{IdGenerator, RandomHexIdGenerator};
use crate::storage::TodoRepository;
use crate::todo::domain::{NewTodo, Todo, TodoPatch};

/// CRUD over the persisted todo collection.
///
/// Each call loads the full collection from the repository, works on it in
/// memory and, for writes, saves the full collection back. Concurrent writers
/// are not coordinated; the last save wins.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Service minting random 128-bit hex ids.
    pub fn with_random_ids(repo: Arc<dyn TodoRepository>) -> Self {
        Self::new(repo, Arc::new(RandomHexIdGenerator))
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        self.repo.load().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Todo, ServiceError> {
        self.repo
            .load()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("Todo"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewTodo) -> Result<Todo, ServiceError> {
        let (title, description) = input.validate()?;
        let todo = Todo {
            id: self.ids.next_id(),
            title,
            description,
            completed: false,
        };
        let mut todos = self.repo.load().await?;
        todos.push(todo.clone());
        self.repo.save(&todos).await?;
        info!(id = %todo.id, "todo_created");
        Ok(todo)
    }

    /// Lookup comes first, so an unknown id is reported as not found even
    /// when the patch is empty.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, ServiceError> {
        let mut todos = self.repo.load().await?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("Todo"))?;
        if patch.is_empty() {
            return Err(ServiceError::Validation("No change was provided!".into()));
        }
        patch.apply_to(todo);
        let updated = todo.clone();
        self.repo.save(&todos).await?;
        info!(id = %updated.id, completed = updated.completed, "todo_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut todos = self.repo.load().await?;
        let idx = todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("Todo"))?;
        todos.remove(idx);
        self.repo.save(&todos).await?;
        info!(%id, remaining = todos.len(), "todo_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGenerator;
    use crate::storage::{JsonFileStore, MemoryStore};
    use crate::test_support::{temp_path, todo};

    fn memory_service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::new()), Arc::new(SequentialIdGenerator::default()))
    }

    #[tokio::test]
    async fn create_then_get_round_trips() -> Result<(), ServiceError> {
        let svc = memory_service();
        let created = svc.create(NewTodo::new("Buy milk", "2%")).await?;
        assert_eq!(created.id, "todo-1");
        assert!(!created.completed);

        let fetched = svc.get(&created.id).await?;
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.description, "2%");
        Ok(())
    }

    #[tokio::test]
    async fn list_is_stable_without_writes() -> Result<(), ServiceError> {
        let svc = memory_service();
        svc.create(NewTodo::new("a", "b")).await?;
        svc.create(NewTodo::new("c", "d")).await?;
        let first = svc.list().await?;
        let second = svc.list().await?;
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_only_completed_keeps_text() -> Result<(), ServiceError> {
        let svc = memory_service();
        let created = svc.create(NewTodo::new("title", "desc")).await?;

        let done = svc
            .update(&created.id, TodoPatch { completed: Some(true), ..Default::default() })
            .await?;
        assert!(done.completed);
        assert_eq!(done.title, "title");
        assert_eq!(done.description, "desc");

        let undone = svc
            .update(&created.id, TodoPatch { completed: Some(false), ..Default::default() })
            .await?;
        assert!(!undone.completed);
        assert_eq!(svc.get(&created.id).await?, undone);
        Ok(())
    }

    #[tokio::test]
    async fn update_never_changes_id() -> Result<(), ServiceError> {
        let svc = memory_service();
        let created = svc.create(NewTodo::new("a", "b")).await?;
        let updated = svc
            .update(
                &created.id,
                TodoPatch { title: Some("x".into()), description: Some("y".into()), completed: Some(true) },
            )
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "x");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let svc = memory_service();
        match svc.get("nope").await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Todo Not Found!"),
            other => panic!("expected not found, got {other:?}"),
        }
        assert!(matches!(svc.get("nope").await, Err(ServiceError::NotFound(_))));
        let patch = TodoPatch { title: Some("t".into()), ..Default::default() };
        assert!(matches!(svc.update("nope", patch).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update("nope", TodoPatch::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete("nope").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() -> Result<(), ServiceError> {
        let svc = memory_service();
        let a = svc.create(NewTodo::new("a", "a")).await?;
        let b = svc.create(NewTodo::new("b", "b")).await?;
        let c = svc.create(NewTodo::new("c", "c")).await?;

        svc.delete(&b.id).await?;
        let ids: Vec<String> = svc.list().await?.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert!(matches!(svc.get(&b.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn validation_boundaries() -> Result<(), ServiceError> {
        let svc = memory_service();
        let missing = NewTodo { title: Some("t".into()), description: None };
        assert!(matches!(svc.create(missing).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create(NewTodo::new("", "d")).await, Err(ServiceError::Validation(_))));
        assert!(svc.list().await?.is_empty());

        let created = svc.create(NewTodo::new("t", "d")).await?;
        assert!(matches!(
            svc.update(&created.id, TodoPatch::default()).await,
            Err(ServiceError::Validation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn storage_errors_propagate() -> Result<(), anyhow::Error> {
        let tmp = temp_path("svc_broken");
        tokio::fs::write(&tmp, "not json").await?;
        let svc = TodoService::with_random_ids(Arc::new(JsonFileStore::new(&tmp)));
        assert!(matches!(svc.list().await, Err(ServiceError::Storage(_))));
        assert!(matches!(svc.create(NewTodo::new("a", "b")).await, Err(ServiceError::Storage(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_backed_state_survives_reopen() -> Result<(), anyhow::Error> {
        let tmp = temp_path("svc_reopen");
        let svc = TodoService::with_random_ids(JsonFileStore::init(&tmp).await?);
        let created = svc.create(NewTodo::new("persist", "me")).await?;
        assert_eq!(created.id.len(), 32);

        let reopened = TodoService::with_random_ids(JsonFileStore::init(&tmp).await?);
        assert_eq!(reopened.get(&created.id).await?, created);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn preloaded_collection_is_served() -> Result<(), ServiceError> {
        let repo = MemoryStore::with_todos(vec![todo("x", "seeded", "row")]);
        let svc = TodoService::with_random_ids(Arc::new(repo));
        assert_eq!(svc.get("x").await?.title, "seeded");
        Ok(())
    }
}
