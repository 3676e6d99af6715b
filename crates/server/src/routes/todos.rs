use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use common::types::Message;
use service::{NewTodo, Todo, TodoPatch};

use crate::errors::JsonApiError;
use crate::routes::AppState;

/// Body of a successful create: `{"todo": {...}}`.
#[derive(Debug, Serialize)]
pub struct CreatedTodo {
    pub todo: Todo,
}

/// List every todo
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, JsonApiError> {
    Ok(Json(state.todos.list().await?))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, JsonApiError> {
    Ok(Json(state.todos.get(&id).await?))
}

/// Create a todo; the generated id comes back inside the record.
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedTodo>), JsonApiError> {
    let Json(input) = payload?;
    let todo = state.todos.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedTodo { todo })))
}

/// Apply the supplied fields to an existing todo
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, JsonApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.todos.update(&id, patch).await?))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    state.todos.delete(&id).await?;
    Ok(Json(Message::new("Todo deleted successfully")))
}
