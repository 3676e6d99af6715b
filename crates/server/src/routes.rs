use axum::{
    http::{Method, Uri},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use service::TodoService;

use crate::errors::JsonApiError;

pub mod todos;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
}

impl AppState {
    pub fn new(todos: TodoService) -> Self {
        Self { todos }
    }
}

/// Anything without a matching route or method.
pub async fn not_found(method: Method, uri: Uri) -> JsonApiError {
    JsonApiError::not_found(format!("no route for {} {}", method, uri.path()))
}

/// Build the full application router: todo CRUD and a JSON 404 fallback.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let todo_routes = Router::new()
        .route(
            "/todos",
            get(todos::list_todos)
                .post(todos::create_todo)
                .fallback(not_found),
        )
        .route(
            "/todos/:id",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo)
                .fallback(not_found),
        );

    todo_routes
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
