pub mod domain;
pub mod service;

pub use domain::{NewTodo, Todo, TodoPatch};
pub use service::TodoService;
