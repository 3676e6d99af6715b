//! Service layer for the todo collection.
//! - `todo` holds the domain types and the CRUD service.
//! - `storage` abstracts where the collection is persisted.
//! - `id` abstracts how new todo ids are minted.

pub mod errors;
pub mod id;
pub mod storage;
pub mod todo;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use todo::{NewTodo, Todo, TodoPatch, TodoService};
