//! Domain models for the todo service.
//!
//! - [`Todo`]: the persisted entity, identified by a store-assigned UUID.
//! - [`TodoFields`]: the untrusted `{title, done}` body of a create or update.
//! - [`NewTodo`]: fields that passed [`TodoFields::validate`] and may be written.

mod todo;

pub use todo::*;
