//! The persistence boundary handlers talk to.

use std::future::Future;

use uuid::Uuid;

use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::{Todo, TodoFields};

/// Async CRUD over the todo collection.
///
/// Validation happens inside the store, before anything is written. Lookups
/// by id return `Ok(None)` when nothing matches; a malformed id is
/// [`StoreError::InvalidId`].
pub trait TodoStore: Clone + Send + Sync + 'static {
    fn create(&self, fields: TodoFields) -> impl Future<Output = StoreResult<Todo>> + Send;

    /// All todos in insertion order.
    fn find_all(&self) -> impl Future<Output = StoreResult<Vec<Todo>>> + Send;

    fn find_by_id(&self, id: &str) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;

    fn update_by_id(
        &self,
        id: &str,
        fields: TodoFields,
    ) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;

    /// Returns the deleted todo's last state.
    fn delete_by_id(&self, id: &str) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;
}

/// Parse a caller-supplied identifier.
pub fn parse_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

impl Database {
    /// Run a blocking database call off the async executor.
    async fn blocking<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        let result = tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(anyhow::Error::from)?;
        Ok(result?)
    }
}

impl TodoStore for Database {
    async fn create(&self, fields: TodoFields) -> StoreResult<Todo> {
        let input = fields.validate()?;
        let todo = self.blocking(move |db| db.create_todo(input)).await?;
        tracing::debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        self.blocking(|db| db.get_all_todos()).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Todo>> {
        let id = parse_id(id)?;
        self.blocking(move |db| db.get_todo(id)).await
    }

    async fn update_by_id(&self, id: &str, fields: TodoFields) -> StoreResult<Option<Todo>> {
        let input = fields.validate()?;
        let id = parse_id(id)?;
        self.blocking(move |db| db.update_todo(id, input)).await
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Todo>> {
        let id = parse_id(id)?;
        self.blocking(move |db| db.delete_todo(id)).await
    }
}
