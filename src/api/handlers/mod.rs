use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::StoreError;
use crate::models::{Todo, TodoFields};
use crate::store::TodoStore;

// ============================================================
// Error Handling
// ============================================================

/// Everything a todo handler can answer with besides success.
///
/// Absence is decided by the handler. Store failures pass through untouched
/// and are rendered here.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    /// The request body could not be read as JSON at all.
    BadBody(String),
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let e = match self {
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::BadBody(message) => {
                tracing::warn!("Unreadable request body: {}", message);
                return (StatusCode::BAD_REQUEST, Json(json!({ "message": message })))
                    .into_response();
            }
            Self::Store(e) => e,
        };

        // Backend details stay in the log.
        let message = match &e {
            StoreError::Validation(_) | StoreError::InvalidId(_) => {
                tracing::warn!("Request failed: {}", e);
                e.to_string()
            }
            StoreError::Backend(inner) => {
                tracing::error!("Internal error: {:#}", inner);
                "Internal server error".to_string()
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": message })),
        )
            .into_response()
    }
}

// ============================================================
// Request Body
// ============================================================

/// The `{title, done}` body of a create or update.
///
/// An empty or `null` body carries no fields, so it fails validation in the
/// store like any other incomplete body. The content type is not checked.
pub struct FieldsBody(pub TodoFields);

impl<S: Send + Sync> FromRequest<S> for FieldsBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadBody(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(TodoFields::default()));
        }

        serde_json::from_slice::<Option<TodoFields>>(&bytes)
            .map(|fields| Self(fields.unwrap_or_default()))
            .map_err(|e| ApiError::BadBody(format!("Malformed JSON body: {e}")))
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ============================================================
// Todos
// ============================================================

pub async fn create_todo<S: TodoStore>(
    State(store): State<S>,
    FieldsBody(fields): FieldsBody,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = store.create(fields).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos<S: TodoStore>(State(store): State<S>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.find_all().await?))
}

pub async fn get_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
    FieldsBody(fields): FieldsBody,
) -> Result<Json<Todo>, ApiError> {
    store
        .update_by_id(&id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    store
        .delete_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
