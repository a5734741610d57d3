mod handlers;

pub use handlers::ApiError;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::TodoStore;

/// Build the HTTP router over any [`TodoStore`].
///
/// The collection root answers both with and without a trailing slash.
pub fn create_router<S: TodoStore>(store: S, cors: CorsLayer) -> Router {
    let collection = || get(handlers::list_todos::<S>).post(handlers::create_todo::<S>);

    Router::new()
        .route("/todos", collection())
        .route("/todos/", collection())
        .route(
            "/todos/{id}",
            get(handlers::get_todo::<S>)
                .put(handlers::update_todo::<S>)
                .delete(handlers::delete_todo::<S>),
        )
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(store)
}
