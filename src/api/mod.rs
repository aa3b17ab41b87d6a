//! The user API: route table, handlers and generated documentation.

use std::sync::Arc;

use crate::request::Request;
use crate::router::Router;
use crate::store::UserStore;

pub mod docs;
pub mod error;
pub mod users;

pub use error::{ApiError, ErrorBody};

/// State every API handler receives.
pub type AppState = Arc<UserStore>;

pub const WELCOME: &str = "Welcome to the API server! Visit /api-docs for Swagger UI.";

/// Builds the full route table over `store`.
pub fn router(store: AppState) -> Router<AppState> {
    Router::with_state(store)
        .get("/", welcome)
        .get("/api/users", users::list_users)
        .post("/api/users", users::create_user)
        .get("/api/users/{id}", users::get_user)
        .put("/api/users/{id}", users::update_user)
        .delete("/api/users/{id}", users::delete_user)
        .get("/api-docs", docs::swagger_ui)
        .get("/api-docs/", docs::swagger_ui)
        .get(docs::OPENAPI_PATH, docs::openapi_document)
}

/// `GET /`
pub async fn welcome(_req: Request, _store: AppState) -> &'static str {
    WELCOME
}
