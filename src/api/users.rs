//! `/api/users` handlers.
//!
//! Each handler parses and validates at the boundary, makes one store call
//! and maps the outcome to a response. Doc comments double as the operation
//! summaries in the generated OpenAPI document.

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorBody};
use crate::request::Request;
use crate::response::{Json, Response};
use crate::status::Status;
use crate::user::{User, UserInput};

/// Parses the `{id}` path segment. Anything but an unsigned integer is a 400.
fn user_id(req: &Request) -> Result<u64, ApiError> {
    req.param("id")
        .and_then(|raw| raw.parse().ok())
        .ok_or(ApiError::InvalidId)
}

fn user_input(req: &Request) -> Result<UserInput, ApiError> {
    let input: UserInput = req.json().map_err(ApiError::InvalidBody)?;
    match input.first_blank_field() {
        Some(field) => Err(ApiError::EmptyField(field)),
        None => Ok(input),
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
    )
)]
pub async fn list_users(_req: Request, store: AppState) -> Json<Vec<User>> {
    Json(store.list())
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Found user", body = User),
        (status = 400, description = "Invalid user id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    )
)]
pub async fn get_user(req: Request, store: AppState) -> Result<Json<User>, ApiError> {
    let id = user_id(&req)?;
    Ok(Json(store.get(id)?))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("location" = String, description = "URL of the created user"))),
        (status = 400, description = "Invalid request body", body = ErrorBody),
    )
)]
pub async fn create_user(req: Request, store: AppState) -> Result<Response, ApiError> {
    let input = user_input(&req)?;
    let user = store.create(input);
    let body = serde_json::to_vec(&user).map_err(ApiError::Serialize)?;
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/api/users/{}", user.id))
        .json(body))
}

/// Update user by ID
///
/// Both fields are replaced; there is no partial update.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid user id or request body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    )
)]
pub async fn update_user(req: Request, store: AppState) -> Result<Json<User>, ApiError> {
    let id = user_id(&req)?;
    let input = user_input(&req)?;
    Ok(Json(store.update(id, input)?))
}

/// Delete user by ID
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid user id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    )
)]
pub async fn delete_user(req: Request, store: AppState) -> Result<Status, ApiError> {
    let id = user_id(&req)?;
    store.delete(id)?;
    Ok(Status::NoContent)
}
