//! OpenAPI document generation and the Swagger UI page.
//!
//! The document is built from the `#[utoipa::path]` annotations on the
//! handlers in [`users`](crate::api::users); nothing here touches request
//! handling beyond serving the result.

use std::sync::OnceLock;

use utoipa::OpenApi;

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorBody};
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::user::{User, UserInput};

/// Where the machine-readable document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for the user API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = env!("CARGO_PKG_VERSION"),
        description = "A CRUD API over an in-memory user collection, documented with OpenAPI."
    ),
    paths(
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(User, UserInput, ErrorBody)
    ),
    tags(
        (name = "Users", description = "User CRUD operations"),
    ),
)]
pub struct UserApiDoc;

/// Returns the generated OpenAPI document.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    UserApiDoc::openapi()
}

static OPENAPI_JSON: OnceLock<String> = OnceLock::new();

/// Returns the generated OpenAPI document as pretty JSON, serializing it on
/// first use only.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen).
pub fn openapi_json() -> Result<&'static str, serde_json::Error> {
    if let Some(spec) = OPENAPI_JSON.get() {
        return Ok(spec);
    }
    let spec = serde_json::to_string_pretty(&openapi())?;
    Ok(OPENAPI_JSON.get_or_init(|| spec))
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>User Management API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "__OPENAPI_PATH__", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// `GET /api-docs`: the interactive documentation page.
pub async fn swagger_ui(_req: Request, _store: AppState) -> Response {
    let page = SWAGGER_UI_HTML.replace("__OPENAPI_PATH__", OPENAPI_PATH);
    Response::builder().bytes(ContentType::Html, page)
}

/// `GET /api-docs/openapi.json`: the machine-readable document.
pub async fn openapi_document(_req: Request, _store: AppState) -> Result<Response, ApiError> {
    let spec = openapi_json().map_err(ApiError::Serialize)?;
    Ok(Response::json(spec))
}
