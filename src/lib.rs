//! # roster
//!
//! A minimal HTTP service for CRUD over an in-memory collection of users,
//! with OpenAPI documentation generated from the handler annotations.
//!
//! Two pieces do the work:
//!
//! - [`UserStore`]: an ordered `Vec` of [`User`]s plus an id counter, behind a
//!   single lock. Nothing is persisted.
//! - [`api`]: the handlers and route table, translating HTTP to store calls
//!   and back, plus the Swagger UI page and OpenAPI JSON.
//!
//! Underneath sits a small radix-tree router over hyper: typed status codes,
//! handlers that receive injected state, graceful shutdown.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roster::{Server, UserStore, api};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(UserStore::new());
//!     Server::bind(([0, 0, 0, 0], 3000).into())
//!         .serve(api::router(store))
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `GET` | `/api/users` | 200, all users |
//! | `GET` | `/api/users/{id}` | 200, one user |
//! | `POST` | `/api/users` | 201, created user |
//! | `PUT` | `/api/users/{id}` | 200, updated user |
//! | `DELETE` | `/api/users/{id}` | 204 |
//! | `GET` | `/api-docs` | Swagger UI |

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;
mod user;

pub mod api;
pub mod config;
pub mod middleware;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::{DEFAULT_BODY_LIMIT, Router};
pub use server::Server;
pub use status::Status;
pub use store::{StoreError, UserStore};
pub use user::{User, UserInput};
