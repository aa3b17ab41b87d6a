//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. Application state is injected once, at construction, and
//! handed to every handler by value.
//!
//! `HEAD` falls back to the `GET` tree and answers with an empty body.
//! Request bodies are buffered up to [`DEFAULT_BODY_LIMIT`] bytes (see
//! [`Router::body_limit`]); anything larger is a 413.

use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;
use tracing::warn;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::trace;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration call returns `self` so registrations chain naturally.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
    body_limit: usize,
}

/// Largest request body buffered by default: 100 KiB.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

impl Router<()> {
    /// A router whose handlers receive `()` as state.
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router whose handlers each receive a clone of `state`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use roster::{Json, Request, Router, User, UserStore};
    /// async fn list(_req: Request, store: Arc<UserStore>) -> Json<Vec<User>> {
    ///     Json(store.list())
    /// }
    ///
    /// Router::with_state(Arc::new(UserStore::new()))
    ///     .get("/api/users", list);
    /// ```
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state, body_limit: DEFAULT_BODY_LIMIT }
    }

    /// Caps the number of request body bytes buffered per request.
    /// Larger bodies are answered with `413` before any handler runs.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for the same method. Routes are static, so this surfaces
    /// at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Delete, path, handler)
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode_param(v)))
            .collect();
        Some((handler, params))
    }

    /// Routes one request and produces one response.
    ///
    /// This is the whole per-request path: the server calls it for every
    /// request on every connection, and tests can call it directly without a
    /// socket. Failures never escape: unknown methods become 405, unmatched
    /// paths 404, oversized bodies 413, unreadable bodies 400.
    pub async fn respond<B>(&self, req: http::Request<B>) -> http::Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn StdError + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();
        let http::request::Parts { method, uri, headers, .. } = parts;
        let path = uri.path().to_owned();
        let dispatch = self.dispatch(&method, &path, headers, body);
        trace::instrument(&method, &path, dispatch).await.into_inner()
    }

    async fn dispatch<B>(
        &self,
        method: &http::Method,
        path: &str,
        headers: http::HeaderMap,
        body: B,
    ) -> Response
    where
        B: Body,
        B::Error: Into<Box<dyn StdError + Send + Sync>>,
    {
        let Ok(method) = Method::try_from(method) else {
            return Response::status(Status::MethodNotAllowed);
        };
        let found = match self.lookup(method, path) {
            None if method == Method::Head => self.lookup(Method::Get, path),
            found => found,
        };
        let Some((handler, params)) = found else {
            return Response::status(Status::NotFound);
        };
        let body = match Limited::new(body, self.body_limit).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                warn!(limit = self.body_limit, "request body too large");
                return Response::status(Status::ContentTooLarge);
            }
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                return Response::status(Status::BadRequest);
            }
        };
        let req = Request::new(method, path.to_owned(), headers, body, params);
        let mut response = handler.call(req, self.state.clone()).await;
        if method == Method::Head {
            response.body = Bytes::new();
        }
        response
    }
}

/// Percent-decodes a path parameter. Segments that do not decode to UTF-8
/// are passed through raw.
fn decode_param(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map_or_else(|_| raw.to_owned(), Cow::into_owned)
}
