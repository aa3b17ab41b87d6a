//! End-to-end behaviour of the user API, driven through `Router::respond`.

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode, header};
use http_body_util::{BodyExt, Full};
use pretty_assertions::assert_eq;
use roster::api::{self, AppState};
use roster::{Router, UserStore};
use serde_json::{Value, json};

struct TestApp {
    store: AppState,
    router: Router<AppState>,
}

struct TestResponse {
    status: StatusCode,
    headers: http::HeaderMap,
    body: Bytes,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {:?}", self.body))
    }
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(UserStore::new());
        let router = api::router(Arc::clone(&store));
        Self { store, router }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let req = builder
            .body(Full::new(Bytes::from(body.unwrap_or_default().to_owned())))
            .expect("build request");

        let res = self.router.respond(req).await;
        let status = res.status();
        let headers = res.headers().clone();
        let body = res.into_body().collect().await.expect("read body").to_bytes();
        TestResponse { status, headers, body }
    }

    async fn create(&self, name: &str, email: &str) -> Value {
        let body = json!({ "name": name, "email": email }).to_string();
        let res = self.send(Method::POST, "/api/users", Some(&body)).await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.json()
    }
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = TestApp::new();

    let res = app
        .send(Method::POST, "/api/users", Some(r#"{"name":"Ann","email":"ann@x.com"}"#))
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json(), json!({ "id": 1, "name": "Ann", "email": "ann@x.com" }));
    assert_eq!(res.headers.get(header::LOCATION).unwrap(), "/api/users/1");
    assert_eq!(res.headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
}

#[tokio::test]
async fn get_returns_created_user() {
    let app = TestApp::new();
    let created = app.create("Ann", "ann@x.com").await;

    let res = app.send(Method::GET, "/api/users/1", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), created);
}

#[tokio::test]
async fn get_missing_user_is_404() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/api/users/99", None).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({ "error": "User not found" }));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;

    let res = app
        .send(Method::PUT, "/api/users/1", Some(r#"{"name":"Annie","email":"a2@x.com"}"#))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    let expected = json!({ "id": 1, "name": "Annie", "email": "a2@x.com" });
    assert_eq!(res.json(), expected);
    assert_eq!(app.send(Method::GET, "/api/users/1", None).await.json(), expected);
}

#[tokio::test]
async fn update_missing_user_is_404() {
    let app = TestApp::new();

    let res = app
        .send(Method::PUT, "/api/users/5", Some(r#"{"name":"Bob","email":"bob@x.com"}"#))
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({ "error": "User not found" }));
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn delete_returns_204_then_user_is_gone() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;

    let res = app.send(Method::DELETE, "/api/users/1", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());

    let res = app.send(Method::GET, "/api/users/1", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.send(Method::DELETE, "/api/users/1", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({ "error": "User not found" }));
}

#[tokio::test]
async fn list_is_empty_initially() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/api/users", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn list_returns_users_in_creation_order_without_deleted() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;
    app.create("Bob", "bob@x.com").await;
    app.create("Cy", "cy@x.com").await;
    app.send(Method::DELETE, "/api/users/2", None).await;

    let res = app.send(Method::GET, "/api/users", None).await;

    assert_eq!(
        res.json(),
        json!([
            { "id": 1, "name": "Ann", "email": "ann@x.com" },
            { "id": 3, "name": "Cy", "email": "cy@x.com" },
        ])
    );
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;
    app.send(Method::DELETE, "/api/users/1", None).await;

    let created = app.create("Bob", "bob@x.com").await;

    assert_eq!(created["id"], json!(2));
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(r#"{"name":"Bob","email":"bob@x.com"}"#)),
        (Method::DELETE, None),
    ] {
        for uri in ["/api/users/abc", "/api/users/-1", "/api/users/1.5"] {
            let res = app.send(method.clone(), uri, body).await;
            assert_eq!(res.status, StatusCode::BAD_REQUEST, "{method} {uri}");
            assert_eq!(res.json(), json!({ "error": "Invalid user id" }));
        }
    }
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn create_with_missing_field_is_400_and_stores_nothing() {
    let app = TestApp::new();

    let res = app.send(Method::POST, "/api/users", Some(r#"{"name":"Ann"}"#)).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let error = res.json()["error"].as_str().unwrap_or_default().to_owned();
    assert!(error.starts_with("Invalid request body: missing field `email`"), "{error}");
    assert!(app.store.is_empty());

    // The rejected request did not consume an id.
    assert_eq!(app.create("Ann", "ann@x.com").await["id"], json!(1));
}

#[tokio::test]
async fn malformed_or_empty_body_is_400() {
    let app = TestApp::new();

    for body in ["", "{", "[]", r#"{"name":1,"email":"ann@x.com"}"#] {
        let res = app.send(Method::POST, "/api/users", Some(body)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body {body:?}");
    }
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;

    let res = app
        .send(Method::POST, "/api/users", Some(r#"{"name":"  ","email":"x@x.com"}"#))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({ "error": "name must not be empty" }));

    let res = app
        .send(Method::PUT, "/api/users/1", Some(r#"{"name":"Ann","email":""}"#))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({ "error": "email must not be empty" }));

    let res = app.send(Method::GET, "/api/users/1", None).await;
    assert_eq!(res.json(), json!({ "id": 1, "name": "Ann", "email": "ann@x.com" }));
}

#[tokio::test]
async fn extra_fields_in_body_are_ignored() {
    let app = TestApp::new();

    let res = app
        .send(
            Method::POST,
            "/api/users",
            Some(r#"{"id":42,"name":"Ann","email":"ann@x.com","role":"admin"}"#),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json(), json!({ "id": 1, "name": "Ann", "email": "ann@x.com" }));
}

#[tokio::test]
async fn root_serves_welcome_text() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, api::WELCOME);
    assert_eq!(
        res.headers.get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn docs_page_and_document_are_served() {
    let app = TestApp::new();

    for uri in ["/api-docs", "/api-docs/"] {
        let res = app.send(Method::GET, uri, None).await;
        assert_eq!(res.status, StatusCode::OK, "{uri}");
        assert_eq!(res.headers.get(header::CONTENT_TYPE).unwrap(), "text/html; charset=utf-8");
        let page = String::from_utf8(res.body.to_vec()).unwrap();
        assert!(page.contains("SwaggerUIBundle"));
        assert!(page.contains(api::docs::OPENAPI_PATH));
    }

    let res = app.send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let spec = res.json();
    assert_eq!(spec["info"]["title"], json!("User Management API"));
    assert!(spec["paths"]["/api/users/{id}"]["delete"].is_object());
}

#[tokio::test]
async fn unknown_route_is_404_with_empty_body() {
    let app = TestApp::new();

    let res = app.send(Method::PATCH, "/api/users/1", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());

    let res = app.send(Method::GET, "/api/accounts", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn separate_apps_do_not_share_state() {
    let first = TestApp::new();
    let second = TestApp::new();
    first.create("Ann", "ann@x.com").await;

    let res = second.send(Method::GET, "/api/users", None).await;

    assert_eq!(res.json(), json!([]));
    assert_eq!(second.create("Bob", "bob@x.com").await["id"], json!(1));
}

#[tokio::test]
async fn oversized_body_is_413_and_stores_nothing() {
    let app = TestApp::new();
    let name = "a".repeat(roster::DEFAULT_BODY_LIMIT);
    let body = json!({ "name": name, "email": "ann@x.com" }).to_string();

    let res = app.send(Method::POST, "/api/users", Some(&body)).await;

    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.store.is_empty());

    // Just under the limit is still accepted.
    let name = "a".repeat(roster::DEFAULT_BODY_LIMIT - 64);
    let body = json!({ "name": name, "email": "ann@x.com" }).to_string();
    let res = app.send(Method::PUT, "/api/users/1", Some(&body)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn head_mirrors_get_without_body() {
    let app = TestApp::new();
    app.create("Ann", "ann@x.com").await;

    for uri in ["/api/users", "/api/users/1", "/"] {
        let res = app.send(Method::HEAD, uri, None).await;
        assert_eq!(res.status, StatusCode::OK, "{uri}");
        assert!(res.body.is_empty(), "{uri}");
    }

    let res = app.send(Method::HEAD, "/api/users/99", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn percent_encoded_id_is_decoded() {
    let app = TestApp::new();
    let created = app.create("Ann", "ann@x.com").await;

    for uri in ["/api/users/%31", "/api/users/01", "/api/users/+1"] {
        let res = app.send(Method::GET, uri, None).await;
        assert_eq!(res.status, StatusCode::OK, "{uri}");
        assert_eq!(res.json(), created);
    }

    let res = app.send(Method::GET, "/api/users/%61", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
