//! Resource routes under `/api`. Literal segments win over `/:resource`.

use crate::handlers::{create, delete, list, portfolio, update};
use crate::routes::docs::openapi_json;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/portfolio", get(portfolio))
        .route("/openapi.json", get(openapi_json))
        .route("/:resource", get(list).post(create).put(update).delete(delete))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::config::{bundled_config, resolve, TableSpec};
    use crate::error::StoreError;
    use crate::state::AppState;
    use crate::store::{MemoryStore, Row, Store};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn select(&self, _: &TableSpec, _: Option<u32>) -> Result<Vec<Row>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn insert(&self, _: &TableSpec, _: &Row) -> Result<Row, StoreError> {
            Err(StoreError::Rejected("new row violates check constraint".into()))
        }
        async fn update(&self, _: &TableSpec, _: &Value, _: &Row) -> Result<Option<Row>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn delete(&self, _: &TableSpec, _: &Value) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    fn state_with(store: Arc<dyn Store>) -> AppState {
        AppState::new(store, resolve(&bundled_config().unwrap()).unwrap())
    }

    fn router() -> Router {
        crate::app(state_with(Arc::new(MemoryStore::new())), 1024 * 1024)
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", t));
        }
        let req = match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn create_then_list_skills() {
        let app = router();
        let (status, created) = call(
            app.clone(),
            "POST",
            "/api/skills",
            Some(json!({ "name": "Rust", "category": "Backend", "order_index": 2 })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Rust");
        assert!(created["id"].is_number());

        let (status, listed) = call(app, "GET", "/api/skills", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_profile_is_null_and_empty_list_is_array() {
        let app = router();
        let (status, body) = call(app.clone(), "GET", "/api/profiles", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
        let (_, body) = call(app, "GET", "/api/projects", None, None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn delete_requires_id() {
        let app = router();
        let (status, body) = call(app.clone(), "DELETE", "/api/skills", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "ID is required" }));

        let (status, _) = call(app, "DELETE", "/api/projects?id=not-a-uuid", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_of_missing_row_reports_success() {
        let (status, body) = call(
            router(),
            "DELETE",
            "/api/projects?id=6f1c1b1e-8d5e-4a57-9f45-3c2b8f0e9a11",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_404() {
        let (status, body) = call(
            router(),
            "PUT",
            "/api/projects",
            Some(json!({ "id": "6f1c1b1e-8d5e-4a57-9f45-3c2b8f0e9a11", "title": "x" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_resource_is_404() {
        let (status, _) = call(router(), "GET", "/api/widgets", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_errors_surface_verbatim_as_500() {
        let app = crate::app(state_with(Arc::new(FailingStore)), 1024);
        let (status, body) = call(app.clone(), "GET", "/api/skills", None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "connection refused" }));

        let (status, body) = call(app.clone(), "POST", "/api/skills", Some(json!({ "name": "Rust" })), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "new row violates check constraint");

        let (status, _) = call(app, "GET", "/api/portfolio", None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn mistyped_value_is_rejected_and_public_page_keeps_loading() {
        let app = router();
        let (status, body) = call(
            app.clone(),
            "POST",
            "/api/projects",
            Some(json!({ "title": "t", "description": "d", "featured": "maybe" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "invalid input syntax for type boolean: \"maybe\"" }));

        let (status, body) = call(
            app.clone(),
            "POST",
            "/api/experiences",
            Some(json!({ "company": "Acme", "position": "Eng", "description": "d", "start_date": "soon" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "invalid input syntax for type date: \"soon\"");

        let (status, body) = call(app, "GET", "/api/portfolio", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"], json!([]));
        assert_eq!(body["experiences"], json!([]));
    }

    #[tokio::test]
    async fn admin_token_guards_non_public_operations() {
        let state = state_with(Arc::new(MemoryStore::new())).with_admin_token(Some("s3cret".into()));
        let app = crate::app(state, 1024 * 1024);

        let (status, _) = call(app.clone(), "GET", "/api/skills", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let skill = json!({ "name": "Rust" });
        let (status, body) = call(app.clone(), "POST", "/api/skills", Some(skill.clone()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "admin access required");

        let (status, _) = call(app.clone(), "POST", "/api/skills", Some(skill.clone()), Some("wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(app.clone(), "POST", "/api/skills", Some(skill), Some("s3cret")).await;
        assert_eq!(status, StatusCode::CREATED);

        let message = json!({ "name": "Ada", "email": "ada@example.com", "message": "hello" });
        let (status, _) = call(app.clone(), "POST", "/api/contact", Some(message), None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = call(app, "GET", "/api/contact", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_contact_create_cannot_mark_read() {
        let state = state_with(Arc::new(MemoryStore::new())).with_admin_token(Some("s3cret".into()));
        let app = crate::app(state, 1024 * 1024);
        let message = json!({ "name": "Ada", "email": "ada@example.com", "message": "hello", "read": true });
        let (status, created) = call(app.clone(), "POST", "/api/contact", Some(message), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["read"], json!(false));

        let (_, listed) = call(app, "GET", "/api/contact", None, Some("s3cret")).await;
        assert_eq!(listed[0]["read"], json!(false));
    }

    #[tokio::test]
    async fn portfolio_aggregates_the_four_lists() {
        let app = router();
        call(
            app.clone(),
            "POST",
            "/api/profiles",
            Some(json!({ "email": "ada@example.com", "full_name": "Ada Lovelace" })),
            None,
        )
        .await;
        let (status, body) = call(app, "GET", "/api/portfolio", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["full_name"], "Ada Lovelace");
        assert_eq!(body["skills"], json!([]));
        assert_eq!(body["projects"], json!([]));
        assert_eq!(body["experiences"], json!([]));
    }

    #[tokio::test]
    async fn operational_routes() {
        let (status, body) = call(router(), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = call(router(), "GET", "/version", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "folio");

        let (status, _) = call(router(), "GET", "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let failing = crate::app(state_with(Arc::new(FailingStore)), 1024);
        let (status, body) = call(failing, "GET", "/ready", None, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["store"], "unavailable");

        let (status, body) = call(router(), "GET", "/api/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/{resource}"].is_object());
    }
}
