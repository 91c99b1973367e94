//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace span)
//! - The `/api` info route
//! - Contact-form and portfolio routes under `/api`
//! - Optional OpenAPI document (disable with `PORTFOLIO_ENABLE_API_DOCS=false`)

mod contact;
pub mod doc;
mod health;
mod portfolio;

use axum::routing::get;
use axum::{middleware, Json, Router};
use crate::middleware::{cors, trace};
use crate::state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api";

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .merge(contact::router())
        .merge(portfolio::router());

    let mut app = Router::new()
        .merge(health::router())
        .nest(API_PREFIX, api_router);

    if state.config.enable_api_docs {
        app = app.route("/api-docs/openapi.json", get(openapi_json));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state)))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(doc::get_docs())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::db::sqlite::SqliteStore;
    use crate::notify::test::{ChannelMailer, FailingMailer};
    use crate::notify::Notifier;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    async fn state_with(notifier: Option<Notifier>, cors: Option<&str>) -> Arc<AppState> {
        let store = SqliteStore::connect("sqlite::memory:", "test", 1)
            .await
            .expect("in-memory store");
        let cors = cors.map(str::to_owned);
        let config = Config::from_lookup(|key| match key {
            "PORTFOLIO_CORS_ORIGINS" => cors.clone(),
            _ => None,
        });
        Arc::new(AppState {
            config: Arc::new(config),
            store: Arc::new(store),
            notifier,
        })
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, value: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    fn valid_contact() -> Value {
        json!({
            "name": "Test User",
            "email": "test@example.com",
            "phone": "+91 98765 43210",
            "service": "Bridal Makeup",
            "message": "hello",
        })
    }

    fn portfolio_item(title: &str, category: &str) -> Value {
        json!({
            "title": title,
            "category": category,
            "image_url": format!("https://example.com/{title}.jpg"),
            "description": "Test portfolio item description",
        })
    }

    #[tokio::test]
    async fn root_answers_with_and_without_trailing_slash() {
        let app = build(state_with(None, None).await);
        for uri in ["/api/", "/api"] {
            let (status, body) = call(&app, get_req(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "Aaditya Tiwari Portfolio API");
        }
    }

    #[tokio::test]
    async fn contact_submission_is_stored_and_listed() {
        let app = build(state_with(None, None).await);

        let (status, created) = call(&app, post_json("/api/contact", valid_contact())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["service"], "Bridal Makeup");
        assert_eq!(created["phone"], "+91 98765 43210");
        let id = created["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert!(created["timestamp"].is_string());

        let (status, listed) = call(&app, get_req("/api/contact")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], id);
        assert_eq!(listed[0]["timestamp"], created["timestamp"]);

        let mut keys: Vec<_> = listed[0].as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["email", "id", "message", "name", "phone", "service", "timestamp"]
        );
    }

    #[tokio::test]
    async fn invalid_contact_is_rejected_before_storage() {
        let app = build(state_with(None, None).await);
        let (status, body) = call(
            &app,
            post_json(
                "/api/contact",
                json!({
                    "name": "",
                    "email": "invalid-email",
                    "service": "Bridal Makeup",
                    "message": "Test message",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<_> = body["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(fields, vec!["email", "name"]);

        let (_, listed) = call(&app, get_req("/api/contact")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn missing_field_and_bad_json_are_422() {
        let app = build(state_with(None, None).await);
        let (status, body) = call(
            &app,
            post_json("/api/contact", json!({ "name": "A", "service": "S", "message": "M" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "email");

        let req = Request::builder()
            .method("POST")
            .uri("/api/portfolio")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = call(&app, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "body");
    }

    fn detail_fields(body: &Value) -> Vec<String> {
        body["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn empty_contact_body_reports_every_required_field() {
        let app = build(state_with(None, None).await);
        let (status, body) = call(&app, post_json("/api/contact", json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail_fields(&body), vec!["email", "message", "name", "service"]);
        assert_eq!(body["detail"][0]["reason"], "field required");
    }

    #[tokio::test]
    async fn blank_name_and_undotted_domain_are_rejected() {
        let app = build(state_with(None, None).await);
        for (field, value) in [
            ("name", "   "),
            ("email", "user@localhost"),
            ("email", "a@b"),
        ] {
            let mut contact = valid_contact();
            contact[field] = json!(value);
            let (status, body) = call(&app, post_json("/api/contact", contact)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{field}={value}");
            assert_eq!(detail_fields(&body), vec![field.to_owned()]);
        }

        let (_, listed) = call(&app, get_req("/api/contact")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn repeated_category_uses_the_last_value() {
        let app = build(state_with(None, None).await);
        for (title, category) in [("A", "bridal"), ("B", "editorial")] {
            let (status, _) =
                call(&app, post_json("/api/portfolio", portfolio_item(title, category))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call(
            &app,
            get_req("/api/portfolio?category=editorial&category=bridal"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "A");
    }

    #[tokio::test]
    async fn portfolio_category_filter_is_exact() {
        let app = build(state_with(None, None).await);

        let (status, bridal) =
            call(&app, post_json("/api/portfolio", portfolio_item("veil", "bridal"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!bridal["id"].as_str().unwrap().is_empty());
        assert!(bridal["created_at"].is_string());
        let (status, _) =
            call(&app, post_json("/api/portfolio", portfolio_item("ring", "engagement"))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, filtered) = call(&app, get_req("/api/portfolio?category=bridal")).await;
        assert_eq!(status, StatusCode::OK);
        let filtered = filtered.as_array().unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["id"], bridal["id"]);
        assert_eq!(filtered[0]["category"], "bridal");

        let (_, other) = call(&app, get_req("/api/portfolio?category=editorial")).await;
        assert_eq!(other, json!([]));

        for uri in ["/api/portfolio", "/api/portfolio?category="] {
            let (_, all) = call(&app, get_req(uri)).await;
            let titles: Vec<_> = all
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v["title"].as_str().unwrap().to_owned())
                .collect();
            assert_eq!(titles, vec!["veil", "ring"]);
        }
    }

    #[tokio::test]
    async fn notification_goes_out_without_changing_the_response() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier =
            Notifier::new(Arc::new(ChannelMailer(tx)), "from@example.com", "owner@example.com")
                .unwrap();
        let with_email = build(state_with(Some(notifier), None).await);
        let without_email = build(state_with(None, None).await);

        let (status_on, body_on) =
            call(&with_email, post_json("/api/contact", valid_contact())).await;
        let (status_off, body_off) =
            call(&without_email, post_json("/api/contact", valid_contact())).await;
        assert_eq!(status_on, StatusCode::OK);
        assert_eq!(status_off, StatusCode::OK);
        for field in ["name", "email", "phone", "service", "message"] {
            assert_eq!(body_on[field], body_off[field]);
        }

        let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("notification within timeout")
            .expect("channel open");
        assert_eq!(message.to, vec!["owner@example.com".to_owned()]);
        assert_eq!(message.subject, "New Contact Form: Bridal Makeup - Test User");
    }

    #[tokio::test]
    async fn failing_mailer_does_not_fail_the_request() {
        let notifier =
            Notifier::new(Arc::new(FailingMailer), "from@example.com", "owner@example.com")
                .unwrap();
        let app = build(state_with(Some(notifier), None).await);
        let (status, body) = call(&app, post_json("/api/contact", valid_contact())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn storage_failure_is_500_with_detail() {
        let state = state_with(None, None).await;
        state.store.close().await;
        let app = build(state);

        let (status, body) = call(&app, post_json("/api/contact", valid_contact())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().starts_with("database error"));

        let (status, _) = call(&app, get_req("/api/portfolio")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn cors_mirrors_origin_with_credentials() {
        let app = build(state_with(None, None).await);
        let req = Request::builder()
            .uri("/api/")
            .header(header::ORIGIN, "https://portfolio.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://portfolio.example"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn cors_allow_list_rejects_other_origins() {
        let app = build(state_with(None, Some("https://allowed.example")).await);
        let req = Request::builder()
            .uri("/api/")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn trace_id_is_echoed() {
        let app = build(state_with(None, None).await);
        let trace_id = "7d444840-9dc0-11d1-b245-5ffdce74fad2";
        let req = Request::builder()
            .uri("/api/")
            .header(trace::X_TRACE_ID, trace_id)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.headers()[trace::X_TRACE_ID], trace_id);

        let response = app.oneshot(get_req("/api/")).await.unwrap();
        assert!(response.headers().contains_key(trace::X_TRACE_ID));
    }

    #[tokio::test]
    async fn openapi_document_lists_the_api() {
        let app = build(state_with(None, None).await);
        let (status, body) = call(&app, get_req("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/contact"].is_object());
        assert!(body["paths"]["/api/portfolio"].is_object());
    }
}
