//! End-to-end tests of the HTTP surface over the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use formflow_api::{FormatStatus, Requester, Role, VariableDefinition};
use formflow_db::models::{FormatModel, NotificationModel, UserModel};
use formflow_server::{app, AppState};
use formflow_service::testing::{FakeConverter, InMemoryStore, FAKE_PDF_PREFIX};
use formflow_service::{Scheduler, ServiceSettings, Services};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: InMemoryStore,
    owner: Requester,
    validator: Requester,
    admin: Requester,
    format: FormatModel,
}

fn requester(user: &UserModel) -> Requester {
    Requester::new(user.id, user.name.clone(), user.email.clone(), user.role)
}

fn setup() -> TestApp {
    let store = InMemoryStore::new();
    let owner = UserModel::new("Ana", "ana@example.com", Role::User);
    let validator = UserModel::new("Victor", "victor@example.com", Role::Validator);
    let admin = UserModel::new("Root", "root@example.com", Role::Admin);
    let format = FormatModel::new(
        "Carta",
        FormatStatus::Active,
        "Hola {{nombre}}",
        vec![VariableDefinition::new("nombre", "text")],
    );
    for user in [&owner, &validator, &admin] {
        store.insert_user(user.clone());
    }
    store.insert_format(format.clone());

    let services = Services::new(store.repositories(), Arc::new(FakeConverter), ServiceSettings::default());
    let router = app(AppState::new(services, Arc::new(Scheduler::new())));

    TestApp {
        router,
        owner: requester(&owner),
        validator: requester(&validator),
        admin: requester(&admin),
        store,
        format,
    }
}

fn request(method: &str, uri: &str, who: Option<&Requester>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(who) = who {
        builder = builder
            .header("x-user-id", who.id.to_string())
            .header("x-user-role", who.role.as_str())
            .header("x-user-name", who.name.as_str())
            .header("x-user-email", who.email.as_str());
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn api(router: &Router, method: &str, uri: &str, who: Option<&Requester>, body: Option<Value>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request(method, uri, who, body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn submit(app: &TestApp, data: Value) -> String {
    let (status, body) = api(
        &app.router,
        "POST",
        "/api/completions",
        Some(&app.owner),
        Some(json!({"format_id": app.format.id, "data": data})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn status_route_is_public() {
    let app = setup();
    let (status, body) = api(&app.router, "GET", "/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "ok"}));
}

#[tokio::test]
async fn missing_identity_is_unauthenticated() {
    let app = setup();
    let (status, body) = api(&app.router, "GET", "/api/completions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let req = Request::builder()
        .uri("/api/completions")
        .header("x-user-id", app.owner.id.to_string())
        .header("x-user-role", "superuser")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submission_preview_and_listing() {
    let app = setup();
    let id = submit(&app, json!({"nombre": "Ana"})).await;

    let (status, list) = api(&app.router, "GET", "/api/completions", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(list[0]["format_title"], "Carta");

    let (status, preview) = api(
        &app.router,
        "GET",
        &format!("/api/pdf/preview-base64/{id}"),
        Some(&app.owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(preview["pdfBase64"].as_str().is_some_and(|s| !s.is_empty()));

    let inbox = app.store.notifications_for(app.validator.id);
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn legacy_spanish_payloads_are_accepted() {
    let app = setup();
    let (status, body) = api(
        &app.router,
        "POST",
        "/api/completions",
        Some(&app.owner),
        Some(json!({"format_id": app.format.id, "datos": {"nombre": "Ana"}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = api(
        &app.router,
        "POST",
        "/api/validations",
        Some(&app.validator),
        Some(json!({"completion_id": id, "estado": "aprobado", "observaciones": "bien"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn validation_flow_and_double_validation() {
    let app = setup();
    let id = submit(&app, json!({"nombre": "Ana"})).await;

    let (status, pending) = api(&app.router, "GET", "/api/validations/pending", Some(&app.validator), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, _) = api(&app.router, "GET", "/api/validations/pending", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let decision = json!({"completion_id": id, "status": "approved"});
    let (status, _) = api(&app.router, "POST", "/api/validations", Some(&app.validator), Some(decision.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = api(&app.router, "POST", "/api/validations", Some(&app.admin), Some(decision)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (status, completed) = api(&app.router, "GET", "/api/validations/completed", Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["validator"]["name"], "Victor");

    let (status, by_completion) = api(
        &app.router,
        "GET",
        &format!("/api/validations/completion/{id}"),
        Some(&app.owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_completion["status"], "approved");

    let owner_inbox = app.store.notifications_for(app.owner.id);
    assert_eq!(owner_inbox.len(), 1);
    assert!(owner_inbox[0].message.contains("approved"));
}

#[tokio::test]
async fn rejected_completion_can_be_edited_but_approved_cannot() {
    let app = setup();
    let id = submit(&app, json!({"nombre": "Ana"})).await;
    let (status, validation) = api(
        &app.router,
        "POST",
        "/api/validations",
        Some(&app.validator),
        Some(json!({"completion_id": id, "status": "rejected", "notes": "falta apellido"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = api(
        &app.router,
        "PUT",
        &format!("/api/completions/{id}"),
        Some(&app.owner),
        Some(json!({"data": {"nombre": "Ana Pérez"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    // submission, the validator's own decision receipt, then the edit after rejection
    assert_eq!(app.store.notifications_for(app.validator.id).len(), 3);

    let validation_id = validation["id"].as_str().unwrap();
    let (status, _) = api(
        &app.router,
        "PUT",
        &format!("/api/validations/{validation_id}"),
        Some(&app.validator),
        Some(json!({"status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = api(
        &app.router,
        "PUT",
        &format!("/api/completions/{id}"),
        Some(&app.owner),
        Some(json!({"data": {"nombre": "Otra"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE");
}

#[tokio::test]
async fn inactive_format_is_invalid_input() {
    let app = setup();
    let inactive = FormatModel::new("Archivo", FormatStatus::Inactive, "x", vec![]);
    app.store.insert_format(inactive.clone());

    let (status, body) = api(
        &app.router,
        "POST",
        "/api/completions",
        Some(&app.owner),
        Some(json!({"format_id": inactive.id, "data": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn download_requires_access_and_approval() {
    let app = setup();
    let id = submit(&app, json!({"nombre": "Ana"})).await;
    let uri = format!("/api/pdf/download/{id}");

    let stranger = Requester::new(uuid::Uuid::new_v4(), "Eve", "eve@example.com", Role::User);
    let (status, _) = api(&app.router, "GET", &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = api(&app.router, "GET", &uri, Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "INVALID_STATE");

    let (status, _) = api(
        &app.router,
        "POST",
        "/api/validations",
        Some(&app.validator),
        Some(json!({"completion_id": id, "status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .router
        .clone()
        .oneshot(request("GET", &uri, Some(&app.owner), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"format_{id}.pdf\"").as_str()
    );
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    assert!(bytes.starts_with(FAKE_PDF_PREFIX));
}

#[tokio::test]
async fn notifications_mark_read_and_cleanup() {
    let app = setup();
    let mut stale = NotificationModel::new(app.owner.id, "old");
    stale.updated_at = Utc::now() - Duration::days(8);
    let mut recent = NotificationModel::new(app.owner.id, "recent");
    recent.updated_at = Utc::now() - Duration::days(1);
    app.store.insert_notification(stale.clone());
    app.store.insert_notification(recent.clone());

    let uri = format!("/api/notifications/{}/read", recent.id);
    let (status, body) = api(&app.router, "PATCH", &uri, Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"], true);
    let (status, _) = api(&app.router, "PATCH", &uri, Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = api(&app.router, "PATCH", &uri, Some(&app.validator), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, stats) = api(&app.router, "GET", "/api/notifications/stats", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["stats"]["stale"], 1);
    assert_eq!(stats["retention_days"], 7);

    let (status, report) = api(&app.router, "POST", "/api/notifications/cleanup", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["deletedCount"], 1);
    assert!(report.get("deleted_count").is_none());
    assert_eq!(report["stats"]["total"], 1);
    assert!(app.store.notification(stale.id).is_none());
    assert!(app.store.notification(recent.id).is_some());

    let (_, list) = api(&app.router, "GET", "/api/notifications", Some(&app.owner), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn formats_and_users_are_admin_managed() {
    let app = setup();
    let body = json!({"title": "Constancia", "content": "Yo, {{nombre}}", "variables": [{"name": "nombre", "type": "text"}]});

    let (status, _) = api(&app.router, "POST", "/api/formats", Some(&app.owner), Some(body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = api(&app.router, "POST", "/api/formats", Some(&app.admin), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "active");

    let (status, list) = api(&app.router, "GET", "/api/formats?title=Constancia", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = api(
        &app.router,
        "PUT",
        &format!("/api/users/{}/role", app.owner.id),
        Some(&app.admin),
        Some(json!({"role": "validator"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, me) = api(&app.router, "GET", "/api/users/me", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "validator");
    assert!(me.get("password_hash").is_none());

    let id = created["id"].as_str().unwrap();
    let (status, _) = api(&app.router, "DELETE", &format!("/api/formats/{id}"), Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_requests_are_invalid_input() {
    let app = setup();

    let (status, body) = api(
        &app.router,
        "POST",
        "/api/completions",
        Some(&app.owner),
        Some(json!({"data": {"nombre": "Ana"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("format_id"), "{body}");

    let (status, body) = api(
        &app.router,
        "PUT",
        "/api/completions/not-a-uuid",
        Some(&app.owner),
        Some(json!({"data": {"nombre": "Ana"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let id = submit(&app, json!({"nombre": "Ana"})).await;
    let (status, body) = api(
        &app.router,
        "POST",
        "/api/validations",
        Some(&app.validator),
        Some(json!({"completion_id": id, "status": "maybe"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(app.store.validations_for(id.parse().unwrap()).is_empty());

    let (status, body) = api(&app.router, "GET", "/api/formats?status=maybe", Some(&app.owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}
