//! End-to-end tests driving the router in-process.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use masterbis_backend::{app, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@masterbis.com";
const ADMIN_PASSWORD: &str = "admin-secret";
const DEMO_PASSWORD: &str = "demo-secret";

fn portal_config() -> Config {
    let mut config = Config::default();
    config.admin.password = Some(ADMIN_PASSWORD.into());
    config.demo.student_password = Some(DEMO_PASSWORD.into());
    config
}

async fn portal_with(config: Config) -> Router {
    let state = AppState::in_memory(config).await.unwrap();
    app(state)
}

async fn portal() -> Router {
    portal_with(portal_config()).await
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

async fn try_login(router: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    call(
        router,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

async fn login(router: &Router, email: &str, password: &str) -> (String, Value) {
    let (status, body) = try_login(router, email, password).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    (body["token"].as_str().unwrap().to_string(), body["user"].clone())
}

fn material_count(courses: &Value, course_id: &str) -> usize {
    courses
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == course_id)
        .unwrap()["materials"]
        .as_array()
        .unwrap()
        .len()
}

#[tokio::test]
async fn admin_login_is_case_insensitive() {
    let router = portal().await;
    let (_, user) = login(&router, "ADMIN@MASTERBIS.COM", ADMIN_PASSWORD).await;
    assert_eq!(user["role"], "ADMIN");
    assert_eq!(user["isSubscribed"], true);
    assert_eq!(user["pendingSubscription"], false);
}

#[tokio::test]
async fn new_email_logs_in_as_unsubscribed_student() {
    let router = portal().await;
    let (token, user) = login(&router, "mona@bis.com", "pw").await;
    assert_eq!(user["role"], "STUDENT");
    assert_eq!(user["name"], "mona");
    assert_eq!(user["isSubscribed"], false);
    assert_eq!(user["subscriptionStatus"], "NONE");

    let (status, session) = call(&router, Method::GET, "/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user"]["id"], user["id"]);
}

#[tokio::test]
async fn login_validation_errors() {
    let router = portal().await;
    let (status, body) = call(
        &router,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "not-an-email", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (status, _) = call(&router, Method::POST, "/login", None, Some(json!("garbage"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_after_first_login_is_rejected() {
    let router = portal().await;
    login(&router, "mona@bis.com", "pw").await;
    let (status, body) = try_login(&router, "mona@bis.com", "nope").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AuthError");
}

#[tokio::test]
async fn portal_refuses_to_start_without_admin_password() {
    assert!(AppState::in_memory(Config::default()).await.is_err());
}

#[tokio::test]
async fn stranger_cannot_claim_seeded_accounts() {
    let mut config = portal_config();
    config.demo.student_password = None;
    let router = portal_with(config).await;

    for (email, password) in [
        (ADMIN_EMAIL, "pw"),
        ("sara@bis.com", "pw"),
        ("karim@bis.com", "pw"),
    ] {
        let (status, body) = try_login(&router, email, password).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{email}: {body}");
        // A failed first attempt must not have set a password either.
        let (status, _) = try_login(&router, email, password).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{email}");
    }

    let (admin, user) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(user["role"], "ADMIN");
    let (_, users) = call(&router, Method::GET, "/admin/users", Some(&admin), None).await;
    let sara = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == "sara@bis.com")
        .unwrap();
    assert_eq!(sara["role"], "STUDENT");
    assert_eq!(sara["subscriptionStatus"], "ACTIVE");
}

#[tokio::test]
async fn demo_student_needs_the_configured_password() {
    let router = portal().await;
    let (status, _) = try_login(&router, "sara@bis.com", "pw").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, user) = login(&router, "sara@bis.com", DEMO_PASSWORD).await;
    assert_eq!(user["isSubscribed"], true);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let router = portal().await;
    let (token, _) = login(&router, "mona@bis.com", "pw").await;
    let (status, _) = call(&router, Method::POST, "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&router, Method::GET, "/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&router, Method::POST, "/logout", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn anonymous_catalog_locks_paid_material() {
    let router = portal().await;
    let (status, courses) = call(&router, Method::GET, "/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(courses.as_array().unwrap().len(), 3);
    for course in courses.as_array().unwrap() {
        for material in course["materials"].as_array().unwrap() {
            let free = material["isFree"].as_bool().unwrap();
            assert_eq!(material["locked"], !free);
            assert_eq!(material["url"].is_null(), !free);
        }
    }

    let (status, _) = call(&router, Method::GET, "/courses/db2/materials/db_m1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&router, Method::GET, "/courses/db2/materials/db_m2", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = call(&router, Method::GET, "/courses/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFoundError");
}

#[tokio::test]
async fn admin_sees_every_material_unlocked() {
    let router = portal().await;
    let (token, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, course) = call(&router, Method::GET, "/courses/acc2", Some(&token), None).await;
    for material in course["materials"].as_array().unwrap() {
        assert_eq!(material["locked"], false);
    }
}

#[tokio::test]
async fn request_then_approve_unlocks_paid_video() {
    let router = portal().await;
    let (student, user) = login(&router, "mona@bis.com", "pw").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let (status, _) = call(&router, Method::GET, "/courses/db2/materials/db_m2", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&router, Method::POST, "/subscription/request", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["subscriptionStatus"], "PENDING");
    assert_eq!(body["user"]["isSubscribed"], false);
    assert!(body["message"].is_string());

    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, pending) = call(&router, Method::GET, "/admin/subscriptions/pending", Some(&admin), None).await;
    let ids: Vec<_> = pending.as_array().unwrap().iter().map(|u| u["id"].clone()).collect();
    assert_eq!(ids, [json!("u1"), json!("u3"), json!(user_id)]);

    let uri = format!("/admin/subscriptions/{user_id}/approve");
    let (status, body) = call(&router, Method::POST, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["isSubscribed"], true);
    assert_eq!(body["user"]["pendingSubscription"], false);

    let (status, material) =
        call(&router, Method::GET, "/courses/db2/materials/db_m2", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(material["id"], "db_m2");

    let (_, dashboard) = call(&router, Method::GET, "/me/dashboard", Some(&student), None).await;
    assert_eq!(dashboard["user"]["subscriptionStatus"], "ACTIVE");
    assert!(dashboard.get("subscriptionStatus").is_none());
    assert_eq!(dashboard["canRequestSubscription"], false);
}

#[tokio::test]
async fn seeded_karim_is_pending_and_can_be_approved() {
    let router = portal().await;
    let (student, user) = login(&router, "karim@bis.com", DEMO_PASSWORD).await;
    assert_eq!(user["id"], "u3");

    let (_, body) = call(&router, Method::POST, "/subscription/request", Some(&student), None).await;
    assert_eq!(body["user"]["subscriptionStatus"], "PENDING");

    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, _) = call(&router, Method::POST, "/admin/subscriptions/u3/approve", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, course) = call(&router, Method::GET, "/courses/db2", Some(&student), None).await;
    let paid_video = course["materials"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["type"] == "VIDEO" && m["isFree"] == false)
        .unwrap();
    assert_eq!(paid_video["locked"], false);
}

#[tokio::test]
async fn reject_returns_request_to_none() {
    let router = portal().await;
    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = call(&router, Method::POST, "/admin/subscriptions/u1/reject", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["subscriptionStatus"], "NONE");

    // u1 is no longer pending, so neither decision applies.
    let (status, body) = call(&router, Method::POST, "/admin/subscriptions/u1/approve", Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ConflictError");

    let (status, _) = call(&router, Method::POST, "/admin/subscriptions/ghost/reject", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let router = portal().await;
    let (student, _) = login(&router, "mona@bis.com", "pw").await;

    let (status, _) = call(&router, Method::GET, "/admin/subscriptions/pending", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = call(&router, Method::POST, "/admin/subscriptions/u1/approve", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "AuthError");

    let (status, _) = call(
        &router,
        Method::POST,
        "/admin/courses/db2/materials",
        Some(&student),
        Some(json!({ "title": "x", "type": "PDF" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn add_material_appends_only_to_target_course() {
    let router = portal().await;
    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, before) = call(&router, Method::GET, "/courses", None, None).await;

    let (status, body) = call(
        &router,
        Method::POST,
        "/admin/courses/db2/materials",
        Some(&admin),
        Some(json!({ "title": "المحاضرة 5", "type": "VIDEO", "url": "https://cdn/5.mp4", "duration": "30:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["material"]["isFree"], false);

    let (_, after) = call(&router, Method::GET, "/courses", None, None).await;
    for id in ["db2", "acc2", "prod2"] {
        let expected = material_count(&before, id) + usize::from(id == "db2");
        assert_eq!(material_count(&after, id), expected, "{id}");
    }
    let (_, db2) = call(&router, Method::GET, "/courses/db2", Some(&admin), None).await;
    let last = db2["materials"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["id"], body["material"]["id"]);
}

#[tokio::test]
async fn add_pdf_with_empty_url_is_accepted() {
    let router = portal().await;
    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = call(
        &router,
        Method::POST,
        "/admin/courses/acc2/materials",
        Some(&admin),
        Some(json!({ "title": "ملخص نهائي", "type": "PDF", "url": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["material"]["url"], "");
    assert_eq!(body["material"]["type"], "PDF");
}

#[tokio::test]
async fn add_material_errors() {
    let router = portal().await;
    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = call(
        &router,
        Method::POST,
        "/admin/courses/acc2/materials",
        Some(&admin),
        Some(json!({ "title": "", "type": "PDF" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (status, _) = call(
        &router,
        Method::POST,
        "/admin/courses/missing/materials",
        Some(&admin),
        Some(json!({ "title": "t", "type": "PDF" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_stats_and_payment_info() {
    let router = portal().await;
    let (admin, _) = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, stats) = call(&router, Method::GET, "/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["courses"], 3);
    assert_eq!(stats["materials"], 15);
    assert_eq!(stats["students"], 3);
    assert_eq!(stats["activeSubscribers"], 1);
    assert_eq!(stats["pendingRequests"], 2);

    let (_, users) = call(&router, Method::GET, "/admin/users", Some(&admin), None).await;
    let ids: Vec<_> = users.as_array().unwrap().iter().map(|u| u["id"].clone()).collect();
    assert_eq!(ids, [json!("admin_01"), json!("u1"), json!("u2"), json!("u3")]);

    let (status, info) = call(&router, Method::GET, "/subscription/payment-info", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["vodafoneCashNumber"], "01004790502");
}
