use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lockerd::config::Config;
use tower::ServiceExt;

/// Admin account seeded by migration (must match m20250601_initial.rs)
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

/// Password shared by the seeded demo customers.
const CUSTOMER_PASSWORD: &str = "password123";

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("lockerd-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    // Lighter hashing keeps the test suite fast.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = lockerd::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    lockerd::api::router(state).await
}

/// Log in and return the session cookie to replay on later requests.
async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "username": username, "password": password }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn get_json(
    app: &Router,
    uri: &str,
    cookie: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::COOKIE, cookie)
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_session_gate() {
    let app = spawn_app().await;

    // The protected family answers 401 to anonymous callers.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The customers family authorizes itself and answers 403 instead.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/customers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;

    let attempt = |username: &str, password: &str| {
        let payload = serde_json::json!({ "username": username, "password": password });
        let app = app.clone();
        async move {
            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/auth/login")
                        .header("Content-Type", "application/json")
                        .body(Body::from(payload.to_string()))
                        .unwrap(),
                )
                .await
                .unwrap();
            let status = response.status();
            let body = response.into_body().collect().await.unwrap().to_bytes();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            (status, json)
        }
    };

    let (wrong_pw_status, wrong_pw_body) = attempt(ADMIN_USERNAME, "not-the-password").await;
    let (no_user_status, no_user_body) = attempt("no_such_user", "whatever").await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);

    // A wrong password and an unknown username produce the same error so the
    // response does not reveal which field was wrong.
    assert_eq!(wrong_pw_body["error"], no_user_body["error"]);
    assert_eq!(wrong_pw_body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_logout_session_lifecycle() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = get_json(&app, "/api/auth/me", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "admin");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Logout answers the standard envelope like every other endpoint.
    let logout_body = response.into_body().collect().await.unwrap().to_bytes();
    let logout_json: serde_json::Value = serde_json::from_slice(&logout_body).unwrap();
    assert_eq!(logout_json["success"], true);
    assert_eq!(logout_json["data"], true);

    // The flushed session no longer resolves to a user.
    let (status, _) = get_json(&app, "/api/auth/me", &cookie).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_crud() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, before) = get_json(&app, "/api/users", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let count_before = before["data"].as_array().unwrap().len();

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/users",
        &cookie,
        serde_json::json!({
            "username": "integration_user",
            "email": "integration@example.com",
            "password": "s3cret-pass"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["username"], "integration_user");
    assert_eq!(created["data"]["role"], "user");
    let user_id = created["data"]["id"].as_i64().unwrap();

    let (status, user) = get_json(&app, &format!("/api/users/{user_id}"), &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["data"]["email"], "integration@example.com");

    // Partial update: untouched attributes keep their stored value.
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/users/{user_id}"),
        &cookie,
        serde_json::json!({ "email": "renamed@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["email"], "renamed@example.com");
    assert_eq!(updated["data"]["username"], "integration_user");

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/users/{user_id}"),
        &cookie,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&app, &format!("/api/users/{user_id}"), &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, after) = get_json(&app, "/api/users", &cookie).await;
    assert_eq!(after["data"].as_array().unwrap().len(), count_before);
}

#[tokio::test]
async fn test_duplicate_users_are_rejected_without_side_effects() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (_, before) = get_json(&app, "/api/users", &cookie).await;
    let count_before = before["data"].as_array().unwrap().len();

    // The seeded demo customer john_doe already holds this username.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users",
        &cookie,
        serde_json::json!({
            "username": "john_doe",
            "email": "fresh@example.com",
            "password": "whatever1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already exists");

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users",
        &cookie,
        serde_json::json!({
            "username": "brand_new_name",
            "email": "john@example.com",
            "password": "whatever1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    // Neither failed attempt left a row behind.
    let (_, after) = get_json(&app, "/api/users", &cookie).await;
    assert_eq!(after["data"].as_array().unwrap().len(), count_before);
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users",
        &cookie,
        serde_json::json!({ "username": "half_filled", "email": "half@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users",
        &cookie,
        serde_json::json!({ "username": "", "email": "e@example.com", "password": "p" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (_, me) = get_json(&app, "/api/auth/me", &cookie).await;
    let admin_id = me["data"]["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "DELETE",
        &format!("/api/users/{admin_id}"),
        &cookie,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot delete your own account");

    // The account is still there.
    let (status, _) = get_json(&app, &format!("/api/users/{admin_id}"), &cookie).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_admin_access_tiers() {
    let app = spawn_app().await;
    let cookie = login(&app, "john_doe", CUSTOMER_PASSWORD).await;

    let (_, me) = get_json(&app, "/api/auth/me", &cookie).await;
    let own_id = me["data"]["id"].as_i64().unwrap();

    // Any authenticated user may list users.
    let (status, _) = get_json(&app, "/api/users", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    // But creating users is admin-only.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users",
        &cookie,
        serde_json::json!({
            "username": "sneaky",
            "email": "sneaky@example.com",
            "password": "pw123456"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized");

    // Self is readable, other accounts are not.
    let (status, _) = get_json(&app, &format!("/api/users/{own_id}"), &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let other_id = if own_id == 1 { 2 } else { 1 };
    let (status, _) = get_json(&app, &format!("/api/users/{other_id}"), &cookie).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A non-admin role change request is silently dropped.
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/users/{own_id}"),
        &cookie,
        serde_json::json!({ "email": "john.new@example.com", "role": "admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["email"], "john.new@example.com");
    assert_eq!(updated["data"]["role"], "customer");

    // The customers family is admin-only even for logged-in customers.
    let (status, _) = get_json(&app, "/api/customers", &cookie).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customers_crud_and_soft_delete() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/customers",
        &cookie,
        serde_json::json!({
            "username": "walk_in",
            "email": "walkin@example.com",
            "password": "pw123456"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["role"], "customer");
    assert_eq!(created["data"]["active"], true);
    let customer_id = created["data"]["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/customers/{customer_id}"),
        &cookie,
        serde_json::json!({ "email": "walkin.updated@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["email"], "walkin.updated@example.com");

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/customers/{customer_id}"),
        &cookie,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Soft delete: the record survives with active = false.
    let (_, customers) = get_json(&app, "/api/customers", &cookie).await;
    let deleted = customers["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"].as_i64() == Some(customer_id))
        .expect("soft-deleted customer should still be listed");
    assert_eq!(deleted["active"], false);
}

#[tokio::test]
async fn test_stats_reflect_seeded_dataset() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = get_json(&app, "/api/stats", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    // 15 demo customers plus the bootstrap admin.
    assert_eq!(body["data"]["users"], 16);
    assert_eq!(body["data"]["total_lockers"], 15);
    assert_eq!(body["data"]["active_lockers"], 11);
    assert_eq!(body["data"]["pending_payments"], 5);
}

#[tokio::test]
async fn test_read_only_inventory_endpoints() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, lockers) = get_json(&app, "/api/lockers", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let lockers = lockers["data"].as_array().unwrap();
    assert_eq!(lockers.len(), 15);
    let occupied = lockers
        .iter()
        .filter(|l| l["status"] == "occupied")
        .count();
    assert_eq!(occupied, 11);
    assert!(lockers.iter().any(|l| l["number"] == "L101"));

    let (status, reservations) = get_json(&app, "/api/reservations", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reservations["data"].as_array().unwrap().len(), 9);

    let (status, payments) = get_json(&app, "/api/payments", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let payments = payments["data"].as_array().unwrap();
    assert_eq!(payments.len(), 11);
    let pending = payments.iter().filter(|p| p["status"] == "pending").count();
    assert_eq!(pending, 5);
}

#[tokio::test]
async fn test_notifications_feed() {
    let app = spawn_app().await;
    let cookie = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = get_json(&app, "/api/notifications", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let notifications = body["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 7);
    for notification in notifications {
        assert!(notification["title"].is_string());
        assert!(notification["message"].is_string());
        assert!(notification["type"].is_string());
        assert!(notification["timestamp"].is_string());
    }
}
