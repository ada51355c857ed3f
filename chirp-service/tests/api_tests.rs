mod common;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

fn token_lifetime(app: &TestApp, token: &str) -> i64 {
    app.jwt_handler
        .decode(token)
        .expect("Token should decode")
        .lifetime_seconds()
}

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/healthz").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let body = app.create_user("walt@breakingbad.com", "04234").await;

    assert_eq!(body["email"], "walt@breakingbad.com");
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.create_user("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/api/users")
        .json(&json!({ "email": "walt@breakingbad.com", "password": "other" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_create_user_missing_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "email": "walt@breakingbad.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing field: password");
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "email": "heisenberg", "password": "04234" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::spawn().await;
    let user = app.create_user("saul@bettercall.com", "123456").await;

    let response = app
        .post("/api/login")
        .json(&json!({ "email": "saul@bettercall.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Incorrect email or password");

    let response = app
        .post("/api/login")
        .json(&json!({ "email": "saul@bettercall.com", "password": "123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], user["id"]);
    assert_eq!(body["email"], "saul@bettercall.com");

    let token = body["token"].as_str().unwrap();
    let user_id = Uuid::parse_str(user["id"].as_str().unwrap()).unwrap();
    assert_eq!(app.jwt_handler.validate(token).unwrap(), user_id);
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .json(&json!({ "email": "nobody@example.com", "password": "123456" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .json(&json!({ "email": "saul@bettercall.com", "password": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/login")
        .json(&json!({ "password": "123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_malformed_bodies_are_bad_requests() {
    let app = TestApp::spawn().await;
    app.create_user("saul@bettercall.com", "123456").await;

    let bodies = [
        json!({
            "email": "saul@bettercall.com",
            "password": "123456",
            "expires_in_seconds": "600"
        }),
        json!({ "email": 5, "password": "123456" }),
    ];

    for request in bodies {
        let response = app.post("/api/login").json(&request).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", request);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid request body");
    }

    let response = app
        .post("/api/login")
        .body(r#"{"email":"saul@bettercall.com","password":"123456"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_malformed_bodies_on_other_endpoints() {
    let app = TestApp::spawn().await;
    app.create_user("saul@bettercall.com", "123456").await;
    let token = app.login("saul@bettercall.com", "123456").await;

    let response = app
        .post("/api/users")
        .body("not json")
        .header("Content-Type", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": 42 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/validate_chirp")
        .body(r#"{"body":"hello"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_login_token_lifetimes() {
    let app = TestApp::spawn().await;
    app.create_user("saul@bettercall.com", "123456").await;

    let cases = [
        (None, 3600),
        (Some(5000), 3600),
        (Some(600), 600),
        (Some(0), 3600),
        (Some(-10), 3600),
    ];

    for (requested, expected) in cases {
        let mut request = json!({ "email": "saul@bettercall.com", "password": "123456" });
        if let Some(seconds) = requested {
            request["expires_in_seconds"] = json!(seconds);
        }

        let response = app.post("/api/login").json(&request).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        let token = body["token"].as_str().unwrap();
        assert_eq!(
            token_lifetime(&app, token),
            expected,
            "requested {:?}",
            requested
        );
    }
}

#[tokio::test]
async fn test_create_chirp_requires_authorization() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/chirps")
        .json(&json!({ "body": "Hello, world!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post("/api/chirps")
        .header("Authorization", "Token abc")
        .json(&json!({ "body": "Hello, world!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_authenticated("/api/chirps", "not.a.token")
        .json(&json!({ "body": "Hello, world!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_chirp_rejects_expired_token() {
    let app = TestApp::spawn().await;
    let user = app.create_user("saul@bettercall.com", "123456").await;
    let user_id = Uuid::parse_str(user["id"].as_str().unwrap()).unwrap();

    let expired = app
        .jwt_handler
        .issue(user_id, Duration::hours(-1))
        .unwrap();

    let response = app
        .post_authenticated("/api/chirps", &expired.token)
        .json(&json!({ "body": "Hello, world!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_create_chirp_as_authorized_user() {
    let app = TestApp::spawn().await;
    let user = app.create_user("saul@bettercall.com", "123456").await;
    let token = app.login("saul@bettercall.com", "123456").await;

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "What a Kerfuffle this is, sharbert!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user_id"], user["id"]);
    assert_eq!(body["body"], "What a **** this is, sharbert!");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_create_chirp_invalid_bodies() {
    let app = TestApp::spawn().await;
    app.create_user("saul@bettercall.com", "123456").await;
    let token = app.login("saul@bettercall.com", "123456").await;

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "x".repeat(141) }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Chirp is too long");

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_get_chirps() {
    let app = TestApp::spawn().await;
    app.create_user("saul@bettercall.com", "123456").await;
    let token = app.login("saul@bettercall.com", "123456").await;

    let mut ids = Vec::new();
    for text in ["first", "second", "third"] {
        let response = app
            .post_authenticated("/api/chirps", &token)
            .json(&json!({ "body": text }))
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let response = app.get("/api/chirps").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let chirps: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(chirps.len(), 3);

    let created: Vec<DateTime<Utc>> = chirps
        .iter()
        .map(|chirp| chirp["created_at"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(created.windows(2).all(|pair| pair[0] <= pair[1]));

    let response = app
        .get(&format!("/api/chirps/{}", ids[1]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let chirp: serde_json::Value = response.json().await.unwrap();
    assert_eq!(chirp["body"], "second");

    let response = app
        .get(&format!("/api/chirps/{}", Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/api/chirps/not-a-uuid").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_chirp() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/validate_chirp")
        .json(&json!({
            "body": "I hear Mastodon is better than Chirpy. sharbert I need to migrate"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["cleaned_body"],
        "I hear Mastodon is better than Chirpy. **** I need to migrate"
    );

    let response = app
        .post("/api/validate_chirp")
        .json(&json!({ "body": "x".repeat(141) }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Chirp is too long");
}

#[tokio::test]
async fn test_metrics_count_file_server_visits() {
    let app = TestApp::spawn().await;

    for _ in 0..3 {
        let response = app.get("/app/").send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    app.get("/api/healthz").send().await.unwrap();

    let response = app.get("/admin/metrics").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap();
    assert!(page.contains("Chirpy has been visited 3 times!"));
}

#[tokio::test]
async fn test_reset_clears_counter_and_users() {
    let app = TestApp::spawn().await;
    app.create_user("saul@bettercall.com", "123456").await;
    app.get("/app/").send().await.unwrap();

    let response = app.post("/admin/reset").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = app
        .get("/admin/metrics")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Chirpy has been visited 0 times!"));

    // The address is free again once the user is gone
    app.create_user("saul@bettercall.com", "123456").await;
}

#[tokio::test]
async fn test_reset_forbidden_outside_dev() {
    let app = TestApp::spawn_on_platform("production").await;
    app.create_user("saul@bettercall.com", "123456").await;

    let response = app.post("/admin/reset").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post("/api/users")
        .json(&json!({ "email": "saul@bettercall.com", "password": "123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
