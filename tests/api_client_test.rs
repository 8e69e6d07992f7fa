use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value as JsonValue, json};
use testuz::models::{
    AttemptResponse, AttemptSubmission, NotificationSetting, OptionPayload, QuestionPayload,
};
use testuz::{ApiClient, Error};
use tokio::net::TcpListener;

const TOKEN: &str = "abc123";

fn is_admin(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Token {}", TOKEN))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
        .into_response()
}

fn question_json(id: u64, text: &str, admin: bool) -> JsonValue {
    let options = if admin {
        json!([
            {"id": id * 10 + 1, "text": "4", "is_correct": true},
            {"id": id * 10 + 2, "text": "5", "is_correct": false}
        ])
    } else {
        json!([
            {"id": id * 10 + 1, "text": "4"},
            {"id": id * 10 + 2, "text": "5"}
        ])
    };
    json!({"id": id, "text": text, "options": options})
}

fn attempt_json() -> JsonValue {
    json!({
        "id": 7,
        "first_name": "Dilnoza",
        "last_name": "Rahimova",
        "total_questions": 2,
        "correct_answers": 1,
        "incorrect_answers": 1,
        "created_at": "2025-03-01T09:30:00Z",
        "answers": [
            {"id": 1, "question": 1, "question_text": "2+2?", "selected_option": 11,
             "option_text": "4", "is_correct": true},
            {"id": 2, "question": 2, "question_text": "3+3?", "selected_option": 22,
             "option_text": "5", "is_correct": false}
        ]
    })
}

async fn login(Json(body): Json<JsonValue>) -> Response {
    if body["username"] == "admin" && body["password"] == "secret" {
        Json(json!({"token": TOKEN})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Login yoki parol noto'g'ri."})),
        )
            .into_response()
    }
}

async fn list_questions(headers: HeaderMap) -> Json<JsonValue> {
    let admin = is_admin(&headers);
    Json(json!([question_json(1, "2+2?", admin), question_json(2, "3+3?", admin)]))
}

async fn create_question(headers: HeaderMap, Json(body): Json<JsonValue>) -> Response {
    if !is_admin(&headers) {
        return unauthorized();
    }
    if body["text"] == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<h1>Server Error</h1>").into_response();
    }
    let text = body["text"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(question_json(3, &text, true))).into_response()
}

async fn update_question(
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<JsonValue>,
) -> Response {
    if !is_admin(&headers) {
        return unauthorized();
    }
    if id == 99 {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    }
    let text = body["text"].as_str().unwrap_or_default().to_string();
    Json(question_json(id, &text, true)).into_response()
}

async fn delete_question(headers: HeaderMap, Path(_id): Path<u64>) -> Response {
    if !is_admin(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn get_notification(headers: HeaderMap) -> Response {
    if !is_admin(&headers) {
        return unauthorized();
    }
    Json(json!({"bot_token": "123:abc", "admin_chat_id": "-100500", "is_active": true}))
        .into_response()
}

async fn update_notification(headers: HeaderMap, Json(body): Json<JsonValue>) -> Response {
    if !is_admin(&headers) {
        return unauthorized();
    }
    if body["bot_token"] == "" {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(body).into_response()
}

async fn list_attempts(headers: HeaderMap) -> Response {
    if !is_admin(&headers) {
        return unauthorized();
    }
    Json(json!([attempt_json()])).into_response()
}

async fn submit_attempt(headers: HeaderMap, Json(body): Json<JsonValue>) -> Response {
    if headers.contains_key(AUTHORIZATION) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected token"})))
            .into_response();
    }
    if body["responses"].as_array().is_none_or(|r| r.is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Javoblar topilmadi."})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(attempt_json())).into_response()
}

async fn spawn_stub() -> ApiClient {
    let router = Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/questions/", get(list_questions).post(create_question))
        .route(
            "/api/questions/:id/",
            put(update_question).delete(delete_question),
        )
        .route(
            "/api/notification/",
            get(get_notification).put(update_notification),
        )
        .route("/api/attempts/", get(list_attempts).post(submit_attempt));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });

    client_for(addr)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{}/api/", addr), Duration::from_secs(5)).expect("client")
}

fn sample_payload(text: &str) -> QuestionPayload {
    QuestionPayload {
        text: text.to_string(),
        options: vec![
            OptionPayload {
                text: "4".into(),
                is_correct: true,
            },
            OptionPayload {
                text: "5".into(),
                is_correct: false,
            },
        ],
    }
}

#[tokio::test]
async fn login_returns_the_token() {
    let api = spawn_stub().await;

    let token = api.login("admin", "secret").await.expect("login");
    assert_eq!(token, TOKEN);
}

#[tokio::test]
async fn rejected_login_surfaces_the_error_field() {
    let api = spawn_stub().await;

    let err = api.login("admin", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Login yoki parol noto'g'ri.");
}

#[tokio::test]
async fn questions_carry_flags_only_for_admins() {
    let api = spawn_stub().await;

    let public = api.list_questions(None).await.expect("public list");
    assert_eq!(public.len(), 2);
    assert!(public[0].options.iter().all(|o| o.is_correct.is_none()));

    let admin = api.list_questions(Some(TOKEN)).await.expect("admin list");
    assert_eq!(admin[0].options[0].is_correct, Some(true));
    assert_eq!(admin[0].options[1].is_correct, Some(false));
}

#[tokio::test]
async fn creates_and_updates_questions() {
    let api = spawn_stub().await;

    let created = api
        .create_question(TOKEN, &sample_payload("Yangi savol"))
        .await
        .expect("create");
    assert_eq!(created.id, 3);
    assert_eq!(created.text, "Yangi savol");

    let updated = api
        .update_question(TOKEN, 1, &sample_payload("Tahrirlangan"))
        .await
        .expect("update");
    assert_eq!(updated.id, 1);
    assert_eq!(updated.text, "Tahrirlangan");
}

#[tokio::test]
async fn detail_message_wins_over_status_fallback() {
    let api = spawn_stub().await;

    let err = api
        .update_question(TOKEN, 99, &sample_payload("x"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Not found.");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_message() {
    let api = spawn_stub().await;

    let err = api
        .create_question(TOKEN, &sample_payload("boom"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Server xatosi (500)");
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let api = spawn_stub().await;

    api.delete_question(TOKEN, 1).await.expect("delete");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let api = spawn_stub().await;

    let err = api.delete_question("stale", 1).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Authentication credentials were not provided.");
}

#[tokio::test]
async fn notification_round_trip() {
    let api = spawn_stub().await;

    let current = api.get_notification(TOKEN).await.expect("get");
    assert!(current.is_active);
    assert_eq!(current.admin_chat_id, "-100500");

    let next = NotificationSetting {
        bot_token: "999:zzz".into(),
        admin_chat_id: "42".into(),
        is_active: false,
    };
    let saved = api.update_notification(TOKEN, &next).await.expect("put");
    assert_eq!(saved, next);
}

#[tokio::test]
async fn empty_notification_reply_decodes_as_defaults() {
    let api = spawn_stub().await;

    let saved = api
        .update_notification(TOKEN, &NotificationSetting::default())
        .await
        .expect("put");
    assert_eq!(saved, NotificationSetting::default());
}

#[tokio::test]
async fn dashboard_loads_everything() {
    let api = spawn_stub().await;

    let data = api.load_dashboard(TOKEN).await.expect("dashboard");
    assert_eq!(data.questions.len(), 2);
    assert_eq!(data.notification.bot_token, "123:abc");
    assert_eq!(data.attempts.len(), 1);
    assert_eq!(data.attempts[0].full_name(), "Dilnoza Rahimova");
}

#[tokio::test]
async fn dashboard_fails_when_any_part_fails() {
    let api = spawn_stub().await;

    let err = api.load_dashboard("stale").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn submits_attempt_without_token() {
    let api = spawn_stub().await;

    let submission = AttemptSubmission {
        first_name: "Dilnoza".into(),
        last_name: "Rahimova".into(),
        responses: vec![
            AttemptResponse {
                question: 1,
                option: 11,
            },
            AttemptResponse {
                question: 2,
                option: 22,
            },
        ],
    };
    let attempt = api.submit_attempt(&submission).await.expect("submit");
    assert_eq!(attempt.score_label(), "1/2");
    assert_eq!(attempt.percentage(), 50);
    assert_eq!(attempt.answers.len(), 2);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = client_for(addr);
    let err = api.list_questions(None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.status(), None);
}
