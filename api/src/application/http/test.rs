use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::{
    application::{
        auth::JwtClaims,
        http::server::http_server::{router, state},
    },
    args::{
        Args, AuthArgs, BillingArgs, DatabaseArgs, LlmArgs, LogArgs, LogFormat, ServerArgs,
        StorageArgs, SyncArgs,
    },
};

const SECRET: &str = "test-secret";

fn args(data_dir: &TempDir) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        storage: StorageArgs {
            data_dir: data_dir.path().to_path_buf(),
        },
        database: DatabaseArgs {
            database_url: None,
            max_connections: 1,
        },
        sync: SyncArgs { timeout_secs: 1 },
        llm: LlmArgs {
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "http://127.0.0.1:9".to_string(),
        },
        auth: AuthArgs {
            jwt_public_key: None,
            jwt_secret: Some(SECRET.to_string()),
            issuer: None,
        },
        billing: BillingArgs {
            require_subscription: false,
        },
        log: LogArgs {
            filter: "info".to_string(),
            format: LogFormat::Text,
        },
    }
}

async fn server() -> (TestServer, TempDir) {
    let data_dir = tempfile::tempdir().unwrap();
    let state = state(Arc::new(args(&data_dir))).await.unwrap();
    let server = TestServer::new(router(state).unwrap()).unwrap();
    (server, data_dir)
}

fn token(user_id: &str) -> String {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn eggs() -> Value {
    json!({
        "name": "Scrambled eggs",
        "nutrition": { "calories": 200, "protein_g": 14, "fat_g": 15, "carbs_g": 2 }
    })
}

fn reference_profile() -> Value {
    json!({
        "height_in": 70,
        "weight_kg": 70,
        "age_years": 25,
        "gender": "male",
        "activity_level": "moderate",
        "goals": ["maintain"],
        "dietary_restrictions": ["gluten_free"]
    })
}

#[tokio::test]
async fn health_is_public() {
    let (server, _dir) = server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn ledger_requires_a_token() {
    let (server, _dir) = server().await;

    server
        .get("/ledger/days/2024-05-06")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/ledger/days/2024-05-06")
        .authorization_bearer("not-a-token")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn added_entry_shows_up_in_day_and_week() {
    let (server, _dir) = server().await;
    let token = token("user_a");

    let created = server
        .post("/ledger/days/2024-05-08/entries")
        .authorization_bearer(&token)
        .json(&eggs())
        .await;
    created.assert_status(StatusCode::CREATED);
    let entry = created.json::<Value>()["data"].clone();
    assert_eq!(entry["source"], "manual");

    let day = server
        .get("/ledger/days/2024-05-08")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(day["data"]["entries"][0]["id"], entry["id"]);
    assert_eq!(day["data"]["totals"]["calories"], 200.0);

    let week = server
        .get("/ledger/weeks/2024-05-12")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(week["data"]["week_start"], "2024-05-06");
    assert_eq!(week["data"]["days"].as_array().unwrap().len(), 7);
    assert_eq!(week["data"]["weekly_totals"]["protein_g"], 14.0);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (server, _dir) = server().await;
    let token = token("user_a");

    let entry = server
        .post("/ledger/days/2024-05-08/entries")
        .authorization_bearer(&token)
        .json(&eggs())
        .await
        .json::<Value>();
    let path = format!(
        "/ledger/days/2024-05-08/entries/{}",
        entry["data"]["id"].as_str().unwrap()
    );

    let first = server.delete(&path).authorization_bearer(&token).await;
    assert_eq!(first.json::<Value>()["deleted"], true);

    let second = server.delete(&path).authorization_bearer(&token).await;
    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["deleted"], false);

    let day = server
        .get("/ledger/days/2024-05-08")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(day["data"]["totals"]["calories"], 0.0);
}

#[tokio::test]
async fn entries_are_private_to_their_owner() {
    let (server, _dir) = server().await;

    server
        .post("/ledger/days/2024-05-08/entries")
        .authorization_bearer(token("user_a"))
        .json(&eggs())
        .await
        .assert_status(StatusCode::CREATED);

    let other = server
        .get("/ledger/days/2024-05-08")
        .authorization_bearer(token("user_b"))
        .await
        .json::<Value>();
    assert_eq!(other["data"]["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_input_is_a_bad_request() {
    let (server, _dir) = server().await;
    let token = token("user_a");

    server
        .get("/ledger/days/May-6")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let negative = json!({
        "name": "Bad",
        "nutrition": { "calories": -10, "protein_g": 0, "fat_g": 0, "carbs_g": 0 }
    });
    server
        .post("/ledger/days/2024-05-08/entries")
        .authorization_bearer(&token)
        .json(&negative)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_lifecycle() {
    let (server, _dir) = server().await;
    let token = token("user_a");

    server
        .get("/profile")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let saved = server
        .put("/profile")
        .authorization_bearer(&token)
        .json(&reference_profile())
        .await;
    saved.assert_status_ok();
    let saved = saved.json::<Value>();
    assert_eq!(saved["data"]["calories"], 2537);
    assert_eq!(saved["data"]["macros"]["protein_g"], 112);
    assert_eq!(saved["data"]["macros"]["fat_g"], 85);
    assert_eq!(saved["data"]["macros"]["carbs_g"], 331);

    let fetched = server
        .get("/profile")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn incomplete_profile_names_the_missing_field() {
    let (server, _dir) = server().await;
    let mut body = reference_profile();
    body.as_object_mut().unwrap().remove("gender");

    let response = server
        .put("/profile")
        .authorization_bearer(token("user_a"))
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>();
    assert_eq!(error["code"], "E_BAD_REQUEST");
    assert!(error["message"].as_str().unwrap().contains("gender"));
}

#[tokio::test]
async fn goals_preview_is_not_saved() {
    let (server, _dir) = server().await;
    let token = token("user_a");

    let mut cutting = reference_profile();
    cutting["goals"] = json!(["lose_weight"]);

    let preview = server
        .post("/profile/goals")
        .authorization_bearer(&token)
        .json(&cutting)
        .await
        .json::<Value>();
    assert_eq!(preview["data"]["calories"], 2137);

    server
        .get("/profile")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn day_progress_against_profile() {
    let (server, _dir) = server().await;
    let token = token("user_a");

    let before = server
        .get("/ledger/days/2024-05-08/progress")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert!(before["data"]["progress"].is_null());

    server
        .put("/profile")
        .authorization_bearer(&token)
        .json(&reference_profile())
        .await
        .assert_status_ok();
    server
        .post("/ledger/days/2024-05-08/entries")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Big day",
            "nutrition": { "calories": 2100, "protein_g": 112, "fat_g": 40, "carbs_g": 100 }
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let progress = server
        .get("/ledger/days/2024-05-08/progress")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    let progress = &progress["data"]["progress"];
    assert_eq!(progress["calories"]["band"], "near");
    assert_eq!(progress["protein_g"]["band"], "on_track");
    assert_eq!(progress["protein_g"]["percent"], 100.0);
    assert_eq!(progress["fat_g"]["band"], "under");
}

#[tokio::test]
async fn food_analysis_needs_an_image() {
    let (server, _dir) = server().await;

    let form = MultipartForm::new().add_text("date", "2024-05-08");
    server
        .post("/food-analysis/image")
        .authorization_bearer(token("user_a"))
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn food_analysis_rejects_non_images() {
    let (server, _dir) = server().await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"%PDF-1.7".to_vec())
            .file_name("menu.pdf")
            .mime_type("application/pdf"),
    );
    server
        .post("/food-analysis/image")
        .authorization_bearer(token("user_a"))
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn food_analysis_rejects_unreadable_utc_offset() {
    let (server, _dir) = server().await;

    let form = MultipartForm::new()
        .add_text("utc_offset_minutes", "east")
        .add_part(
            "image",
            Part::bytes(vec![0xff, 0xd8, 0xff, 0xe0])
                .file_name("lunch.jpg")
                .mime_type("image/jpeg"),
        );
    server
        .post("/food-analysis/image")
        .authorization_bearer(token("user_a"))
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn food_analysis_rejects_out_of_range_utc_offset() {
    let (server, _dir) = server().await;

    let form = MultipartForm::new()
        .add_text("utc_offset_minutes", "1500")
        .add_part(
            "image",
            Part::bytes(vec![0xff, 0xd8, 0xff, 0xe0])
                .file_name("lunch.jpg")
                .mime_type("image/jpeg"),
        );
    server
        .post("/food-analysis/image")
        .authorization_bearer(token("user_a"))
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (server, _dir) = server().await;

    let doc = server.get("/api-docs/openapi.json").await.json::<Value>();

    assert!(doc["paths"]["/ledger/days/{date}/entries"]["post"].is_object());
    assert!(doc["paths"]["/profile"]["put"].is_object());
    let analysis = doc["paths"]["/food-analysis/image"]["post"]["description"]
        .as_str()
        .unwrap();
    assert!(analysis.contains("utc_offset_minutes"));
}
