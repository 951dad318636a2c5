// tests/panel_api_tests.rs

use examhall::{config::Config, loader, routes, state::AppState};

/// Writes a small catalog into a fresh temp directory and returns its path.
fn seed_catalog_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("examhall-tests-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create catalog dir");

    let tests = serde_json::json!({
        "tests": [
            {
                "code": "T1",
                "name": "Sample Test",
                "time": 1,
                "questions": [
                    { "id": 1, "title": "First", "options": ["a", "b"], "correct": 0 }
                ],
                "points": { "ok": 2, "bad": 1 },
                "groups": ["8A"]
            },
            {
                // No points, no groups: the editor substitutes defaults.
                "code": "T2",
                "name": "Bare Test",
                "time": 10,
                "questions": []
            }
        ]
    });
    let grades = serde_json::json!({ "grades": [] });
    let teachers = serde_json::json!({
        "teachers": [{ "name": "Ana Prof", "user": "aprof", "pass": "secret", "tests": [] }]
    });

    std::fs::write(dir.join("tests.json"), tests.to_string()).unwrap();
    std::fs::write(dir.join("grades.json"), grades.to_string()).unwrap();
    std::fs::write(dir.join("teachers.json"), teachers.to_string()).unwrap();
    dir
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let config = Config {
        catalog_dir: seed_catalog_dir().to_string_lossy().to_string(),
        port: 0,
        rust_log: "error".to_string(),
    };

    let state = AppState::new(config);
    loader::load_into(&state).await;

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn list_tests(client: &reqwest::Client, address: &str) -> Vec<serde_json::Value> {
    client
        .get(format!("{}/api/panel/tests", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json::<Vec<serde_json::Value>>()
        .await
        .unwrap()
}

#[tokio::test]
async fn login_returns_identity_without_password() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/api/panel/login", address))
        .json(&serde_json::json!({ "user": "aprof", "pass": "secret" }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let identity: serde_json::Value = response.json().await.unwrap();
    assert_eq!(identity["name"], "Ana Prof");
    assert_eq!(identity["user"], "aprof");
    assert!(identity.get("pass").is_none());
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for (user, pass) in [("aprof", "wrong"), ("nobody", "secret"), ("APROF", "secret")] {
        // Act
        let response = client
            .post(format!("{}/api/panel/login", address))
            .json(&serde_json::json!({ "user": user, "pass": pass }))
            .send()
            .await
            .expect("Failed to execute request");

        // Assert
        assert_eq!(response.status().as_u16(), 401, "pair {:?}", (user, pass));
    }
}

#[tokio::test]
async fn tests_list_shows_cards() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let tests = list_tests(&client, &address).await;

    // Assert
    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0]["code"], "T1");
    assert_eq!(tests[0]["name"], "Sample Test");
    assert_eq!(tests[0]["time"], 1);
}

#[tokio::test]
async fn editor_load_substitutes_defaults() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: T2 has no points, window, flags or groups in the source
    let copy: serde_json::Value = client
        .get(format!("{}/api/panel/tests/T2", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(copy["code"], "T2");
    assert_eq!(copy["pts_ok"], 1);
    assert_eq!(copy["pts_bad"], 0);
    assert_eq!(copy["from"], "");
    assert_eq!(copy["to"], "");
    assert_eq!(copy["show_results"], true);
    assert_eq!(copy["show_correct"], false);
    assert_eq!(copy["groups"], "");
}

#[tokio::test]
async fn editor_load_unknown_code_yields_fresh_draft() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let copy: serde_json::Value = client
        .get(format!("{}/api/panel/tests/NOPE", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Assert
    assert!(copy["code"].is_null());
    assert_eq!(copy["name"], "");
    assert_eq!(copy["time"], 0);
    assert_eq!(copy["pts_ok"], 1);
    assert_eq!(copy["questions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn save_without_code_appends_exactly_one_test() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let before = list_tests(&client, &address).await.len();

    // Act
    let response = client
        .post(format!("{}/api/panel/tests", address))
        .json(&serde_json::json!({
            "name": "New Test",
            "time": "30",
            "pts_ok": "3",
            "pts_bad": "1",
            "groups": "A, B"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    let code = body["code"].as_str().unwrap();
    assert!(code.starts_with("T-"));
    assert_eq!(list_tests(&client, &address).await.len(), before + 1);

    // The stored draft round-trips with the split and trimmed groups
    let copy: serde_json::Value = client
        .get(format!("{}/api/panel/tests/{}", address, code))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(copy["time"], 30);
    assert_eq!(copy["pts_ok"], 3);
    assert_eq!(copy["pts_bad"], 1);
    assert_eq!(copy["groups"], "A,B");
}

#[tokio::test]
async fn save_existing_code_mutates_in_place() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let before = list_tests(&client, &address).await.len();

    // Act
    let response = client
        .post(format!("{}/api/panel/tests", address))
        .json(&serde_json::json!({
            "code": "T1",
            "name": "Renamed",
            "time": "45",
            "pts_ok": "5",
            "pts_bad": "2",
            "groups": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: no net change in catalog size, fields written back
    assert_eq!(response.status().as_u16(), 200);
    let tests = list_tests(&client, &address).await;
    assert_eq!(tests.len(), before);
    let copy: serde_json::Value = client
        .get(format!("{}/api/panel/tests/T1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(copy["name"], "Renamed");
    assert_eq!(copy["time"], 45);
    assert_eq!(copy["groups"], "");
    // Questions were not part of the draft and survive untouched
    assert_eq!(copy["questions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn save_parses_numeric_garbage_to_defaults() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let body: serde_json::Value = client
        .post(format!("{}/api/panel/tests", address))
        .json(&serde_json::json!({
            "name": "Sloppy",
            "time": "soon",
            "pts_ok": "",
            "pts_bad": "none"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Assert: time falls back to 0, points to {1, 0}
    let copy: serde_json::Value = client
        .get(format!("{}/api/panel/tests/{}", address, body["code"].as_str().unwrap()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(copy["time"], 0);
    assert_eq!(copy["pts_ok"], 1);
    assert_eq!(copy["pts_bad"], 0);
}

#[tokio::test]
async fn settings_creates_teacher_once() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_user = format!("t_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let payload = serde_json::json!({
        "name": "New Teacher",
        "user": unique_user,
        "pass": "pw"
    });

    // Act
    let first = client
        .post(format!("{}/api/panel/settings/teachers", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");
    let second = client
        .post(format!("{}/api/panel/settings/teachers", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(first.status().as_u16(), 201);
    assert_eq!(second.status().as_u16(), 409);

    // The new account can log in
    let response = client
        .post(format!("{}/api/panel/login", address))
        .json(&serde_json::json!({ "user": unique_user, "pass": "pw" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn settings_links_test_idempotently() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let payload = serde_json::json!({ "user": "aprof", "code": "T1" });

    // Act
    let first: serde_json::Value = client
        .post(format!("{}/api/panel/settings/links", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = client
        .post(format!("{}/api/panel/settings/links", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(first["linked"], true);
    assert_eq!(second["linked"], false);

    let identity: serde_json::Value = client
        .post(format!("{}/api/panel/login", address))
        .json(&serde_json::json!({ "user": "aprof", "pass": "secret" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(identity["tests"], serde_json::json!(["T1"]));
}

#[tokio::test]
async fn link_requires_existing_test_and_teacher() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for payload in [
        serde_json::json!({ "user": "aprof", "code": "NOPE" }),
        serde_json::json!({ "user": "nobody", "code": "T1" }),
    ] {
        // Act
        let response = client
            .post(format!("{}/api/panel/settings/links", address))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        // Assert
        assert_eq!(response.status().as_u16(), 404);
    }
}
