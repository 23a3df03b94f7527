use std::sync::Arc;

use activities::database::ActivityRegistry;
use activities::web::app_router;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::tempdir;
use tower::ServiceExt;

const SEEDED: [&str; 9] = [
    "Soccer",
    "Basketball",
    "Debate Club",
    "Math Olympiad",
    "Drama Club",
    "Art Studio",
    "Chess Club",
    "Programming Class",
    "Gym Class",
];

fn app() -> (Router, Arc<ActivityRegistry>) {
    let registry = Arc::new(ActivityRegistry::with_default_seed().unwrap());
    let router = app_router(registry.clone(), "static");
    (router, registry)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn participants(registry: &ActivityRegistry, name: &str) -> Vec<String> {
    registry.get(name).await.unwrap().participants
}

fn detail(body: &Value) -> String {
    body["detail"].as_str().unwrap_or_default().to_lowercase()
}

#[tokio::test]
async fn get_activities_returns_every_seeded_activity() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/activities").await;
    assert_eq!(status, StatusCode::OK);

    let map = body.as_object().unwrap();
    for name in SEEDED {
        assert!(map.contains_key(name), "missing {}", name);
    }
    for (_, activity) in map {
        assert!(activity.get("description").is_some());
        assert!(activity.get("schedule").is_some());
        assert!(activity.get("max_participants").is_some());
        assert!(activity["participants"].is_array());
    }
}

#[tokio::test]
async fn get_single_activity() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/activities/Chess%20Club").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_participants"], 12);

    let (status, body) = send(&app, "GET", "/activities/Ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(detail(&body).contains("not found"));
}

#[tokio::test]
async fn signup_new_participant() {
    let (app, registry) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/activities/Soccer/signup?email=test@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("signed up"));
    assert!(participants(&registry, "Soccer")
        .await
        .contains(&"test@mergington.edu".to_string()));
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let (app, registry) = app();
    let uri = "/activities/Soccer/signup?email=duplicate@mergington.edu";

    let (status, _) = send(&app, "POST", uri).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("already signed up"));

    let count = participants(&registry, "Soccer")
        .await
        .iter()
        .filter(|p| *p == "duplicate@mergington.edu")
        .count();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn unknown_activity_is_not_found() {
    let (app, _) = app();
    for action in ["signup", "unregister"] {
        let uri = format!("/activities/Ghost/{}?email=x@y.com", action);
        let (status, body) = send(&app, "POST", &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(detail(&body).contains("not found"));
    }
}

#[tokio::test]
async fn unregister_non_participant_is_rejected() {
    let (app, registry) = app();
    let before = participants(&registry, "Art Studio").await;

    let (status, body) = send(
        &app,
        "POST",
        "/activities/Art%20Studio/unregister?email=nobody@z.com",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("not registered"));
    assert_eq!(participants(&registry, "Art Studio").await, before);
}

#[tokio::test]
async fn signup_and_unregister_workflow() {
    let (app, registry) = app();
    let before = participants(&registry, "Programming Class").await;

    let (status, _) = send(
        &app,
        "POST",
        "/activities/Programming%20Class/signup?email=workflow@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        participants(&registry, "Programming Class").await.len(),
        before.len() + 1
    );

    let (status, body) = send(
        &app,
        "POST",
        "/activities/Programming%20Class/unregister?email=workflow@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("unregistered"));
    assert_eq!(participants(&registry, "Programming Class").await, before);
}

#[tokio::test]
async fn missing_email_is_bad_request() {
    let (app, registry) = app();
    let before = participants(&registry, "Gym Class").await;

    let (status, body) = send(&app, "POST", "/activities/Gym%20Class/signup").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("email is required"));

    let (status, body) = send(&app, "POST", "/activities/Gym%20Class/unregister").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("email is required"));

    let (status, body) = send(&app, "POST", "/activities/Gym%20Class/signup?email=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("email is required"));

    assert_eq!(participants(&registry, "Gym Class").await, before);
}

#[tokio::test]
async fn root_redirects_to_landing_page() {
    let static_dir = tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>Activities</html>").unwrap();
    let registry = Arc::new(ActivityRegistry::with_default_seed().unwrap());
    let app = app_router(registry, static_dir.path());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(location, "/static/index.html");

    let response = app
        .oneshot(Request::builder().uri(&location).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL].to_str().unwrap(),
        "no-store"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, "<html>Activities</html>".as_bytes());
}

#[tokio::test]
async fn full_activity_from_seed_file_rejects_signup() {
    let dir = tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    std::fs::write(
        &seed_path,
        r#"{"Robotics": {"description": "Build robots", "schedule": "Mondays",
            "max_participants": 1, "participants": ["first@mergington.edu"]}}"#,
    )
    .unwrap();

    let registry = Arc::new(ActivityRegistry::from_seed_file(&seed_path).unwrap());
    let app = app_router(registry.clone(), dir.path());

    let (status, body) = send(
        &app,
        "POST",
        "/activities/Robotics/signup?email=second@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("full"));
    assert_eq!(
        participants(&registry, "Robotics").await,
        vec!["first@mergington.edu"]
    );
}
