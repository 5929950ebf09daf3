mod common;

use common::TestApp;
use reqwest::StatusCode;
use showcase_service::models::Event;
use showcase_service::services::is_duplicate_key;

#[tokio::test]
#[ignore = "Requires MongoDB at localhost:27017"]
async fn list_events_returns_stored_event_with_default_is_active() {
    let app = TestApp::spawn().await;
    app.db
        .events()
        .insert_one(
            Event::new("Demo Day".to_string(), "March".to_string(), "12".to_string()),
            None,
        )
        .await
        .unwrap();

    let response = app.get("/events").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["title"], "Demo Day");
    assert_eq!(body[0]["day"], "12");
    assert_eq!(body[0]["isActive"], false);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at localhost:27017"]
async fn duplicate_title_and_day_is_rejected_by_storage() {
    let app = TestApp::spawn().await;
    let events = app.db.events();

    events
        .insert_one(
            Event::new("Demo Day".to_string(), "March".to_string(), "12".to_string()),
            None,
        )
        .await
        .unwrap();

    let err = events
        .insert_one(
            Event::new("Demo Day".to_string(), "April".to_string(), "12".to_string()),
            None,
        )
        .await
        .unwrap_err();
    assert!(is_duplicate_key(&err));

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at localhost:27017"]
async fn same_title_on_another_day_is_allowed() {
    let app = TestApp::spawn().await;
    let events = app.db.events();

    events
        .insert_one(
            Event::new("Demo Day".to_string(), "March".to_string(), "12".to_string()),
            None,
        )
        .await
        .unwrap();
    events
        .insert_one(
            Event::new("Demo Day".to_string(), "March".to_string(), "13".to_string()),
            None,
        )
        .await
        .unwrap();

    let body: Vec<serde_json::Value> = app.get("/events").await.json().await.unwrap();
    assert_eq!(body.len(), 2);

    app.cleanup().await;
}
