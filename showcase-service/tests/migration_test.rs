mod common;

use common::TestApp;
use mongodb::bson::doc;
use showcase_service::migrations::v1_patent_status::migrate_patent_status;

fn legacy(id: &str, patent: Option<&str>) -> mongodb::bson::Document {
    let mut record = doc! {
        "id": id,
        "docket": format!("D-{}", id),
        "name": "Legacy",
        "createdAt": mongodb::bson::DateTime::now(),
        "editedAt": mongodb::bson::DateTime::now(),
    };
    if let Some(patent) = patent {
        record.insert("patent", patent);
    }
    record
}

#[tokio::test]
#[ignore = "Requires MongoDB at localhost:27017"]
async fn legacy_patent_values_are_normalized() {
    let app = TestApp::spawn().await;
    app.db
        .raw_technologies()
        .insert_many(
            vec![
                legacy("L-1", None),
                legacy("L-2", Some("pending")),
                legacy("L-3", Some("Granted")),
                legacy("L-4", Some("see attached letter")),
            ],
            None,
        )
        .await
        .unwrap();

    let report = migrate_patent_status(&app.db).await.unwrap();
    assert_eq!(report.missing_set_to_not_filed, 1);
    assert_eq!(report.legacy_values_rewritten, 1);
    assert_eq!(report.unrecognized, vec!["L-4".to_string()]);

    let body: serde_json::Value = app.get("/technologies/L-1").await.json().await.unwrap();
    assert_eq!(body["patent"], "Not Filed");
    let body: serde_json::Value = app.get("/technologies/L-2").await.json().await.unwrap();
    assert_eq!(body["patent"], "Under Examination");

    // Second run has nothing left to fix
    let again = migrate_patent_status(&app.db).await.unwrap();
    assert_eq!(again.missing_set_to_not_filed, 0);
    assert_eq!(again.legacy_values_rewritten, 0);
    assert_eq!(again.unrecognized, vec!["L-4".to_string()]);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at localhost:27017"]
async fn migration_runs_on_startup_when_enabled() {
    let seed = TestApp::spawn().await;
    seed.db
        .raw_technologies()
        .insert_one(legacy("L-9", Some("Lapsed")), None)
        .await
        .unwrap();

    let db_name = seed.db_name.clone();
    let app = TestApp::spawn_with(|config| {
        config.mongodb.database = Some(db_name.clone());
        config.migrations.run_on_startup = true;
    })
    .await;

    let body: serde_json::Value = app.get("/technologies/L-9").await.json().await.unwrap();
    assert_eq!(body["patent"], "Abandoned/Lapsed");

    app.cleanup().await;
    seed.cleanup().await;
}
