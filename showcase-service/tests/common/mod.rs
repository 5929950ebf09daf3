#![allow(dead_code)]

use showcase_service::config::{
    CorsConfig, MigrationConfig, MongoConfig, ObservabilityConfig, ShowcaseConfig,
};
use showcase_service::services::MongoDb;
use showcase_service::startup::{build_router, AppState, Application};
use service_core::axum::Router;
use service_core::config::Config as CoreConfig;
use uuid::Uuid;

pub const MONGO_URI: &str = "mongodb://localhost:27017";

/// Port 1 refuses connections; the short timeout makes queries fail fast.
pub const UNREACHABLE_MONGO_URI: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";

pub fn test_config(uri: &str, database: &str) -> ShowcaseConfig {
    ShowcaseConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: uri.to_string(),
            database: Some(database.to_string()),
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        migrations: MigrationConfig {
            run_on_startup: false,
        },
    }
}

/// Router wired to a database that cannot be reached. No socket is bound.
pub async fn unreachable_router() -> Router {
    let client = service_core::mongodb::Client::with_uri_str(UNREACHABLE_MONGO_URI)
        .await
        .expect("URI should parse");
    let state = AppState {
        db: MongoDb::new(client, "showcase_unreachable"),
    };
    build_router(state, &CorsConfig { allowed_origins: Vec::new() })
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut ShowcaseConfig)) -> Self {
        let db_name = format!("showcase_test_{}", Uuid::new_v4().simple());
        let mut config = test_config(MONGO_URI, &db_name);
        customize(&mut config);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the readiness endpoint
        let client = reqwest::Client::new();
        let ready_url = format!("http://127.0.0.1:{}/ready", port);
        for _ in 0..50 {
            if client.get(&ready_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            db,
            db_name,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
