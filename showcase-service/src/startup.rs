use crate::config::{CorsConfig, ShowcaseConfig};
use crate::handlers;
use crate::migrations;
use crate::services::MongoDb;
use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: MongoDb,
}

/// Routes plus the middleware stack. Separate from [`Application`] so it can
/// be exercised without binding a socket.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/technologies", get(handlers::list_technologies))
        .route("/technologies/:id", get(handlers::get_technology))
        .route("/events", get(handlers::list_events))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(cors))
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins = if cors.allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        // Origins are validated when the configuration is loaded.
        AllowOrigin::list(
            cors.allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Connects to MongoDB, prepares indexes (and migrations when enabled)
    /// and binds the listener. Any failure here happens before a single
    /// connection is accepted.
    pub async fn build(config: ShowcaseConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, config.mongodb.database.as_deref())
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            AppError::StartupFailure(anyhow::Error::new(e))
        })?;

        if config.migrations.run_on_startup {
            let report = migrations::v1_patent_status::migrate_patent_status(&db)
                .await
                .map_err(|e| {
                    tracing::error!("Patent status migration failed: {}", e);
                    AppError::StartupFailure(anyhow::Error::new(e))
                })?;
            tracing::info!(?report, "Patent status migration finished");
        }

        let state = AppState { db };
        let router = build_router(state.clone(), &config.cors);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::StartupFailure(anyhow::Error::new(e))
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
            state,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serves until `signal` resolves, then drains in-flight requests.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
