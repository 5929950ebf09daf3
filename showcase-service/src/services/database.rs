use crate::config::DEFAULT_DATABASE;
use crate::models::event::EVENT_COLLECTION;
use crate::models::tech_detail::TECH_DETAIL_COLLECTION;
use crate::models::{Event, TechDetail};
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Shared handle to the document store. Cloning is cheap; all clones share
/// the driver's connection pool.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Wraps an existing client without contacting the server.
    pub fn new(client: MongoClient, database: &str) -> Self {
        let db = client.database(database);
        Self { client, db }
    }

    /// Connects and pings the server, so an unreachable database is reported
    /// here rather than on the first request.
    ///
    /// The database is `database` when given, else the one named in the URI,
    /// else [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::StartupFailure(anyhow::Error::new(e))
        })?;

        let database = resolve_database(database, &options);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::StartupFailure(anyhow::Error::new(e))
        })?;

        let mongo = Self::new(client, &database);
        mongo
            .health_check()
            .await
            .map_err(|e| AppError::StartupFailure(anyhow::Error::new(e)))?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(mongo)
    }

    /// Creates the uniqueness and lookup indexes. Index names match the ones
    /// the collections were originally created with, so existing indexes are
    /// reused instead of conflicting.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for showcase-service");

        let technologies = self.technologies();

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("id_1".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        technologies.create_index(id_index, None).await.map_err(|e| {
            tracing::error!("Failed to create id index on {}: {}", TECH_DETAIL_COLLECTION, e);
            AppError::from(e)
        })?;
        tracing::info!("Created unique index on {}.id", TECH_DETAIL_COLLECTION);

        let docket_index = IndexModel::builder()
            .keys(doc! { "docket": 1 })
            .options(
                IndexOptions::builder()
                    .name("docket_1".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        technologies
            .create_index(docket_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create docket index on {}: {}",
                    TECH_DETAIL_COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on {}.docket", TECH_DETAIL_COLLECTION);

        let creator_index = IndexModel::builder()
            .keys(doc! { "createdBy.userId": 1 })
            .options(
                IndexOptions::builder()
                    .name("createdBy.userId_1".to_string())
                    .build(),
            )
            .build();

        technologies
            .create_index(creator_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create createdBy.userId index on {}: {}",
                    TECH_DETAIL_COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on {}.createdBy.userId", TECH_DETAIL_COLLECTION);

        // Not queried by any endpoint yet; reserved for full-text search.
        let text_index = IndexModel::builder()
            .keys(doc! { "overview": "text", "detailedDescription": "text" })
            .options(
                IndexOptions::builder()
                    .name("overview_text_detailedDescription_text".to_string())
                    .build(),
            )
            .build();

        technologies
            .create_index(text_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create text index on {}: {}",
                    TECH_DETAIL_COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!(
            "Created text index on {}.(overview, detailedDescription)",
            TECH_DETAIL_COLLECTION
        );

        let title_day_index = IndexModel::builder()
            .keys(doc! { "title": 1, "day": 1 })
            .options(
                IndexOptions::builder()
                    .name("title_1_day_1".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.events()
            .create_index(title_day_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create (title, day) index on {}: {}",
                    EVENT_COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on {}.(title, day)", EVENT_COLLECTION);

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn technologies(&self) -> Collection<TechDetail> {
        self.db.collection(TECH_DETAIL_COLLECTION)
    }

    /// Untyped view of the technology collection. Reads go through this view
    /// so records written under older schema versions are served unchanged.
    pub fn raw_technologies(&self) -> Collection<Document> {
        self.db.collection(TECH_DETAIL_COLLECTION)
    }

    pub fn events(&self) -> Collection<Event> {
        self.db.collection(EVENT_COLLECTION)
    }

    pub fn raw_events(&self) -> Collection<Document> {
        self.db.collection(EVENT_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn resolve_database(configured: Option<&str>, options: &ClientOptions) -> String {
    configured
        .map(str::to_string)
        .or_else(|| options.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}

/// True when `err` is a unique index violation reported by the server.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::BulkWrite(failure) => failure
            .write_errors
            .iter()
            .flatten()
            .any(|e| e.code == DUPLICATE_KEY_CODE),
        _ => false,
    }
}
