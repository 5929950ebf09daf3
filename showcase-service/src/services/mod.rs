pub mod database;
pub mod metrics;

pub use database::{is_duplicate_key, MongoDb};
pub use self::metrics::{get_metrics, init_metrics};
