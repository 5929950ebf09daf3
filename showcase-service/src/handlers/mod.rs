pub mod events;
pub mod health;
pub mod technologies;

pub use events::list_events;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use technologies::{get_technology, list_technologies};
