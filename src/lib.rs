pub mod achievements;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tips;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{DailyMetricsStore, Outcome};
