pub mod app;
pub mod config;
pub mod errors;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod sleep;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use models::{AppData, SleepEntry};
pub use state::AppState;
pub use storage::Store;
