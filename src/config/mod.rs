// Application and database configuration

pub mod app;
pub mod database;

pub use app::AppConfig;
pub use database::{DatabaseConfig, MIGRATOR};
