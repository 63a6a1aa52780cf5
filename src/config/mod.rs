/// Application settings from config.toml
pub mod app;

pub use app::{AppConfig, BotConfig, CacheConfig, NotificationConfig, load_app_configuration};
