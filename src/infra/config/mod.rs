mod app_config;
mod file_config;
mod loader;

pub use app_config::{AppConfig, ClientConfig, LogConfig, ServerConfig};
pub use loader::load;
