pub mod app_config;
pub mod cli;
pub mod model;

pub use app_config::{ConfigError, load_config, setup_client, validate_base_url};
pub use cli::Cli;
pub use model::ProberConfig;
