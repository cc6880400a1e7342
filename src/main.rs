use std::process::ExitCode;

use clap::Parser;

pub mod config;
use config::{Cli, load_config};
pub mod http_probe;
use http_probe::prelude::*;
pub mod suite;
use suite::run_suite;
pub mod summary;
use summary::{exit_status, print_banner, print_summary};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let app_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", report(&e));
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &app_config.config_file {
        log::info!("Configuration read from {path}");
    }

    let prober = match Prober::new(&app_config.prober) {
        Ok(prober) => prober,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", report(&e));
            return ExitCode::FAILURE;
        }
    };

    print_banner(prober.base_url());

    let results = run_suite(&prober, cli.image_path.as_deref()).await;
    print_summary(&results);

    ExitCode::from(exit_status(&results))
}
