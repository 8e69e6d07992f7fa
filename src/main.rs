use std::fs::OpenOptions;
use std::sync::Mutex;

use testuz::{Config, runtime};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // The terminal is in raw mode while running, so logs go to a file.
    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("testuz=info")),
                )
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!(
            "Could not open log file {}: {}",
            config.log_file.display(),
            e
        ),
    }

    if let Err(e) = runtime::run(config).await {
        eprintln!("Error running client: {}", e);
        std::process::exit(1);
    }
}
