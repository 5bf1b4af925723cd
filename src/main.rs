use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::AsyncReadExt;

pub mod config;
use config::app_config::load_config;
pub mod input;
use input::prelude::*;
pub mod logging;
pub mod report;
pub mod stun_probe;
use stun_probe::prelude::*;
use stun_probe::report as error_report;

const EXIT_CONFIG_ERROR: u8 = 1;
const EXIT_INPUT_ERROR: u8 = 2;

async fn read_input(input_file: Option<&Path>) -> std::io::Result<String> {
    match input_file {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// Decodes, normalizes and validates the server list, then probes it.
/// Input problems are returned before any probe is started.
async fn check_servers(text: &str, prober: &Prober) -> Result<ResultSet, InputError> {
    let servers = prepare_addresses(&parse_input(text)?)?;

    log::info!(
        "Testing {} STUN server(s) with a {}ms timeout...",
        servers.len(),
        prober.timeout().as_millis()
    );
    Ok(probe_all(prober, &servers).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let _logger = match logging::configure("info") {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {e}");
            None
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", error_report(&e));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let text = match read_input(config.input_file.as_deref()).await {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to read STUN server list: {e}");
            return ExitCode::from(EXIT_INPUT_ERROR);
        }
    };

    let prober = Prober::new(Arc::new(WebRtcNegotiator::new()), config.probe_timeout());
    let results = match check_servers(&text, &prober).await {
        Ok(results) => results,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::from(EXIT_INPUT_ERROR);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = report::render(&mut stdout, &results, &config.probe) {
        log::error!("Failed to write report: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
