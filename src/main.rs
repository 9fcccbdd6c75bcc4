// vision-ask - Ask an OpenAI-compatible vision model a question about a local image
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use vision_ask::app::{self, RunOptions};
use vision_ask::cli::Args;
use vision_ask::config::AppConfig;
use vision_ask::openai::VisionClient;
use vision_ask::utils::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Pick up OPENAI_API_KEY / OPENAI_API_BASE from .env, if present
    let dotenv_path = dotenvy::dotenv().ok();

    // Phase 2: Load configuration
    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    // Phase 3: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting vision-ask v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    // Phase 4: Build the API client; a failure here is reported by the run below
    let client = match VisionClient::new(&config.openai) {
        Ok(client) => Some(client),
        Err(e) => {
            error!("Error initializing OpenAI client: {}", e);
            None
        }
    };

    // Phase 5: Ask
    let options = RunOptions::new(args.image, args.question);
    let outcome = app::run(client.as_ref(), &options).await;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
