// CLI module for vision-ask
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// Image used when none is given on the command line
pub const DEFAULT_IMAGE: &str = "data/test_images/data_table.png";

/// Question asked when none is given on the command line
pub const DEFAULT_QUESTION: &str = "Based on the image, what is the Operating Profit for 2023?";

/// vision-ask - Ask an OpenAI-compatible vision model a question about a local image
#[derive(Parser, Debug)]
#[command(name = "vision-ask", version, about, long_about = None)]
pub struct Args {
    /// Image to analyze (PNG, JPEG, GIF or WEBP). Relative paths are tried
    /// next to the executable first, then in the working directory
    #[arg(short, long, default_value = DEFAULT_IMAGE)]
    pub image: PathBuf,

    /// Question to ask about the image
    #[arg(short, long, default_value = DEFAULT_QUESTION)]
    pub question: String,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the configured completion token limit
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.openai.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.openai.max_completion_tokens = max_tokens;
        }
    }
}
