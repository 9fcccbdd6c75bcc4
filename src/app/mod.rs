// Command driver: locate the image, encode it, ask, report
// Author: kelexine (https://github.com/kelexine)

use crate::analysis::analyze_image;
use crate::error::AnalyzerError;
use crate::openai::VisionClient;
use crate::vision::image_to_data_url;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// What to ask and where to look for the image.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Image path as given by the user.
    pub image: PathBuf,
    pub question: String,
    /// Directory of the running executable; searched first.
    pub script_dir: Option<PathBuf>,
    /// Current working directory; searched second.
    pub working_dir: Option<PathBuf>,
}

impl RunOptions {
    /// Options searching next to the executable, then the working directory.
    pub fn new(image: impl Into<PathBuf>, question: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            question: question.into(),
            script_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            working_dir: std::env::current_dir().ok(),
        }
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Answered(String),
    ClientUnavailable,
    ImageNotFound(PathBuf),
    EncodeFailed(AnalyzerError),
    NoAnswer(AnalyzerError),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Answered(_))
    }
}

/// Find the image: executable-relative first, then working-directory-relative.
///
/// Absolute paths are checked once, as-is.
pub fn resolve_image_path(
    image: &Path,
    script_dir: Option<&Path>,
    working_dir: Option<&Path>,
) -> Option<PathBuf> {
    if image.is_absolute() {
        if image.exists() {
            return Some(image.to_path_buf());
        }
        error!("Image not found at {}", image.display());
        return None;
    }

    let mut tried = false;
    for base in [script_dir, working_dir].into_iter().flatten() {
        let candidate = base.join(image);
        if candidate.exists() {
            if tried {
                info!("Found image at working directory relative path: {}", candidate.display());
            }
            return Some(candidate);
        }
        error!("Image not found at {}", candidate.display());
        tried = true;
    }

    // No base directory known at all: take the path literally
    if !tried && image.exists() {
        return Some(image.to_path_buf());
    }
    None
}

/// Run one question against one image and log the result.
pub async fn run(client: Option<&VisionClient>, options: &RunOptions) -> RunOutcome {
    let Some(client) = client else {
        error!("Exiting: vision client failed to initialize.");
        return RunOutcome::ClientUnavailable;
    };

    let Some(image_path) = resolve_image_path(
        &options.image,
        options.script_dir.as_deref(),
        options.working_dir.as_deref(),
    ) else {
        error!("Giving up: image {} not found", options.image.display());
        return RunOutcome::ImageNotFound(options.image.clone());
    };

    info!("Using image: {}", image_path.display());

    let data_url = match image_to_data_url(&image_path) {
        Ok(data_url) => data_url,
        Err(e) => {
            error!("Error converting image to data URL: {}", e);
            return RunOutcome::EncodeFailed(e);
        }
    };
    info!(
        "Successfully converted image to data URL (first few chars): {}...",
        data_url.preview(25)
    );

    info!(
        "Asking {} the question: '{}' using the image '{}'",
        client.model(),
        options.question,
        options.image.display()
    );

    match analyze_image(Some(client), &data_url, &options.question).await {
        Ok(answer) => {
            info!("Analysis:");
            info!("{}", answer);
            RunOutcome::Answered(answer)
        }
        Err(e) => {
            error!("Failed to get analysis from {}.", client.model());
            RunOutcome::NoAnswer(e)
        }
    }
}
