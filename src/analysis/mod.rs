//! Single-turn image question answering.
//!
//! Builds one user message holding the question and the image, sends it
//! through a [`VisionClient`] and returns the first choice's text.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::{AnalyzerError, Result};
use crate::openai::models::{ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl};
use crate::openai::VisionClient;
use crate::vision::DataUrl;
use tracing::{debug, error, warn};

/// Instruction placed in front of every question.
pub const PROMPT_PREFIX: &str = "Answer user's question using the provided image.";

/// Build the chat request for one image and one question.
pub fn build_request(client: &VisionClient, data_url: &DataUrl, question: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: client.model().to_string(),
        messages: vec![ChatMessage::user(vec![
            ContentPart::Text {
                text: format!("{} {}", PROMPT_PREFIX, question),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: data_url.as_str().to_string(),
                },
            },
        ])],
        max_completion_tokens: Some(client.max_completion_tokens()),
    }
}

/// Ask `question` about the image in `data_url`.
///
/// Without a client this logs a warning and returns
/// [`AnalyzerError::ClientUnavailable`] without touching the network. Remote
/// failures are logged and returned; there are no retries.
pub async fn analyze_image(
    client: Option<&VisionClient>,
    data_url: &DataUrl,
    question: &str,
) -> Result<String> {
    let Some(client) = client else {
        warn!("Vision client is not initialized. Cannot analyze image.");
        return Err(AnalyzerError::ClientUnavailable);
    };

    let request = build_request(client, data_url, question);
    debug!(
        "Sending {} image ({} base64 chars) to {}",
        data_url.mime_type(),
        data_url.payload().len(),
        client.model()
    );

    let result = client
        .chat_completion(&request)
        .await
        .and_then(|response| match response.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                if let Some(refusal) = response.refusal() {
                    warn!("Model refused to answer: {}", refusal);
                }
                Err(AnalyzerError::EmptyResponse)
            }
        });

    if let Err(e) = &result {
        error!("Error calling OpenAI API: {}", e);
    }
    result
}
