// OpenAI-compatible API client module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod models;

pub use client::VisionClient;

use zeroize::Zeroize;

/// API key held in memory only as long as the client lives
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey(String);

// Custom Debug impl that never logs the key
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}
