//! Image handling for vision requests.
//!
//! Turns a local image file into the inline `data:` URL that chat-completions
//! endpoints accept as an `image_url` content part.
//!
//! # Submodules
//!
//! - `models`: Supported image formats and the extension fallback table.
//! - `encoder`: MIME resolution and data URL encoding.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod encoder;
pub mod models;

pub use encoder::{image_to_data_url, resolve_mime_type, DataUrl};
pub use models::ImageFormat;
