// vision-ask - Ask an OpenAI-compatible vision model a question about a local image
// Author: kelexine (https://github.com/kelexine)

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod utils;
pub mod vision;
