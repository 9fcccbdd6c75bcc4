//! Utility functions and helpers for vision-ask.
//!
//! This module provides cross-cutting concerns: structured logging and
//! secret sanitization.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization with secret filters.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
