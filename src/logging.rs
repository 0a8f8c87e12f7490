//! Tracing setup and log-safe value helpers

use std::fmt;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `default_level`. `format` is `json` or anything else
/// for human-readable text. Can only be called once per process.
pub fn init_tracing(default_level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry
            .with(tracing_fmt::layer().json().with_target(true))
            .init();
    } else {
        registry.with(tracing_fmt::layer().with_target(true)).init();
    }
}

/// API key that renders only its first 8 characters
///
/// # Example
/// ```
/// use car_cost_advisor::logging::SensitiveApiKey;
///
/// let key = "sk-ant-api123-abcdef123456";
/// assert_eq!(SensitiveApiKey::new(key).to_string(), "sk-ant-a***");
/// ```
#[derive(Clone, Debug)]
pub struct SensitiveApiKey<'a> {
    inner: &'a str,
}

impl<'a> SensitiveApiKey<'a> {
    pub fn new(key: &'a str) -> Self {
        Self { inner: key }
    }
}

impl<'a> fmt::Display for SensitiveApiKey<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.inner.chars().take(8).collect();
        if visible.len() >= self.inner.len() {
            write!(f, "***")
        } else {
            write!(f, "{}***", visible)
        }
    }
}

/// Shorten text for a log line, respecting char boundaries
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
