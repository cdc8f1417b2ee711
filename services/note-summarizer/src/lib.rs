//! Note summarizer - client for a clinical note summarization service
//!
//! Sends a free-text clinical note to the service in one of several output
//! modes and returns the rewritten text.

pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod mode;
pub mod text;

pub use client::SummarizerClient;
pub use config::{load_config, Config};
pub use error::{Result, SummarizerError};
pub use mode::SummaryMode;

use std::sync::Arc;

use crate::io::ReqwestHttpClient;

/// Build a client for the configured server using reqwest
pub fn connect(config: &Config) -> Result<SummarizerClient> {
    let http = ReqwestHttpClient::with_timeout(config.server.request_timeout())?;
    Ok(SummarizerClient::new(&config.server.base_url, Arc::new(http)))
}
