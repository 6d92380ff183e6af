//! Error types for the library.
//!
//! `thiserror` enums here; the `cfacts` binary wraps them in `anyhow` with
//! context before printing.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the aggregation engine or surfaced from loading.
#[derive(Error, Debug)]
pub enum FactsError {
    /// The caller passed an empty or missing required argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An aggregate was requested on data that cannot answer it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("failed to load countries: {0}")]
    Load(#[from] LoadError),
}

/// Errors from fetching or decoding a country dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request to {url} failed with HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("network error after {attempts} attempts: {message}")]
    Exhausted { attempts: usize, message: String },

    #[error("JSON deserialization failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = FactsError> = std::result::Result<T, E>;
