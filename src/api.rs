/// Loading collaborator for country datasets.
///
/// A dataset comes either from an HTTP endpoint serving the REST Countries v2
/// JSON array (`/v2/all`) or from a local file with the same content.
///
/// ### Notes
/// - Transport errors and 5xx responses are retried a few times with a short backoff;
///   any other non-success status fails immediately.
/// - Timeouts default to 30s total / 10s connect (see `config`).
///
/// Typical usage:
/// ```no_run
/// # use country_facts::api::Source;
/// let source: Source = "https://restcountries.com/v2/all".parse()?;
/// let countries = source.load()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::config::{
    DEFAULT_SOURCE, HTTP_CONNECT_TIMEOUT, HTTP_MAX_REDIRECTS, HTTP_TIMEOUT, RETRY_BACKOFF_MS,
};
use crate::error::LoadError;
use crate::models::Country;
use crate::storage;
use log::{debug, info, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Where to read the dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Source::Url(DEFAULT_SOURCE.into())
    }
}

impl FromStr for Source {
    type Err = Infallible;

    /// Anything starting with `http://` or `https://` is a URL, the rest a file path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Source::Url(s.to_string()))
        } else {
            Ok(Source::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(u) => f.write_str(u),
            Source::File(p) => write!(f, "{}", p.display()),
        }
    }
}

impl Source {
    /// Read every country record from this source.
    pub fn load(&self) -> Result<Vec<Country>, LoadError> {
        let countries = match self {
            Source::Url(url) => Client::new()?.fetch_countries(url)?,
            Source::File(path) => storage::read_countries(path)?,
        };
        info!("loaded {} countries from {}", countries.len(), self);
        Ok(countries)
    }
}

/// Synchronous HTTP client for the countries endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    pub fn new() -> Result<Self, LoadError> {
        let http = HttpClient::builder()
            .timeout(HTTP_TIMEOUT) // total request timeout
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .redirect(Policy::limited(HTTP_MAX_REDIRECTS))
            .user_agent(concat!("country_facts/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// GET `url` and decode the body as a JSON array of countries.
    ///
    /// ### Errors
    /// - `LoadError::Http` for a non-retryable status (4xx, ...)
    /// - `LoadError::Exhausted` when every attempt hit a 5xx or a transport error
    /// - `LoadError::Decode` when the payload is not a country array
    pub fn fetch_countries(&self, url: &str) -> Result<Vec<Country>, LoadError> {
        let body = self.get_bytes(url)?;
        debug!("GET {} returned {} bytes", url, body.len());
        storage::parse_countries(&body)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let mut last_err = String::from("no attempt made");
        for attempt in 0..RETRY_BACKOFF_MS.len() {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return Ok(r.bytes()?.to_vec());
                }
                Ok(r) if r.status().is_server_error() => {
                    last_err = format!("HTTP {}", r.status());
                }
                Ok(r) => {
                    return Err(LoadError::Http {
                        url: url.to_string(),
                        status: r.status().as_u16(),
                    });
                }
                Err(e) => last_err = e.to_string(),
            }
            warn!("GET {} attempt {} failed: {}", url, attempt + 1, last_err);
            if let Some(pause) = backoff_before_retry(attempt) {
                std::thread::sleep(pause);
            }
        }
        Err(LoadError::Exhausted {
            attempts: RETRY_BACKOFF_MS.len(),
            message: last_err,
        })
    }
}

/// Pause before the attempt following `attempt`; `None` after the last one.
fn backoff_before_retry(attempt: usize) -> Option<Duration> {
    if attempt + 1 < RETRY_BACKOFF_MS.len() {
        RETRY_BACKOFF_MS.get(attempt).copied().map(Duration::from_millis)
    } else {
        None
    }
}
