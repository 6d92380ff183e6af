//! Defaults shared by the loader, the engine and the CLI.

use std::time::Duration;

/// Dataset used when no `--source` is given.
pub const DEFAULT_SOURCE: &str = "https://restcountries.com/v2/all";

/// Total request timeout for dataset downloads
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const HTTP_MAX_REDIRECTS: usize = 5;

/// Sleep between attempts on 5xx responses and transport errors.
pub const RETRY_BACKOFF_MS: [u64; 3] = [100, 300, 700];

/// Country whose GINI rank opens the report.
pub const REPORT_SUBJECT: &str = "South Africa";

/// Returned by the lowest-GINI query when no record carries a GINI value.
pub const NO_COUNTRY_FOUND: &str = "No country found";

/// Number of languages listed in the report.
pub const TOP_LANGUAGES: usize = 3;
