use crate::error::LoadError;
use crate::models::Country;
use crate::report::Report;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Decode a JSON array of countries.
pub fn parse_countries(bytes: &[u8]) -> Result<Vec<Country>, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read a dataset saved from the countries API.
pub fn read_countries<P: AsRef<Path>>(path: P) -> Result<Vec<Country>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_countries(&bytes)
}

/// Save a report as pretty JSON.
pub fn save_report_json<P: AsRef<Path>>(report: &Report, path: P) -> anyhow::Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(report)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
