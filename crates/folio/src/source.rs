use crate::prelude::*;
use folio_core::content::{parse_records, ContentRecord};
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Where content records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    Stdin,
    File(PathBuf),
    Url(String),
}

impl RecordSource {
    /// Interpret a SOURCE argument: `-` for stdin, an http(s) URL, or a file path
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(Error::InvalidSource("source must not be empty".to_string()).into());
        }

        if input == "-" {
            return Ok(RecordSource::Stdin);
        }

        if input.starts_with("http://") || input.starts_with("https://") {
            return Ok(RecordSource::Url(input.to_string()));
        }

        Ok(RecordSource::File(PathBuf::from(input)))
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Stdin => write!(f, "stdin"),
            RecordSource::File(path) => write!(f, "{}", path.display()),
            RecordSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Read the raw payload from a source
async fn read_payload(source: &RecordSource) -> Result<String> {
    match source {
        RecordSource::Stdin => {
            let mut payload = String::new();
            tokio::io::stdin()
                .read_to_string(&mut payload)
                .await
                .context("Failed to read records from stdin")?;
            Ok(payload)
        }
        RecordSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read records from {}", path.display())),
        RecordSource::Url(url) => fetch_payload(url).await,
    }
}

/// Fetch records from the content API
async fn fetch_payload(url: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .header("User-Agent", "folio")
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        }
        .into());
    }

    response
        .text()
        .await
        .context("Failed to read content API response")
}

/// Load and validate content records. Malformed records are logged and skipped.
pub async fn load_records(source: &RecordSource) -> Result<Vec<ContentRecord>> {
    let payload = read_payload(source).await?;
    let parsed =
        parse_records(&payload).map_err(|e| eyre!("Failed to parse records from {}: {}", source, e))?;

    for issue in &parsed.issues {
        warn!("skipping record #{} from {}: {}", issue.index, source, issue.reason);
    }

    info!(
        "loaded {} records from {} ({} skipped)",
        parsed.records.len(),
        source,
        parsed.issues.len()
    );

    Ok(parsed.records)
}
