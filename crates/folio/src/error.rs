#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Invalid record source: {0}")]
    InvalidSource(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Content API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },
}
