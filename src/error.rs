use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FeedError {
    #[error("invalid source name: {0}")]
    InvalidSource(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("request for {descriptor} failed: {message}")]
    FetchTransport { descriptor: String, message: String },

    #[error("{descriptor} returned status {status}")]
    FetchStatus { descriptor: String, status: u16 },

    #[error("failed to decompress {descriptor}: {message}")]
    Decompress { descriptor: String, message: String },

    #[error("no organism annotation found in {0}")]
    AnnotationNotFound(String),

    #[error("organism annotation too short to carry a label: {annotation}")]
    #[diagnostic(help("annotations are expected to start with a 9 character tag such as `organism=`"))]
    AnnotationTooShort { annotation: String },

    #[error("missing config file msa-feed.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

impl FeedError {
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::InvalidSource(_) => "invalid_source",
            FeedError::FetchTransport { .. } | FeedError::FetchStatus { .. } => "fetch_failure",
            FeedError::Decompress { .. } => "decompress_failure",
            FeedError::AnnotationNotFound(_) => "annotation_not_found",
            FeedError::AnnotationTooShort { .. } => "annotation_too_short",
            FeedError::MissingConfig
            | FeedError::ConfigRead(_)
            | FeedError::ConfigParse(_)
            | FeedError::InvalidBaseUrl(_) => "config",
            FeedError::HttpClient(_) => "http_client",
            FeedError::Filesystem(_) => "filesystem",
        }
    }
}
