use std::fs;
use std::io::{ErrorKind, Read};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::MultiGzDecoder;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::domain::SourceDescriptor;
use crate::error::FeedError;

pub const DEFAULT_BASE_URL: &str = "https://github.com/anneutsabita/Dataset-MSA/raw/main/genes/";

#[derive(Debug, Clone)]
pub struct RawDocument {
    pub location: String,
    pub text: String,
}

pub trait SourceClient: Send + Sync {
    fn fetch(&self, descriptor: &SourceDescriptor) -> Result<RawDocument, FeedError>;
}

#[derive(Clone)]
pub struct HttpSourceClient {
    client: Client,
    base_url: String,
}

impl HttpSourceClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FeedError> {
        let base_url = normalize_base_url(base_url)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("msa-feed/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FeedError::HttpClient(err.to_string()))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FeedError::HttpClient(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn source_url(&self, descriptor: &SourceDescriptor) -> String {
        format!("{}{}", self.base_url, descriptor.as_str())
    }
}

impl SourceClient for HttpSourceClient {
    fn fetch(&self, descriptor: &SourceDescriptor) -> Result<RawDocument, FeedError> {
        let url = self.source_url(descriptor);
        debug!(%url, "requesting source");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| FeedError::FetchTransport {
                descriptor: descriptor.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FeedError::FetchStatus {
                descriptor: descriptor.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|err| FeedError::FetchTransport {
            descriptor: descriptor.to_string(),
            message: err.to_string(),
        })?;
        debug!(%url, bytes = bytes.len(), "source received");
        let text = decode_body(descriptor, &bytes)?;
        Ok(RawDocument {
            location: url,
            text,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySourceClient {
    root: Utf8PathBuf,
}

impl DirectorySourceClient {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl SourceClient for DirectorySourceClient {
    fn fetch(&self, descriptor: &SourceDescriptor) -> Result<RawDocument, FeedError> {
        let path = self.root.join(descriptor.as_str());
        debug!(%path, "reading source");
        let bytes = fs::read(path.as_std_path()).map_err(|err| match err.kind() {
            ErrorKind::NotFound => FeedError::FetchStatus {
                descriptor: descriptor.to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
            },
            _ => FeedError::FetchTransport {
                descriptor: descriptor.to_string(),
                message: err.to_string(),
            },
        })?;
        let text = decode_body(descriptor, &bytes)?;
        Ok(RawDocument {
            location: path.to_string(),
            text,
        })
    }
}

pub fn normalize_base_url(value: &str) -> Result<String, FeedError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed)
        .map_err(|err| FeedError::InvalidBaseUrl(format!("{trimmed}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FeedError::InvalidBaseUrl(format!(
            "{trimmed}: unsupported scheme {}",
            url.scheme()
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(FeedError::InvalidBaseUrl(format!(
            "{trimmed}: query and fragment are not allowed"
        )));
    }
    let mut normalized = url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

fn decode_body(descriptor: &SourceDescriptor, bytes: &[u8]) -> Result<String, FeedError> {
    if descriptor.is_gzip() {
        let mut decoded = Vec::new();
        MultiGzDecoder::new(bytes)
            .read_to_end(&mut decoded)
            .map_err(|err| FeedError::Decompress {
                descriptor: descriptor.to_string(),
                message: err.to_string(),
            })?;
        return Ok(String::from_utf8_lossy(&decoded).into_owned());
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
