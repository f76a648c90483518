use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDescriptor(String);

impl SourceDescriptor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_gzip(&self) -> bool {
        self.0.ends_with(".gz")
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SourceDescriptor {
    type Err = FeedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid = !normalized.is_empty()
            && !normalized.starts_with('/')
            && !normalized.contains('\\')
            && !normalized.split('/').any(|segment| segment == ".." || segment.is_empty())
            && !normalized
                .chars()
                .any(|ch| ch.is_whitespace() || ch.is_control() || matches!(ch, '?' | '#' | '%'));
        if !is_valid {
            return Err(FeedError::InvalidSource(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganismAnnotation(String);

impl OrganismAnnotation {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganismAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: String,
    pub residues: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelabeledRecord {
    pub label: String,
    pub residues: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResidueMode {
    #[default]
    Concatenate,
    FirstLine,
}

impl fmt::Display for ResidueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResidueMode::Concatenate => write!(f, "concatenate"),
            ResidueMode::FirstLine => write!(f, "first-line"),
        }
    }
}
