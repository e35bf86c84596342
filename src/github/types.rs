//! Release type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the release tag for a package is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Derive the tag from the version declared in Cargo.toml
    #[default]
    Cargo,
    /// Scan the release feed for tags matching `git_tag_regex`
    Latest,
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseType::Cargo => write!(f, "cargo"),
            ReleaseType::Latest => write!(f, "latest"),
        }
    }
}

/// A tag and the artifact URI it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCandidate {
    pub tag: String,
    pub version: String,
    pub uri: String,
}

/// A release artifact that was downloaded and unpacked
#[derive(Debug, Clone, Serialize)]
pub struct InstalledBinary {
    #[serde(flatten)]
    pub candidate: ReleaseCandidate,
    pub files: Vec<PathBuf>,
}

/// Raw response returned by an [`HttpProvider`](crate::di::HttpProvider)
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// `Location` header, set on redirects
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            location: None,
            body: body.into(),
        }
    }

    pub fn redirect(status: u16, location: &str) -> Self {
        Self {
            status,
            location: Some(location.to_string()),
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
