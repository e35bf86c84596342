//! Prebuilt binary resolution
//!
//! Decides whether a release tarball exists for the package being installed
//! and, if so, downloads and unpacks it:
//!
//! - `github_releases = false`: nothing is fetched.
//! - `cargo` release type: the tag is `git_tag_format` applied to the
//!   Cargo.toml version and exactly that release is tried.
//! - `latest` release type: the repository's `releases.atom` feed is scanned
//!   and every tag matching `git_tag_regex` is tried, newest first.
//!
//! A 4xx from the release host means "no binary" and the caller can build
//! locally. A 5xx aborts with [`KilnError::Server`].

use crate::build::targets::Target;
use crate::core::{KilnError, KilnResult};
use crate::di::{HttpProvider, ServiceContainer, Unpacker};
use crate::github::feed::{parse_release_tags, releases_feed_uri};
use crate::github::types::{HttpResponse, InstalledBinary, ReleaseCandidate, ReleaseType};
use crate::package::manifest::PackageManifest;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Redirect hops followed per download before giving up
pub const MAX_REDIRECTS: usize = 5;

/// Resolves and installs a prebuilt binary for one package
pub struct ReleaseResolver {
    manifest: PackageManifest,
    target: Target,
    http: Arc<dyn HttpProvider>,
    unpacker: Arc<dyn Unpacker>,
}

impl ReleaseResolver {
    /// Create a resolver for the host target
    pub fn new(manifest: PackageManifest, services: &ServiceContainer) -> Self {
        Self {
            manifest,
            target: Target::host(),
            http: Arc::clone(&services.http),
            unpacker: Arc::clone(&services.unpacker),
        }
    }

    /// Resolve for a different target than the host
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Download and unpack a prebuilt binary if one is published
    ///
    /// Returns `Ok(None)` when release downloads are disabled or no usable
    /// release exists.
    pub async fn download_binary(&self) -> KilnResult<Option<InstalledBinary>> {
        let settings = &self.manifest.settings;
        if !settings.github_releases {
            debug!("GitHub release downloads disabled");
            return Ok(None);
        }

        match settings.github_release_type {
            ReleaseType::Latest => self.download_latest_binary().await,
            ReleaseType::Cargo => self.download_cargo_version().await,
        }
    }

    /// Try the release whose tag is derived from the Cargo.toml version
    async fn download_cargo_version(&self) -> KilnResult<Option<InstalledBinary>> {
        let version = &self.manifest.package.version;
        let tag = self.manifest.settings.format_tag(version);
        let candidate = ReleaseCandidate {
            uri: self.github_download_uri(&tag, version)?,
            tag,
            version: version.clone(),
        };

        match self.fetch_artifact(&candidate.uri).await? {
            Some(tarball) => {
                info!(tag = %candidate.tag, "unpacking release for Cargo version");
                self.install(candidate, &tarball).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Scan the release feed and install the first matching tag that has a tarball
    async fn download_latest_binary(&self) -> KilnResult<Option<InstalledBinary>> {
        let feed_uri = releases_feed_uri(self.repository()?);
        let Some(feed) = self.fetch_artifact(&feed_uri).await? else {
            debug!(uri = %feed_uri, "no release feed");
            return Ok(None);
        };

        let feed = String::from_utf8_lossy(&feed);
        let tags = parse_release_tags(&feed)?;
        let candidates = self.latest_candidates(&tags)?;
        if candidates.is_empty() {
            debug!(
                regex = %self.manifest.settings.git_tag_regex,
                "no release tags match git_tag_regex"
            );
            return Ok(None);
        }

        for candidate in candidates {
            if let Some(tarball) = self.fetch_artifact(&candidate.uri).await? {
                info!(tag = %candidate.tag, "unpacking latest release");
                return self.install(candidate, &tarball).map(Some);
            }
        }

        debug!("no matching release has a tarball for this target");
        Ok(None)
    }

    /// Candidates for the tags matching `git_tag_regex`, in feed order
    pub fn latest_candidates(&self, tags: &[String]) -> KilnResult<Vec<ReleaseCandidate>> {
        let settings = &self.manifest.settings;
        tags.iter()
            .filter_map(|tag| settings.match_tag(tag).map(|version| (tag, version)))
            .map(|(tag, version)| {
                Ok(ReleaseCandidate {
                    uri: self.github_download_uri(tag, version)?,
                    tag: tag.clone(),
                    version: version.to_string(),
                })
            })
            .collect()
    }

    /// `<repository>/releases/download/<tag>/<tarball>`
    pub fn github_download_uri(&self, tag: &str, version: &str) -> KilnResult<String> {
        Ok(format!(
            "{}/releases/download/{}/{}",
            self.repository()?,
            tag,
            self.target
                .tarball_filename(self.manifest.library_name(), version)
        ))
    }

    fn repository(&self) -> KilnResult<&str> {
        self.manifest.package.repository.as_deref().ok_or_else(|| {
            KilnError::Config(format!(
                "Package '{}' enables github_releases but has no repository in Cargo.toml",
                self.manifest.package.name
            ))
        })
    }

    /// GET a URL, following redirects
    ///
    /// `Ok(None)` on a client error, `Err` on a server error.
    async fn fetch_artifact(&self, uri: &str) -> KilnResult<Option<Vec<u8>>> {
        let mut current = uri.to_string();

        for _ in 0..=MAX_REDIRECTS {
            debug!(uri = %current, "downloading");
            let response = self.http.get(&current).await?;

            match classify(response) {
                Fetched::Body(body) => return Ok(Some(body)),
                Fetched::Redirect(location) => current = location,
                Fetched::Missing(status) => {
                    debug!(uri = %current, status, "release artifact does not exist");
                    return Ok(None);
                }
                Fetched::ServerError(status) => {
                    return Err(KilnError::Server {
                        url: current,
                        status,
                    })
                }
            }
        }

        warn!(uri, "too many redirects, treating release as missing");
        Ok(None)
    }

    fn install(&self, candidate: ReleaseCandidate, tarball: &[u8]) -> KilnResult<InstalledBinary> {
        let files = self.unpacker.unpack(tarball)?;
        Ok(InstalledBinary { candidate, files })
    }
}

enum Fetched {
    Body(Vec<u8>),
    Redirect(String),
    Missing(u16),
    ServerError(u16),
}

fn classify(response: HttpResponse) -> Fetched {
    if response.is_server_error() {
        Fetched::ServerError(response.status)
    } else if response.is_redirect() {
        match response.location {
            Some(location) => Fetched::Redirect(location),
            None => Fetched::Missing(response.status),
        }
    } else if response.is_success() {
        Fetched::Body(response.body)
    } else {
        Fetched::Missing(response.status)
    }
}
