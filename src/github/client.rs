//! HTTP client used to reach release feeds and release downloads

use crate::config::Config;
use crate::core::{KilnError, KilnResult};
use crate::di::traits::HttpProvider;
use crate::github::types::HttpResponse;
use async_trait::async_trait;
use reqwest::{header, redirect, Client as HttpClient, Url};
use std::time::Duration;
use tracing::debug;

/// Hosts that receive the configured token
const AUTHENTICATED_HOSTS: &[&str] = &["github.com", "api.github.com"];

/// Release HTTP client
///
/// Redirects are never followed here; the resolver walks them itself so each
/// hop gets the same client/server error classification.
pub struct ReleaseHttpClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl ReleaseHttpClient {
    /// Create a new client from user config
    pub fn new(config: &Config) -> KilnResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| KilnError::Config(format!("Invalid user agent: {}", e)))?,
        );

        let token = config.github_token();
        if let Some(ref token) = token {
            // Validate early so a bad token is a config error, not a request failure
            header::HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| KilnError::Config(format!("Invalid GitHub token: {}", e)))?;
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| KilnError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, token })
    }

    /// GET a URL and collect status, `Location` and body
    pub async fn get(&self, url: &str) -> KilnResult<HttpResponse> {
        let parsed = Url::parse(url)
            .map_err(|e| KilnError::Release(format!("Invalid URL {}: {}", url, e)))?;

        let mut request = self.http_client.get(parsed.clone());
        if let Some(ref token) = self.token {
            if should_authenticate(&parsed) {
                request = request.header(header::AUTHORIZATION, format!("token {}", token));
            }
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| resolve_location(&parsed, v));
        debug!(url, status, "GET");

        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}

fn should_authenticate(url: &Url) -> bool {
    url.host_str()
        .map(|host| AUTHENTICATED_HOSTS.contains(&host))
        .unwrap_or(false)
}

/// Turn a possibly relative `Location` into an absolute URL
fn resolve_location(base: &Url, location: &str) -> String {
    base.join(location)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| location.to_string())
}

// Implement HttpProvider trait
#[async_trait]
impl HttpProvider for ReleaseHttpClient {
    async fn get(&self, url: &str) -> KilnResult<HttpResponse> {
        Self::get(self, url).await
    }
}
