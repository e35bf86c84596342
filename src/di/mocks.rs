//! Mock implementations of service traits for testing

use super::traits::{HttpProvider, Unpacker};
use crate::core::{KilnError, KilnResult};
use crate::github::types::HttpResponse;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock HTTP provider for testing
///
/// Serves canned responses by exact URL and records every request.
/// Unknown URLs answer 404.
///
/// # Example
///
/// ```
/// use kiln::di::mocks::MockHttpProvider;
/// use kiln::github::types::HttpResponse;
///
/// let http = MockHttpProvider::new();
/// http.add_response("https://example.com/a", HttpResponse::new(200, "body"));
///
/// assert_eq!(http.request_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockHttpProvider {
    responses: Arc<Mutex<HashMap<String, HttpResponse>>>,
    fallback: Arc<Mutex<Option<HttpResponse>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockHttpProvider {
    /// Create a new mock HTTP provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response for a URL
    pub fn add_response(&self, url: &str, response: HttpResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Response served for every URL without a registered one
    pub fn set_fallback(&self, response: HttpResponse) {
        *self.fallback.lock().unwrap() = Some(response);
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpProvider for MockHttpProvider {
    async fn get(&self, url: &str) -> KilnResult<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(response) = self.responses.lock().unwrap().get(url) {
            return Ok(response.clone());
        }
        Ok(self
            .fallback
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| HttpResponse::new(404, "Not Found")))
    }
}

/// Mock unpacker for testing
///
/// Records the tarballs it receives instead of touching the filesystem.
#[derive(Clone, Default)]
pub struct MockUnpacker {
    calls: Arc<Mutex<Vec<Vec<u8>>>>,
    fail: bool,
}

impl MockUnpacker {
    /// Create a new mock unpacker
    pub fn new() -> Self {
        Self::default()
    }

    /// An unpacker that rejects every tarball
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Tarballs passed to `unpack`, in order
    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Unpacker for MockUnpacker {
    fn unpack(&self, tarball: &[u8]) -> KilnResult<Vec<PathBuf>> {
        self.calls.lock().unwrap().push(tarball.to_vec());
        if self.fail {
            return Err(KilnError::Unpack("mock unpack failure".to_string()));
        }
        Ok(vec![PathBuf::from("/tmp/kiln-test/libmock.so")])
    }
}
