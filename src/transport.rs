//! Single-request HTTP wrapper.
//!
//! Non-200 answers are classified into a [`RequestOutcome`] rather than raised;
//! only failures to reach the API at all surface as [`Error::Network`].

use std::io::Cursor;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use log::debug;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request, StatusCode};

use crate::api::ClientConfig;
use crate::error::{Error, Result};
use crate::progress::ProgressTracker;

pub const METADATA_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
pub const BINARY_MEDIA_TYPE: &str = "application/octet-stream";

/// Normalized result of one HTTP call. The body is fully buffered.
#[derive(Debug)]
pub struct RequestOutcome {
    pub status: StatusCode,
    pub error: Option<Error>,
    pub content_type: String,
    pub body: Bytes,
}

impl RequestOutcome {
    fn network_failure(err: reqwest::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: Some(Error::Network(err)),
            content_type: String::new(),
            body: Bytes::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Fresh reader over the buffered body; may be called any number of times.
    pub fn reader(&self) -> Cursor<Bytes> {
        Cursor::new(self.body.clone())
    }

    /// Turn a non-200 outcome into a caller error.
    ///
    /// Network failures pass through unchanged; everything else is handed to
    /// `wrap` with the status code and the classified message.
    pub fn into_error(self, wrap: impl FnOnce(u16, String) -> Error) -> Error {
        let status = self.status.as_u16();
        match self.error {
            Some(Error::Network(err)) => Error::Network(err),
            Some(other) => wrap(status, other.to_string()),
            None => wrap(status, status_text(self.status)),
        }
    }
}

fn status_text(status: StatusCode) -> String {
    format!("failed to do request: {status}")
}

/// Build a request for `endpoint`, relative to the configured base URL.
///
/// The base URL path is kept as a prefix and each endpoint segment is
/// percent-encoded on its own.
pub fn build_request(config: &ClientConfig, method: Method, endpoint: &str) -> Result<Request> {
    let mut url = config.base_url.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Request(format!("base url cannot carry a path: {}", config.base_url)))?
        .pop_if_empty()
        .extend(endpoint.split('/').filter(|s| !s.is_empty()));

    let mut request = Request::new(method, url);
    let headers = request.headers_mut();
    headers.insert(ACCEPT, HeaderValue::from_static(METADATA_MEDIA_TYPE));
    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|e| Error::Request(format!("invalid token: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(request)
}

/// Perform `request`, buffering the whole body while driving a progress bar.
pub async fn execute(config: &ClientConfig, request: Request, silent: bool) -> RequestOutcome {
    debug!("{} {}", request.method(), request.url());

    let resp = match config.http.execute(request).await {
        Ok(resp) => resp,
        Err(e) => return RequestOutcome::network_failure(e),
    };

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let progress = ProgressTracker::new(resp.content_length(), silent);
    let mut buf = BytesMut::new();
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                progress.observe(chunk.len());
                buf.extend_from_slice(&chunk);
            }
            Err(e) => {
                progress.abandon();
                return RequestOutcome::network_failure(e);
            }
        }
    }
    progress.finish();
    debug!("{status} ({} bytes)", buf.len());

    let body = buf.freeze();
    let error = if status == StatusCode::OK {
        None
    } else if body.is_empty() {
        Some(Error::Status(status_text(status)))
    } else {
        Some(Error::Status(String::from_utf8_lossy(&body).into_owned()))
    };

    RequestOutcome {
        status,
        error,
        content_type,
        body,
    }
}
