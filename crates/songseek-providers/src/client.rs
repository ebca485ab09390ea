//! Upstream HTTP client shared by the backend adapters.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use songseek_core::{Error, HttpError, Result};
use tracing::debug;

use crate::profile::BackendProfile;

/// Longest upstream error body kept in a [`HttpError::StatusError`].
const MAX_ERROR_BODY: usize = 256;

/// HTTP client bound to one backend's transport profile.
///
/// Each adapter owns its own instance, so headers, timeout and TLS policy
/// are never shared between backends.
#[derive(Clone)]
pub struct UpstreamClient {
    /// HTTP client for making requests.
    http: reqwest::Client,
    /// Backend name used in errors.
    provider: &'static str,
    /// Upstream base URL without trailing slash.
    base_url: String,
}

impl UpstreamClient {
    /// Build a client from a transport profile.
    pub fn new(profile: &BackendProfile) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &profile.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("Invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Config(format!("Invalid header value for {name}: {e}")))?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(profile.timeout)
            .danger_accept_invalid_certs(profile.accept_invalid_certs)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            provider: profile.name,
            base_url: profile.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET against `path` and decode the JSON body.
    ///
    /// Transport failures and non-2xx statuses map to
    /// [`Error::UpstreamUnavailable`]; an undecodable body maps to
    /// [`Error::UpstreamMalformed`].
    pub async fn get_json<R>(&self, path: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(provider = self.provider, %url, ?query, "Upstream GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            return Err(Error::unavailable(
                self.provider,
                HttpError::StatusError {
                    status: status.as_u16(),
                    message,
                },
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;

        serde_json::from_slice(&body)
            .map_err(|e| Error::malformed(self.provider, format!("Failed to parse response: {e}")))
    }

    fn transport_error(&self, e: &reqwest::Error) -> Error {
        let source = if e.is_timeout() {
            HttpError::Timeout
        } else if e.is_connect() {
            HttpError::ConnectionFailed(e.to_string())
        } else if e.is_builder() {
            HttpError::InvalidUrl(e.to_string())
        } else {
            HttpError::Client(e.to_string())
        };
        Error::unavailable(self.provider, source)
    }
}
