//! Per-backend transport profiles.
//!
//! A profile carries everything a backend needs at the transport level:
//! base URL, spoofed browser headers, fixed timeout and whether upstream
//! certificates are verified. Profiles are consumed by
//! [`UpstreamClient`](crate::client::UpstreamClient), one client per adapter,
//! so a relaxed TLS setting never leaks to another backend.

use std::time::Duration;

const CHROME_142_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";
const CHROME_143_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Transport settings for one upstream catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendProfile {
    /// Backend name used in logs and errors.
    pub name: &'static str,
    /// Scheme and host of the upstream API, without a trailing slash.
    pub base_url: String,
    /// Fixed per-request timeout.
    pub timeout: Duration,
    /// Headers sent with every request (lower-case names).
    pub headers: Vec<(&'static str, &'static str)>,
    /// Skip upstream certificate validation for this backend only.
    pub accept_invalid_certs: bool,
}

impl BackendProfile {
    /// Profile for the bugu catalog.
    pub fn bugu() -> Self {
        Self {
            name: "bugu",
            base_url: "https://a.buguyy.top".to_string(),
            timeout: Duration::from_secs(20),
            headers: vec![
                ("accept", "application/json, text/plain, */*"),
                ("accept-language", "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
                ("origin", "https://buguyy.top"),
                ("priority", "u=1, i"),
                ("referer", "https://buguyy.top/"),
                (
                    "sec-ch-ua",
                    r#""Chromium";v="142", "Google Chrome";v="142", "Not_A Brand";v="99""#,
                ),
                ("sec-ch-ua-mobile", "?0"),
                ("sec-ch-ua-platform", r#""Windows""#),
                ("sec-fetch-dest", "empty"),
                ("sec-fetch-mode", "cors"),
                ("sec-fetch-site", "same-site"),
                ("user-agent", CHROME_142_UA),
            ],
            // The upstream serves a certificate that does not validate.
            accept_invalid_certs: true,
        }
    }

    /// Profile for the QQ Music catalog, reached through the vkeys relay.
    pub fn qq() -> Self {
        Self {
            name: "qq",
            base_url: "https://api.vkeys.cn".to_string(),
            timeout: Duration::from_secs(15),
            headers: vec![
                ("accept", "application/json, text/plain, */*"),
                ("accept-language", "zh-CN,zh;q=0.9,en;q=0.8"),
                ("origin", "https://y.qq.com"),
                ("referer", "https://y.qq.com/"),
                (
                    "sec-ch-ua",
                    r#""Google Chrome";v="143", "Chromium";v="143", "Not A(Brand";v="24""#,
                ),
                ("sec-ch-ua-mobile", "?0"),
                ("sec-ch-ua-platform", r#""Windows""#),
                ("user-agent", CHROME_143_UA),
            ],
            accept_invalid_certs: false,
        }
    }

    /// Point the profile at a different host (mirrors, local mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up a header value by lower-case name.
    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}
