#![forbid(unsafe_code)]

//! WebSocket endpoint derivation from the page location.

/// The parts of `window.location` the endpoint depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme including the trailing colon, e.g. `"https:"`.
    pub protocol: String,
    pub hostname: String,
    /// Empty when the page uses the scheme's default port.
    pub port: String,
}

impl PageLocation {
    #[must_use]
    pub fn new(
        protocol: impl Into<String>,
        hostname: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            port: port.into(),
        }
    }

    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.protocol.eq_ignore_ascii_case("https:")
    }
}

/// Build the socket URL for `location`, mirroring its TLS state.
///
/// ```
/// use mudlink_core::endpoint::{PageLocation, websocket_url};
///
/// let page = PageLocation::new("https:", "mud.example", "8443");
/// assert_eq!(websocket_url(&page, "/"), "wss://mud.example:8443/");
/// ```
#[must_use]
pub fn websocket_url(location: &PageLocation, path: &str) -> String {
    let scheme = if location.is_secure() { "wss" } else { "ws" };
    let mut url = format!("{scheme}://{}", location.hostname);
    if !location.port.is_empty() {
        url.push(':');
        url.push_str(&location.port);
    }
    if path.starts_with('/') {
        url.push_str(path);
    } else {
        url.push('/');
        url.push_str(path);
    }
    url
}
