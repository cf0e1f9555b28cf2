use super::config::Secret;

/// Inputs for a single CDN token computation
#[derive(Debug, Clone)]
pub struct TokenRequest {
    /// Resource path, optionally with a query string (e.g. `/folder/file.webp?width=800`)
    pub path: String,
    pub secret: Secret,
    pub expires: u64,
    /// Restrict the token to one client address
    pub client_ip: Option<String>,
    /// Sign a different logical path (e.g. a directory prefix) instead of the resource path
    pub path_override: Option<String>,
    /// Comma-separated country codes allowed to fetch the resource
    pub allowed_countries: Option<String>,
    /// Comma-separated country codes blocked from fetching the resource
    pub blocked_countries: Option<String>,
}

impl TokenRequest {
    pub fn new(path: impl Into<String>, secret: Secret, expires: u64) -> Self {
        Self {
            path: path.into(),
            secret,
            expires,
            client_ip: None,
            path_override: None,
            allowed_countries: None,
            blocked_countries: None,
        }
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    pub fn with_path_override(mut self, path: impl Into<String>) -> Self {
        self.path_override = Some(path.into());
        self
    }

    pub fn with_allowed_countries(mut self, countries: impl Into<String>) -> Self {
        self.allowed_countries = Some(countries.into());
        self
    }

    pub fn with_blocked_countries(mut self, countries: impl Into<String>) -> Self {
        self.blocked_countries = Some(countries.into());
        self
    }
}

/// A computed token and the expiry it was signed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
    pub expires: u64,
}

/// Display size requested for a media resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl SizeParams {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }

    pub fn none() -> Self {
        Self::default()
    }
}
