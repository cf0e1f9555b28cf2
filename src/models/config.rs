use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Default token validity and cache lifetime (5 minutes)
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 300;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Shared signing secret.
///
/// Never printed: `Debug` is redacted so the secret cannot leak through
/// tracing fields or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Settings for the signed URL service.
///
/// Only constructible through [`SignerConfig::new`], so a value in hand is
/// always valid.
#[derive(Debug, Clone)]
pub struct SignerConfig {
    secret: Secret,
    /// CDN base URL without a trailing slash
    cdn_base_url: String,
    /// How long a freshly minted token stays valid
    token_validity_secs: u64,
    /// How long a signed URL is served from cache
    cache_ttl_secs: u64,
}

impl SignerConfig {
    /// Validate and build a signer configuration.
    ///
    /// The base URL must be an absolute http(s) URL. One trailing slash is
    /// trimmed so paths can be appended verbatim.
    pub fn new(
        secret: impl Into<String>,
        cdn_base_url: &str,
        token_validity_secs: u64,
        cache_ttl_secs: u64,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::Missing("BUNNYCDN_TOKEN_SECRET"));
        }

        let cdn_base_url = normalize_base_url(cdn_base_url)?;

        if token_validity_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "TOKEN_VALIDITY_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if cache_ttl_secs > token_validity_secs {
            return Err(ConfigError::Invalid {
                var: "URL_CACHE_TTL_SECS",
                reason: format!(
                    "cache TTL {cache_ttl_secs}s exceeds token validity {token_validity_secs}s"
                ),
            });
        }

        Ok(Self {
            secret: Secret::new(secret),
            cdn_base_url,
            token_validity_secs,
            cache_ttl_secs,
        })
    }

    /// Configuration with default validity and cache lifetime
    pub fn with_defaults(
        secret: impl Into<String>,
        cdn_base_url: &str,
    ) -> Result<Self, ConfigError> {
        Self::new(
            secret,
            cdn_base_url,
            DEFAULT_TOKEN_VALIDITY_SECS,
            DEFAULT_CACHE_TTL_SECS,
        )
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn cdn_base_url(&self) -> &str {
        &self.cdn_base_url
    }

    pub fn token_validity_secs(&self) -> u64 {
        self.token_validity_secs
    }

    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing("BUNNYCDN_BASE_URL"));
    }

    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::Invalid {
        var: "BUNNYCDN_BASE_URL",
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var: "BUNNYCDN_BASE_URL",
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(raw.strip_suffix('/').unwrap_or(raw).to_string())
}

/// Process configuration read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub signer: SignerConfig,
    pub bind_addr: SocketAddr,
    /// Optional YAML catalog of portfolio items
    pub catalog_file: Option<PathBuf>,
    /// Optional directory with the built frontend
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secret =
            var("BUNNYCDN_TOKEN_SECRET").ok_or(ConfigError::Missing("BUNNYCDN_TOKEN_SECRET"))?;
        let base_url = var("BUNNYCDN_BASE_URL")
            .or_else(|| var("VITE_BUNNYCDN_BASE_URL"))
            .ok_or(ConfigError::Missing("BUNNYCDN_BASE_URL"))?;

        let token_validity_secs = parse_secs(
            "TOKEN_VALIDITY_SECS",
            var("TOKEN_VALIDITY_SECS"),
            DEFAULT_TOKEN_VALIDITY_SECS,
        )?;
        let cache_ttl_secs = parse_secs(
            "URL_CACHE_TTL_SECS",
            var("URL_CACHE_TTL_SECS"),
            DEFAULT_CACHE_TTL_SECS,
        )?;

        let signer = SignerConfig::new(secret, &base_url, token_validity_secs, cache_ttl_secs)?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            signer,
            bind_addr,
            catalog_file: var("CATALOG_FILE").map(PathBuf::from),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn parse_secs(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            reason: format!("'{v}' is not a number of seconds"),
        }),
    }
}
