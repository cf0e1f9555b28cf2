use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::token::{generate_token, parse_relative, query_params, set_param};
use super::url_cache::SignedUrlCache;
use crate::error::SignError;
use crate::models::{SignerConfig, SizeParams, TokenRequest};

/// Signed CDN URL service.
///
/// Canonicalizes the requested path, serves repeat requests from the cache,
/// and mints a fresh token on a miss. URLs have the shape
/// `<base><canonical path><?|&>token=<token>&expires=<unix seconds>`.
pub struct SignedUrlService {
    config: SignerConfig,
    cache: SignedUrlCache,
    clock: Arc<dyn Clock>,
}

impl SignedUrlService {
    pub fn new(config: SignerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a service whose token expiry and cache lifetime follow `clock`
    pub fn with_clock(config: SignerConfig, clock: Arc<dyn Clock>) -> Self {
        let cache = SignedUrlCache::new(config.cache_ttl_secs(), clock.clone());
        Self {
            config,
            cache,
            clock,
        }
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    pub fn cache(&self) -> &SignedUrlCache {
        &self.cache
    }

    /// Canonical form of `path` with the requested size applied.
    ///
    /// `width`/`height` overwrite any values already in the query. Without
    /// a size the query is kept exactly as parsed.
    pub fn canonical_path(path: &str, size: &SizeParams) -> Result<String, SignError> {
        let mut url = parse_relative(path)?;

        let width = positive("width", size.width)?;
        let height = positive("height", size.height)?;

        if width.is_some() || height.is_some() {
            let mut params = query_params(&url);
            if let Some(width) = width {
                set_param(&mut params, "width", &width.to_string());
            }
            if let Some(height) = height {
                set_param(&mut params, "height", &height.to_string());
            }
            url.query_pairs_mut().clear().extend_pairs(params.iter());
        }

        Ok(match url.query() {
            Some(query) if !query.is_empty() => format!("{}?{query}", url.path()),
            _ => url.path().to_string(),
        })
    }

    /// Get a ready-to-use signed URL for `path` at the requested size.
    ///
    /// A cached URL keeps its original expiry until the cache entry itself
    /// lapses; the cache TTL never exceeds the token validity.
    pub fn signed_url(&self, path: &str, size: &SizeParams) -> Result<String, SignError> {
        let canonical_path = Self::canonical_path(path, size)?;

        // One reading for lookup, expiry and storage keeps the entry within the token's lifetime
        let now = self.clock.now_secs();

        if let Some(signed_url) = self.cache.get_at(&canonical_path, now) {
            tracing::debug!(canonical_path = %canonical_path, "Signed URL cache hit");
            return Ok(signed_url);
        }

        let expires = now
            .checked_add(self.config.token_validity_secs())
            .ok_or_else(|| SignError::Hashing("expiry timestamp overflows".to_string()))?;

        let request = TokenRequest::new(
            canonical_path.as_str(),
            self.config.secret().clone(),
            expires,
        );
        let token = generate_token(&request)?;

        let separator = if canonical_path.contains('?') { '&' } else { '?' };
        let signed_url = format!(
            "{}{}{}token={}&expires={}",
            self.config.cdn_base_url(),
            canonical_path,
            separator,
            token.token,
            token.expires
        );

        tracing::debug!(
            canonical_path = %canonical_path,
            expires = token.expires,
            "Signed URL cache miss: minted new token"
        );

        self.cache.set_at(canonical_path, signed_url.clone(), now);
        Ok(signed_url)
    }
}

fn positive(name: &str, value: Option<u32>) -> Result<Option<u32>, SignError> {
    match value {
        Some(0) => Err(SignError::InvalidInput(format!(
            "{name} must be a positive integer"
        ))),
        other => Ok(other),
    }
}
