//! CDN token generation.
//!
//! The CDN edge recomputes the same digest from the request it receives, so
//! every byte of the signature base matters:
//!
//! ```text
//! secret + signature_path + expires + client_ip + parameter_string
//! ```
//!
//! `parameter_string` is the query with parameters sorted by key and
//! empty-valued parameters dropped. The digest is SHA-256, encoded as
//! URL-safe base64 without padding.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::SignError;
use crate::models::{Token, TokenRequest};

/// Placeholder origin for resolving relative resource paths
const PARSE_BASE: &str = "https://dummy";

/// Query parameter carrying the signed path override
pub const TOKEN_PATH_PARAM: &str = "token_path";
/// Query parameter carrying allowed country codes
pub const TOKEN_COUNTRIES_PARAM: &str = "token_countries";
/// Query parameter carrying blocked country codes
pub const TOKEN_COUNTRIES_BLOCKED_PARAM: &str = "token_countries_blocked";

/// Compute the CDN token for a resource.
///
/// Fails only when `request.path` cannot be resolved as a URL path, or when
/// its pathname does not decode to UTF-8.
pub fn generate_token(request: &TokenRequest) -> Result<Token, SignError> {
    let url = parse_relative(&request.path)?;
    let mut params = query_params(&url);

    let path_override = non_empty(request.path_override.as_deref());
    if let Some(token_path) = path_override {
        set_param(&mut params, TOKEN_PATH_PARAM, token_path);
    }
    if let Some(countries) = non_empty(request.allowed_countries.as_deref()) {
        set_param(&mut params, TOKEN_COUNTRIES_PARAM, countries);
    }
    if let Some(countries) = non_empty(request.blocked_countries.as_deref()) {
        set_param(&mut params, TOKEN_COUNTRIES_BLOCKED_PARAM, countries);
    }

    let parameter_string = parameter_string(params);

    let signature_path = match path_override {
        Some(token_path) => token_path.to_string(),
        None => decode_path(url.path())?,
    };

    let mut hasher = Sha256::new();
    hasher.update(request.secret.expose().as_bytes());
    hasher.update(signature_path.as_bytes());
    hasher.update(request.expires.to_string().as_bytes());
    hasher.update(request.client_ip.as_deref().unwrap_or("").as_bytes());
    hasher.update(parameter_string.as_bytes());

    Ok(Token {
        token: URL_SAFE_NO_PAD.encode(hasher.finalize()),
        expires: request.expires,
    })
}

/// Resolve a possibly relative path against a placeholder origin
pub(crate) fn parse_relative(path: &str) -> Result<Url, SignError> {
    Url::parse(PARSE_BASE)
        .and_then(|base| base.join(path))
        .map_err(|e| SignError::InvalidInput(format!("cannot parse path '{path}': {e}")))
}

/// Decoded query parameters in their original order
pub(crate) fn query_params(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Replace the first `key` in place and drop later duplicates, or append it.
pub(crate) fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    match params.iter().position(|(k, _)| k == key) {
        Some(first) => {
            params[first].1 = value.to_string();
            let mut index = 0;
            params.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => params.push((key.to_string(), value.to_string())),
    }
}

/// Sorted `key=value` pairs joined by `&`, skipping empty values.
///
/// Ties on the key are broken by the value so duplicates sort deterministically.
fn parameter_string(mut params: Vec<(String, String)>) -> String {
    params.sort();
    params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_path(path: &str) -> Result<String, SignError> {
    percent_decode_str(path)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| SignError::InvalidInput(format!("path '{path}' does not decode to UTF-8: {e}")))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
