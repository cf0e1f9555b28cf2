//! Test fixtures and constants.

/// Signing secret used by every test app
pub const SECRET: &str = "s3cret";

/// CDN base URL (trailing slash is trimmed by the config)
pub const CDN_BASE_URL: &str = "https://cdn.example.net/";

/// Initial test clock time
pub const NOW: u64 = 1_700_000_000;

/// Token for `/folder/file.webp?width=800&height=600` expiring at `NOW + 300`
pub const FOLDER_FILE_800X600_TOKEN: &str = "orMFHNw4qOY54H1vRTjsSipoEWJw4b1sXJYz6pE-68Y";

/// Extract the `expires` value from a signed URL
pub fn expires_of(signed_url: &str) -> u64 {
    signed_url
        .rsplit_once("&expires=")
        .and_then(|(_, expires)| expires.parse().ok())
        .unwrap_or_else(|| panic!("No expires parameter in {signed_url}"))
}

/// Extract the `token` value from a signed URL
pub fn token_of(signed_url: &str) -> String {
    let (_, rest) = signed_url
        .split_once("token=")
        .unwrap_or_else(|| panic!("No token parameter in {signed_url}"));
    rest.split('&').next().unwrap_or_default().to_string()
}
