use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Item type marking equirectangular panoramas served as public tiles
pub const PANO_TYPE: &str = "pano";

/// A portfolio entry as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Folder name on the CDN, also the base file name
    pub name: String,
    /// Media type ("pano", "photo", ...)
    #[serde(rename = "type")]
    pub kind: String,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn is_pano(&self) -> bool {
        self.kind == PANO_TYPE
    }
}

/// URLs the frontend needs to show one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaUrls {
    /// Public thumbnail URL
    pub thumbnail_url: String,
    /// Signed URL for private media, public tiles URL for panoramas
    pub actual_url: String,
}

/// Catalog item with resolved URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MediaItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub urls: MediaUrls,
}
