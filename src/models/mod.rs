pub mod catalog;
pub mod config;
pub mod signing;

pub use catalog::{CatalogItem, MediaItem, MediaUrls, PANO_TYPE};
pub use config::{AppConfig, ConfigError, Secret, SignerConfig};
pub use signing::{SizeParams, Token, TokenRequest};
