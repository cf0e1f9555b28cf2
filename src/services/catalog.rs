use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CatalogError;
use crate::models::CatalogItem;

/// Source of portfolio items
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List all items in display order
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// In-memory catalog
pub struct InMemoryCatalog {
    items: Arc<RwLock<Vec<CatalogItem>>>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub async fn insert(&self, item: CatalogItem) {
        let mut items = self.items.write().await;
        items.push(item);
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = self.items.read().await;
        Ok(items.clone())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

/// Catalog read from a YAML file on every listing, so edits show up
/// without a restart.
///
/// ```yaml
/// items:
///   - name: hd_20250813_193201
///     type: photo
///   - name: harbour_pano
///     type: pano
/// ```
pub struct YamlCatalog {
    path: PathBuf,
}

impl YamlCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Catalog for YamlCatalog {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Read {
                path: self.path.display().to_string(),
                source,
            })?;

        let file: CatalogFile =
            serde_yaml::from_str(&content).map_err(|e| CatalogError::Parse {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %self.path.display(),
            items = file.items.len(),
            "Loaded catalog"
        );

        Ok(file.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_in_memory_insert_and_list() {
        let catalog = InMemoryCatalog::default();
        catalog.insert(CatalogItem::new("coast", "photo")).await;
        catalog.insert(CatalogItem::new("harbour", "pano")).await;

        let items = catalog.list_items().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], CatalogItem::new("harbour", "pano"));
    }

    #[tokio::test]
    async fn test_yaml_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "items:\n  - name: coast\n    type: photo\n  - name: harbour\n    type: pano"
        )
        .unwrap();

        let catalog = YamlCatalog::new(file.path());
        let items = catalog.list_items().await.unwrap();

        assert_eq!(
            items,
            vec![
                CatalogItem::new("coast", "photo"),
                CatalogItem::new("harbour", "pano"),
            ]
        );
    }

    #[tokio::test]
    async fn test_yaml_catalog_without_items() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let items = YamlCatalog::new(file.path()).list_items().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_yaml_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = YamlCatalog::new(dir.path().join("missing.yaml"));

        let result = catalog.list_items().await;
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }

    #[tokio::test]
    async fn test_yaml_catalog_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "items: [{{name: coast}}]").unwrap();

        let result = YamlCatalog::new(file.path()).list_items().await;
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }
}
