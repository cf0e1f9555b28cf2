use crate::error::SignError;
use crate::models::{CatalogItem, MediaItem, MediaUrls, SizeParams};

use super::url_signer::SignedUrlService;

/// Resolve the URLs for one catalog item.
///
/// Thumbnails and panorama tiles are public and go out unsigned. Every
/// other item is private and gets a signed URL for `/<name>/<name>.webp`.
pub fn resolve_item(
    signer: &SignedUrlService,
    item: &CatalogItem,
) -> Result<MediaItem, SignError> {
    let base = signer.config().cdn_base_url();
    let thumbnail_url = format!("{base}/{}/thumbnail.webp", item.name);

    let actual_url = if item.is_pano() {
        format!("{base}/{}/tiles", item.name)
    } else {
        signer.signed_url(
            &format!("/{name}/{name}.webp", name = item.name),
            &SizeParams::none(),
        )?
    };

    Ok(MediaItem {
        name: item.name.clone(),
        kind: item.kind.clone(),
        urls: MediaUrls {
            thumbnail_url,
            actual_url,
        },
    })
}

/// Resolve a whole listing, failing on the first item that cannot be signed
pub fn resolve_items(
    signer: &SignedUrlService,
    items: &[CatalogItem],
) -> Result<Vec<MediaItem>, SignError> {
    items.iter().map(|item| resolve_item(signer, item)).collect()
}
