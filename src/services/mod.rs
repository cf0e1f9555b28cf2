pub mod catalog;
pub mod clock;
pub mod media_urls;
pub mod token;
pub mod url_cache;
pub mod url_signer;

pub use catalog::{Catalog, InMemoryCatalog, YamlCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use media_urls::{resolve_item, resolve_items};
pub use token::generate_token;
pub use url_cache::SignedUrlCache;
pub use url_signer::SignedUrlService;
