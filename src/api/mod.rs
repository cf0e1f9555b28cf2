pub mod items;
pub mod sign_url;

pub use items::{handle_items, __path_handle_items};
pub use sign_url::{handle_sign_url, SignUrlRequest, SignUrlResponse, __path_handle_sign_url};
