use anyhow::Result;
use image::RgbaImage;

use crate::book::BookRecord;

pub mod google_books;

/// A book metadata API.
pub trait BookLookup: Send + Sync {
    /// Find the single best match for a free-text query.
    ///
    /// Returns `Ok(None)` when the API answered but had no match.
    fn search(&self, query: &str) -> Result<Option<BookRecord>>;

    /// Download a book's cover thumbnail.
    fn cover(&self, url: &str) -> Result<RgbaImage>;
}
