use anyhow::{Context, Result};
use image::{imageops::FilterType, RgbaImage};
use serde::Deserialize;

use crate::book::BookRecord;

use super::BookLookup;

const API_URL_VOLUMES: &str = "https://www.googleapis.com/books/v1/volumes";
const MAX_RESULTS: u32 = 1;

pub const COVER_WIDTH: u32 = 150;
pub const COVER_HEIGHT: u32 = 200;

/// The Google Books volumes API.
pub struct GoogleBooks {
    endpoint: String,
}

impl GoogleBooks {
    /// Use a different endpoint implementing the same API.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for GoogleBooks {
    fn default() -> Self {
        Self::with_endpoint(API_URL_VOLUMES)
    }
}

#[derive(Deserialize)]
struct Volumes {
    items: Option<Vec<Volume>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: VolumeInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
}

#[derive(Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<VolumeInfo> for BookRecord {
    fn from(info: VolumeInfo) -> Self {
        BookRecord::new(
            info.title,
            info.authors,
            info.image_links.and_then(|links| links.thumbnail),
        )
    }
}

impl BookLookup for GoogleBooks {
    fn search(&self, query: &str) -> Result<Option<BookRecord>> {
        let volumes: Volumes = attohttpc::get(&self.endpoint)
            .param("q", query)
            .param("maxResults", MAX_RESULTS)
            .send()
            .with_context(|| format!("GoogleBooks: Request to `{}` failed", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("GoogleBooks: `{}` returned an error", self.endpoint))?
            .json()
            .with_context(|| {
                format!(
                    "GoogleBooks: Response from `{}` was not a volume list",
                    self.endpoint
                )
            })?;

        Ok(volumes
            .items
            .and_then(|items| items.into_iter().next())
            .map(|volume| volume.volume_info.into()))
    }

    fn cover(&self, url: &str) -> Result<RgbaImage> {
        let bytes = attohttpc::get(url)
            .send()
            .with_context(|| format!("GoogleBooks: Failed to download cover `{url}`"))?
            .error_for_status()
            .with_context(|| format!("GoogleBooks: Failed to download cover `{url}`"))?
            .bytes()
            .with_context(|| format!("GoogleBooks: Failed to read cover `{url}`"))?;

        let cover = image::load_from_memory(&bytes)
            .with_context(|| format!("GoogleBooks: Could not decode cover `{url}`"))?;

        Ok(cover
            .resize_exact(COVER_WIDTH, COVER_HEIGHT, FilterType::Triangle)
            .to_rgba8())
    }
}
