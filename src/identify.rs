//! From a photographed page to a book.

use std::path::Path;

use crate::{
    book::BookRecord,
    config::AppConfig,
    preprocess,
    services::{books::BookLookup, ocr::OcrService},
};

/// Recognised text shorter than this is not worth a lookup.
pub const MIN_TEXT_CHARS: usize = 10;
/// Only the start of the recognised text is sent to the books API.
pub const MAX_QUERY_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct OcrOptions {
    pub language: String,
    pub binarize: bool,
}

impl From<&AppConfig> for OcrOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            language: config.language.clone(),
            binarize: config.binarize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// OCR produced too little text to search for.
    NotEnoughText,
    /// The lookup had no match, or failed.
    NotFound,
    Found(BookRecord),
}

/// Recognise the text on the page at `path`.
///
/// Never fails: any error is logged and yields an empty string.
pub fn recognize_text(ocr: &dyn OcrService, path: &Path, options: &OcrOptions) -> String {
    let result = preprocess::load_page(path, options.binarize)
        .and_then(|page| ocr.image_to_string(&page, &options.language));

    match result {
        Ok(text) => text.trim().to_owned(),
        Err(e) => {
            log::error!("OCR failed: {e:#}");
            String::new()
        }
    }
}

/// Look up the book matching `query`.
///
/// Never fails: any error is logged and yields `None`, exactly like an empty result.
pub fn search_book(books: &dyn BookLookup, query: &str) -> Option<BookRecord> {
    match books.search(query) {
        Ok(Some(record)) => Some(record),
        Ok(None) => {
            log::info!("No book matches the recognised text");
            None
        }
        Err(e) => {
            log::error!("Book lookup failed: {e:#}");
            None
        }
    }
}

/// The first `MAX_QUERY_CHARS` characters of `text`.
pub fn truncate_query(text: &str) -> &str {
    match text.char_indices().nth(MAX_QUERY_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Recognise the page at `path` and look up the book it comes from.
pub fn identify(
    ocr: &dyn OcrService,
    books: &dyn BookLookup,
    path: &Path,
    options: &OcrOptions,
) -> Outcome {
    log::info!("Identifying `{}`", path.display());

    let text = recognize_text(ocr, path, options);
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        log::warn!("Only {chars} characters recognised, not searching");
        return Outcome::NotEnoughText;
    }
    log::debug!("Recognised text: {text:?}");

    match search_book(books, truncate_query(&text)) {
        Some(record) => {
            log::info!("Found {record}");
            Outcome::Found(record)
        }
        None => Outcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Write,
        path::PathBuf,
        sync::Mutex,
    };

    use anyhow::{anyhow, Result};
    use image::{GrayImage, RgbaImage};
    use serde_json::json;

    use super::*;
    use crate::services::{
        books::google_books::{tests::serve_json, GoogleBooks},
        ocr::tesseract::Tesseract,
    };

    struct FakeOcr(String);

    fn ocr(text: &str) -> FakeOcr {
        FakeOcr(text.to_owned())
    }

    impl OcrService for FakeOcr {
        fn version(&self) -> Result<String> {
            Ok("fake".to_owned())
        }

        fn image_to_string(&self, _image: &GrayImage, _language: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct FakeBooks {
        queries: Mutex<Vec<String>>,
        fail: bool,
    }

    impl BookLookup for FakeBooks {
        fn search(&self, query: &str) -> Result<Option<BookRecord>> {
            self.queries.lock().unwrap().push(query.to_owned());
            if self.fail {
                return Err(anyhow!("network is down"));
            }
            Ok(Some(BookRecord::new(
                Some("Found".to_owned()),
                Some(vec!["Author".to_owned()]),
                None,
            )))
        }

        fn cover(&self, _url: &str) -> Result<RgbaImage> {
            Err(anyhow!("no covers here"))
        }
    }

    fn options() -> OcrOptions {
        OcrOptions::from(&AppConfig::default())
    }

    fn page() -> tempfile::TempPath {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let path = file.into_temp_path();
        GrayImage::from_pixel(8, 8, image::Luma([255])).save(&path).unwrap();
        path
    }

    #[test]
    fn undecodable_image_gives_empty_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG but not really").unwrap();

        let text = recognize_text(&ocr("should not be reached"), file.path(), &options());
        assert_eq!(text, "");
    }

    #[test]
    fn missing_engine_gives_empty_text() {
        let ocr = Tesseract::new(PathBuf::from("/nonexistent/bin/tesseract"));
        assert_eq!(recognize_text(&ocr, &page(), &options()), "");
    }

    /// Black serif text on white: "Test OCR" over "The quick brown fox".
    const PRINTED_PAGE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/printed_page.png");

    #[test]
    fn printed_text_is_recognised() {
        let tesseract = Tesseract::new(PathBuf::from("tesseract"));
        if let Err(e) = tesseract.version() {
            eprintln!("skipping, no tesseract available: {e:#}");
            return;
        }

        let options = OcrOptions {
            language: "eng".to_owned(),
            binarize: true,
        };
        let text = recognize_text(&tesseract, Path::new(PRINTED_PAGE), &options);

        assert!(text.contains("quick brown fox"), "recognised {text:?}");
        assert!(text.contains("Test OCR"), "recognised {text:?}");
    }

    #[test]
    fn recognised_text_is_trimmed() {
        let text = recognize_text(&ocr("  Chapter One\n\n"), &page(), &options());
        assert_eq!(text, "Chapter One");
    }

    #[test]
    fn short_text_never_searches() {
        let books = FakeBooks::default();
        let page = page();

        let outcome = identify(&ocr("too short"), &books, &page, &options());
        assert_eq!(outcome, Outcome::NotEnoughText);

        let outcome = identify(&ocr("    "), &books, &page, &options());
        assert_eq!(outcome, Outcome::NotEnoughText);

        assert!(books.queries.lock().unwrap().is_empty());
    }

    #[test]
    fn ten_characters_are_enough() {
        let books = FakeBooks::default();
        let outcome = identify(&ocr("ten chars!"), &books, &page(), &options());

        assert!(matches!(outcome, Outcome::Found(ref record) if record.title == "Found"));
        assert_eq!(*books.queries.lock().unwrap(), ["ten chars!"]);
    }

    #[test]
    fn query_is_truncated() {
        let long = "ё".repeat(MAX_QUERY_CHARS + 50);
        assert_eq!(truncate_query(&long).chars().count(), MAX_QUERY_CHARS);
        assert_eq!(truncate_query("short"), "short");

        let books = FakeBooks::default();
        identify(&ocr(&long), &books, &page(), &options());
        assert_eq!(books.queries.lock().unwrap()[0].chars().count(), MAX_QUERY_CHARS);
    }

    #[test]
    fn lookup_failure_is_not_found() {
        let books = FakeBooks {
            fail: true,
            ..Default::default()
        };
        let outcome = identify(&ocr("a long enough page of text"), &books, &page(), &options());
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn search_book_against_mocked_api() {
        let (url, _) = serve_json(json!({
            "items": [{
                "volumeInfo": {
                    "title": "Mocked Book Title",
                    "authors": ["Mocked Author"],
                    "imageLinks": { "thumbnail": "http://example.com/mock.jpg" }
                }
            }]
        }));

        let record = search_book(&GoogleBooks::with_endpoint(url), "Mocked Query").unwrap();
        assert_eq!(
            record,
            BookRecord {
                title: "Mocked Book Title".to_owned(),
                authors: "Mocked Author".to_owned(),
                cover_image: Some("http://example.com/mock.jpg".to_owned()),
            }
        );

        let (url, _) = serve_json(json!({ "totalItems": 0 }));
        assert_eq!(search_book(&GoogleBooks::with_endpoint(url), "Mocked Query"), None);
    }
}
