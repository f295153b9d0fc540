/// Shown in place of a title or author list the API did not provide.
pub const UNKNOWN: &str = "Unknown";

/// A book identified by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    /// Author names joined with `", "`.
    pub authors: String,
    /// URL of the cover thumbnail, if the API has one.
    pub cover_image: Option<String>,
}

impl BookRecord {
    /// Build a record from possibly missing API fields, filling in placeholders.
    pub fn new(
        title: Option<String>,
        authors: Option<Vec<String>>,
        cover_image: Option<String>,
    ) -> Self {
        let authors = match authors {
            Some(authors) if !authors.is_empty() => authors.join(", "),
            _ => UNKNOWN.to_owned(),
        };

        Self {
            title: title.unwrap_or_else(|| UNKNOWN.to_owned()),
            authors,
            cover_image,
        }
    }
}

impl std::fmt::Display for BookRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} — {}", self.title, self.authors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_authors() {
        let record = BookRecord::new(
            Some("Good Omens".to_owned()),
            Some(vec!["Terry Pratchett".to_owned(), "Neil Gaiman".to_owned()]),
            None,
        );
        assert_eq!(record.authors, "Terry Pratchett, Neil Gaiman");
        assert_eq!(record.to_string(), "Good Omens — Terry Pratchett, Neil Gaiman");
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let record = BookRecord::new(None, None, None);
        assert_eq!(record.title, UNKNOWN);
        assert_eq!(record.authors, UNKNOWN);

        let record = BookRecord::new(Some("Untitled".to_owned()), Some(Vec::new()), None);
        assert_eq!(record.authors, UNKNOWN);
    }
}
