use crate::{book::BookRecord, identify::Outcome};

/// Books found during this run, oldest first. Never persisted.
#[derive(Debug, Default)]
pub struct SearchHistory(Vec<BookRecord>);

impl SearchHistory {
    pub fn push(&mut self, record: BookRecord) {
        self.0.push(record);
    }

    /// Remember the book of a finished search. Searches that found nothing are not kept.
    pub fn record(&mut self, outcome: &Outcome) {
        if let Outcome::Found(record) = outcome {
            self.push(record.clone());
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
