//! Record source seam.
//!
//! The driver consumes raw records through this trait; the CSV reader in the
//! CLI crate is the production implementation, and `MemorySource` serves
//! tests and embedding callers. End-of-stream is `Ok(None)`, never an error.

use thiserror::Error;

/// Errors from reading the record source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading record source: {0}")]
    Io(#[from] std::io::Error),
    #[error("record source produced an unreadable record: {0}")]
    Malformed(String),
}

/// An ordered stream of raw records, each a sequence of string fields.
pub trait RecordSource {
    /// Yield the next record, or `Ok(None)` at clean end-of-stream.
    fn next_record(&mut self) -> Result<Option<Vec<String>>, SourceError>;
}

/// In-memory record source for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: std::vec::IntoIter<Vec<String>>,
}

impl MemorySource {
    pub fn new(records: Vec<Vec<String>>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }

    /// Build a source from string-slice rows.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }
}

impl RecordSource for MemorySource {
    fn next_record(&mut self) -> Result<Option<Vec<String>>, SourceError> {
        Ok(self.records.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_records_in_order_then_none() {
        let mut source = MemorySource::from_rows(&[&["a", "1", "2", "3"], &["b", "4", "5", "6"]]);
        assert_eq!(
            source.next_record().unwrap(),
            Some(vec!["a".into(), "1".into(), "2".into(), "3".into()])
        );
        assert_eq!(
            source.next_record().unwrap(),
            Some(vec!["b".into(), "4".into(), "5".into(), "6".into()])
        );
        assert_eq!(source.next_record().unwrap(), None);
        // Exhausted sources stay exhausted.
        assert_eq!(source.next_record().unwrap(), None);
    }

    #[test]
    fn empty_source_is_immediately_exhausted() {
        let mut source = MemorySource::default();
        assert_eq!(source.next_record().unwrap(), None);
    }
}
