//! Client-side text filter over the cached collection.

use crate::core::Record;

/// Case-insensitive substring match on title or genre.
///
/// The year is never matched, and the empty query matches everything.
///
/// # Examples
///
/// ```
/// use filmshelf::{Filter, Record, RecordId};
///
/// let dune = Record {
///     id: RecordId::from(1),
///     title: "Dune".to_string(),
///     genre: "Sci-Fi".to_string(),
///     year: 2021,
/// };
/// assert!(Filter::new("SCI").matches(&dune));
/// assert!(!Filter::new("2021").matches(&dune));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    needle: String,
}

impl Filter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.is_empty()
            || record.title.to_lowercase().contains(&self.needle)
            || record.genre.to_lowercase().contains(&self.needle)
    }

    /// The matching subsequence of `records`, in their original order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
