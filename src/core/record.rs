use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// Server-assigned record identifier.
///
/// The backend owns the id space, so the client keeps whatever JSON shape it
/// was given (a number or a string) and writes it back verbatim in URLs.
/// Numbers are held as [`serde_json::Number`] so floats and values past
/// `i64::MAX` still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value.into())
    }
}

/// Text typed by the user is kept exactly as given: `"007"` stays `"007"`.
impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// A movie entry as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub genre: String,
    pub year: i32,
}

impl Record {
    /// The user-editable fields of this record.
    pub fn draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            genre: self.genre.clone(),
            year: self.year,
        }
    }
}

/// Request body for create and update. Never carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub year: i32,
}

impl MovieDraft {
    /// Validate raw form input.
    ///
    /// Title and genre must be non-blank; year must parse as an integer.
    /// Surrounding whitespace is trimmed from all three fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use filmshelf::MovieDraft;
    ///
    /// let draft = MovieDraft::parse("Dune", "Sci-Fi", " 2021 ").unwrap();
    /// assert_eq!(draft.year, 2021);
    /// assert!(MovieDraft::parse("Dune", "Sci-Fi", "abcd").is_err());
    /// ```
    pub fn parse(title: &str, genre: &str, year: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(ValidationError::EmptyGenre);
        }
        let year_text = year.trim();
        let year = year_text
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidYear(year_text.to_string()))?;

        Ok(Self {
            title: title.to_string(),
            genre: genre.to_string(),
            year,
        })
    }
}
