//! Projection of records into a listing.
//!
//! [`render`] is pure: the same records always give the same [`Listing`],
//! and nothing is remembered between calls. Row actions are plain values
//! carrying the record's id and current fields, so front ends bind them
//! directly instead of parsing them back out of markup.

pub mod html;

use crate::core::{MovieDraft, Record, RecordId};

pub const NO_RESULTS: &str = "No movies found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit { id: RecordId, draft: MovieDraft },
    Delete { id: RecordId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RecordId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub edit: RowAction,
    pub delete: RowAction,
}

impl Row {
    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            year: record.year,
            genre: record.genre.clone(),
            edit: RowAction::Edit {
                id: record.id.clone(),
                draft: record.draft(),
            },
            delete: RowAction::Delete {
                id: record.id.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Nothing to show; display the message instead of an empty table.
    Placeholder(&'static str),
    Rows(Vec<Row>),
}

impl Listing {
    pub fn rows(&self) -> &[Row] {
        match self {
            Listing::Placeholder(_) => &[],
            Listing::Rows(rows) => rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

pub fn render<'a, I>(records: I) -> Listing
where
    I: IntoIterator<Item = &'a Record>,
{
    let rows: Vec<Row> = records.into_iter().map(Row::from_record).collect();
    if rows.is_empty() {
        Listing::Placeholder(NO_RESULTS)
    } else {
        Listing::Rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, title: &str) -> Record {
        Record {
            id: RecordId::from(id),
            title: title.to_string(),
            genre: "Drama".to_string(),
            year: 2001,
        }
    }

    #[test]
    fn empty_input_renders_placeholder_only() {
        let listing = render(&[] as &[Record]);
        assert_eq!(listing, Listing::Placeholder(NO_RESULTS));
        assert_eq!(listing.len(), 0);
    }

    #[test]
    fn one_row_per_record_in_order() {
        let records: Vec<Record> = (1..=5).map(|i| record(i, &format!("Movie {i}"))).collect();
        let listing = render(&records);

        assert_eq!(listing.len(), records.len());
        let titles: Vec<&str> = listing.rows().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Movie 1", "Movie 2", "Movie 3", "Movie 4", "Movie 5"]);
    }

    #[test]
    fn actions_carry_id_and_current_values() {
        let records = vec![record(9, "Amélie")];
        let listing = render(&records);
        let row = &listing.rows()[0];

        assert_eq!(
            row.edit,
            RowAction::Edit {
                id: RecordId::from(9),
                draft: MovieDraft {
                    title: "Amélie".to_string(),
                    genre: "Drama".to_string(),
                    year: 2001,
                },
            }
        );
        assert_eq!(row.delete, RowAction::Delete { id: RecordId::from(9) });
    }

    #[test]
    fn rendering_twice_is_identical() {
        let records = vec![record(1, "A"), record(2, "B")];
        assert_eq!(render(&records), render(&records));
    }
}
