pub mod error;
pub mod record;

pub use error::{ClientError, Result, ValidationError};
pub use record::{MovieDraft, Record, RecordId};
