//! Backend collaborator contract.
//!
//! The collection behaves as a generic REST resource:
//! - `GET <base>` lists every record,
//! - `POST <base>` creates one from a [`MovieDraft`],
//! - `PUT <base>/<id>` replaces the fields of one,
//! - `DELETE <base>/<id>` removes one.
//!
//! Any non-success status is a failure; status codes are not distinguished.

mod http;
mod memory;

pub use http::HttpMovieApi;
pub use memory::{ApiCall, InMemoryMovieApi};

use crate::core::{MovieDraft, Record, RecordId, Result};
use async_trait::async_trait;

#[async_trait]
pub trait MovieApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Record>>;
    async fn create(&self, draft: &MovieDraft) -> Result<Record>;
    async fn update(&self, id: &RecordId, draft: &MovieDraft) -> Result<Record>;
    async fn delete(&self, id: &RecordId) -> Result<()>;
}
