//! State synchronization with the remote collection.
//!
//! Every network operation is spawned onto the tokio runtime and returns
//! immediately. Completions come back as [`SyncEvent`]s over a channel owned
//! by the [`Synchronizer`]; the event loop drains them with
//! [`Synchronizer::try_next`] or [`Synchronizer::next`], which is the only
//! place the [`Cache`] is replaced.

mod cache;
mod synchronizer;

pub use cache::Cache;
pub use synchronizer::{Confirmation, SyncEvent, SyncOp, SyncUpdate, Synchronizer};
