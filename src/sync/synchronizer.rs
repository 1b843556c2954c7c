use super::Cache;
use crate::api::MovieApi;
use crate::core::{ClientError, MovieDraft, Record, RecordId, ValidationError};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    LoadAll,
    Create,
    Update,
    Delete,
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncOp::LoadAll => "load_all",
            SyncOp::Create => "create",
            SyncOp::Update => "update",
            SyncOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Completion message sent by a spawned request task.
#[derive(Debug)]
pub enum SyncEvent {
    Loaded(Vec<Record>),
    Created(Record),
    Updated(Record),
    Deleted(RecordId),
    Failed(SyncOp),
}

/// What changed after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncUpdate {
    /// The cache was replaced; re-render.
    Refreshed { generation: u64 },
    Created(Record),
    Updated(Record),
    Deleted(RecordId),
    /// Logged and dropped. The cache is untouched.
    Failed(SyncOp),
}

/// Answer of the yes/no gate in front of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(accepted: bool) -> Self {
        if accepted {
            Confirmation::Accepted
        } else {
            Confirmation::Declined
        }
    }
}

/// Owner of the [`Cache`] and issuer of all network operations.
///
/// Operations must be called from within a tokio runtime. A successful
/// mutation schedules a fresh [`load_all`](Self::load_all) when its event is
/// applied, so mutations never touch the cache directly.
pub struct Synchronizer {
    api: Arc<dyn MovieApi>,
    cache: Cache,
    events_tx: UnboundedSender<SyncEvent>,
    events_rx: UnboundedReceiver<SyncEvent>,
    outstanding: usize,
}

impl Synchronizer {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            cache: Cache::new(),
            events_tx,
            events_rx,
            outstanding: 0,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Requests spawned whose completion has not been applied yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn load_all(&mut self) {
        let api = Arc::clone(&self.api);
        self.spawn(SyncOp::LoadAll, async move {
            api.list().await.map(SyncEvent::Loaded)
        });
    }

    /// Validate raw form input and, if it passes, send a create request.
    ///
    /// Validation failures are returned synchronously and nothing is sent.
    pub fn create(&mut self, title: &str, genre: &str, year: &str) -> Result<(), ValidationError> {
        let draft = MovieDraft::parse(title, genre, year)?;
        self.create_draft(draft);
        Ok(())
    }

    pub fn create_draft(&mut self, draft: MovieDraft) {
        let api = Arc::clone(&self.api);
        self.spawn(SyncOp::Create, async move {
            api.create(&draft).await.map(SyncEvent::Created)
        });
    }

    /// Replace the fields of `id`. Existence is checked by the server.
    pub fn update(&mut self, id: RecordId, draft: MovieDraft) {
        let api = Arc::clone(&self.api);
        self.spawn(SyncOp::Update, async move {
            api.update(&id, &draft).await.map(SyncEvent::Updated)
        });
    }

    pub fn delete(&mut self, id: RecordId, confirmation: Confirmation) {
        if confirmation == Confirmation::Declined {
            debug!(id = %id, "delete declined");
            return;
        }

        let api = Arc::clone(&self.api);
        self.spawn(SyncOp::Delete, async move {
            api.delete(&id).await?;
            Ok::<_, ClientError>(SyncEvent::Deleted(id))
        });
    }

    /// Apply the next completion if one is already waiting.
    pub fn try_next(&mut self) -> Option<SyncUpdate> {
        let event = self.events_rx.try_recv().ok()?;
        Some(self.apply(event))
    }

    /// Wait for the next completion. `None` when nothing is outstanding.
    pub async fn next(&mut self) -> Option<SyncUpdate> {
        if self.outstanding == 0 {
            return None;
        }
        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Apply completions until no request (including follow-up loads) is
    /// left in flight.
    pub async fn settle(&mut self) -> Vec<SyncUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next().await {
            updates.push(update);
        }
        updates
    }

    fn spawn<F>(&mut self, op: SyncOp, request: F)
    where
        F: Future<Output = Result<SyncEvent, ClientError>> + Send + 'static,
    {
        self.outstanding += 1;
        let events_tx = self.events_tx.clone();
        let worker = tokio::spawn(request);
        tokio::spawn(async move {
            // Every spawned request reports back exactly once, even if it
            // panicked, so `outstanding` always drains.
            let event = match worker.await {
                Ok(Ok(event)) => event,
                Ok(Err(err)) => {
                    warn!(op = %op, error = %err, "request failed");
                    SyncEvent::Failed(op)
                }
                Err(err) => {
                    warn!(op = %op, error = %err, "request task aborted");
                    SyncEvent::Failed(op)
                }
            };
            // The receiver lives as long as the Synchronizer; a send error
            // only means it was dropped.
            let _ = events_tx.send(event);
        });
    }

    fn apply(&mut self, event: SyncEvent) -> SyncUpdate {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event {
            SyncEvent::Loaded(records) => {
                self.cache.replace(records);
                info!(
                    records = self.cache.len(),
                    generation = self.cache.generation(),
                    "collection loaded"
                );
                SyncUpdate::Refreshed {
                    generation: self.cache.generation(),
                }
            }
            SyncEvent::Created(record) => {
                info!(id = %record.id, "record created");
                self.load_all();
                SyncUpdate::Created(record)
            }
            SyncEvent::Updated(record) => {
                info!(id = %record.id, "record updated");
                self.load_all();
                SyncUpdate::Updated(record)
            }
            SyncEvent::Deleted(id) => {
                info!(id = %id, "record deleted");
                self.load_all();
                SyncUpdate::Deleted(id)
            }
            SyncEvent::Failed(op) => SyncUpdate::Failed(op),
        }
    }
}
