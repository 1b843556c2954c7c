use super::MovieApi;
use crate::core::{ClientError, MovieDraft, Record, RecordId, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::RwLock;

const MEMORY_URL: &str = "memory://movies";

/// A request observed by [`InMemoryMovieApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(MovieDraft),
    Update(RecordId, MovieDraft),
    Delete(RecordId),
}

#[derive(Default)]
struct MemoryState {
    records: Vec<Record>,
    next_id: i64,
    failing: bool,
    calls: Vec<ApiCall>,
}

/// In-process stand-in for the backend collection.
///
/// Assigns sequential numeric ids, keeps insertion order, and records every
/// call so tests can assert which requests were (or were not) issued.
/// Ids are matched on their URL form, the way an HTTP backend sees them.
#[derive(Default)]
pub struct InMemoryMovieApi {
    state: RwLock<MemoryState>,
}

impl InMemoryMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| match &r.id {
                RecordId::Number(n) => n.as_i64(),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            state: RwLock::new(MemoryState {
                records,
                next_id,
                ..MemoryState::default()
            }),
        }
    }

    /// While set, every call fails with `503 Service Unavailable`.
    pub async fn set_failing(&self, failing: bool) {
        self.state.write().await.failing = failing;
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.state.read().await.calls.clone()
    }

    pub async fn records(&self) -> Vec<Record> {
        self.state.read().await.records.clone()
    }

    fn status(status: StatusCode) -> ClientError {
        ClientError::Status {
            status,
            url: MEMORY_URL.to_string(),
        }
    }
}

fn same_id(stored: &RecordId, requested: &RecordId) -> bool {
    stored.to_string() == requested.to_string()
}

#[async_trait]
impl MovieApi for InMemoryMovieApi {
    async fn list(&self) -> Result<Vec<Record>> {
        let mut state = self.state.write().await;
        state.calls.push(ApiCall::List);
        if state.failing {
            return Err(Self::status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(state.records.clone())
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Record> {
        let mut state = self.state.write().await;
        state.calls.push(ApiCall::Create(draft.clone()));
        if state.failing {
            return Err(Self::status(StatusCode::SERVICE_UNAVAILABLE));
        }

        state.next_id += 1;
        let record = Record {
            id: RecordId::from(state.next_id),
            title: draft.title.clone(),
            genre: draft.genre.clone(),
            year: draft.year,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId, draft: &MovieDraft) -> Result<Record> {
        let mut state = self.state.write().await;
        state.calls.push(ApiCall::Update(id.clone(), draft.clone()));
        if state.failing {
            return Err(Self::status(StatusCode::SERVICE_UNAVAILABLE));
        }

        let record = state
            .records
            .iter_mut()
            .find(|r| same_id(&r.id, id))
            .ok_or_else(|| Self::status(StatusCode::NOT_FOUND))?;
        record.title = draft.title.clone();
        record.genre = draft.genre.clone();
        record.year = draft.year;
        Ok(record.clone())
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.push(ApiCall::Delete(id.clone()));
        if state.failing {
            return Err(Self::status(StatusCode::SERVICE_UNAVAILABLE));
        }

        let before = state.records.len();
        state.records.retain(|r| !same_id(&r.id, id));
        if state.records.len() == before {
            return Err(Self::status(StatusCode::NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            genre: "Drama".to_string(),
            year: 2000,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_after_seeded_records() {
        let api = InMemoryMovieApi::with_records(vec![Record {
            id: RecordId::from(5),
            title: "Seed".to_string(),
            genre: "Drama".to_string(),
            year: 1990,
        }]);

        let created = api.create(&draft("Next")).await.unwrap();
        assert_eq!(created.id, RecordId::from(6));
        assert_eq!(api.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let api = InMemoryMovieApi::new();
        let err = api.delete(&RecordId::from(1)).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status, .. } if status == StatusCode::NOT_FOUND));

        let err = api
            .update(&RecordId::from(1), &draft("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn ids_match_on_their_exact_text() {
        let api = InMemoryMovieApi::with_records(vec![
            Record {
                id: RecordId::Text("007".to_string()),
                title: "Bond".to_string(),
                genre: "Spy".to_string(),
                year: 1962,
            },
            Record {
                id: RecordId::from(7),
                title: "Seven".to_string(),
                genre: "Thriller".to_string(),
                year: 1995,
            },
        ]);

        api.delete(&RecordId::from("007")).await.unwrap();
        let titles: Vec<String> = api.records().await.into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Seven".to_string()]);

        // "7" typed by hand reaches the numeric record, as `<base>/7` would.
        api.update(&RecordId::from("7"), &draft("Se7en")).await.unwrap();
        assert_eq!(api.records().await[0].title, "Se7en");
    }

    #[tokio::test]
    async fn failing_mode_rejects_everything_and_still_records_calls() {
        let api = InMemoryMovieApi::new();
        api.set_failing(true).await;

        assert!(api.list().await.is_err());
        assert!(api.create(&draft("Nope")).await.is_err());
        assert!(api.records().await.is_empty());
        assert_eq!(
            api.calls().await,
            vec![ApiCall::List, ApiCall::Create(draft("Nope"))]
        );
    }
}
