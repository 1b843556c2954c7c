//! Minimal in-memory movie backend served over real HTTP for tests.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use filmshelf::{MovieDraft, Record, RecordId};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct BackendState {
    records: Vec<Record>,
    next_id: i64,
    failing: bool,
    bodies: Vec<Value>,
}

#[derive(Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn seeded(records: Vec<Record>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = records.len() as i64;
            state.records = records;
        }
        backend
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.lock().unwrap().records.clone()
    }

    /// Raw JSON bodies of every POST and PUT received.
    pub fn bodies(&self) -> Vec<Value> {
        self.state.lock().unwrap().bodies.clone()
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Backend,
}

pub fn movie(id: i64, title: &str, genre: &str, year: i32) -> Record {
    Record {
        id: RecordId::from(id),
        title: title.to_string(),
        genre: genre.to_string(),
        year,
    }
}

pub fn dune_and_heat() -> Vec<Record> {
    vec![
        movie(1, "Dune", "Sci-Fi", 2021),
        movie(2, "Heat", "Crime", 1995),
    ]
}

pub async fn spawn(backend: Backend) -> TestServer {
    let app = Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/:id", put(replace_movie).delete(delete_movie))
        .route("/garbage", get(|| async { "definitely not json" }))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    TestServer {
        base_url: format!("http://{addr}/movies"),
        backend,
    }
}

fn parse_draft(body: &Value) -> Option<MovieDraft> {
    serde_json::from_value(body.clone()).ok()
}

async fn list_movies(State(backend): State<Backend>) -> impl IntoResponse {
    let state = backend.state.lock().unwrap();
    if state.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(state.records.clone()).into_response()
}

async fn create_movie(State(backend): State<Backend>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut state = backend.state.lock().unwrap();
    state.bodies.push(body.clone());
    if state.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Some(draft) = parse_draft(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    state.next_id += 1;
    let record = Record {
        id: RecordId::from(state.next_id),
        title: draft.title,
        genre: draft.genre,
        year: draft.year,
    };
    state.records.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn replace_movie(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = backend.state.lock().unwrap();
    state.bodies.push(body.clone());
    if state.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Some(draft) = parse_draft(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match state.records.iter_mut().find(|r| r.id.to_string() == id) {
        Some(record) => {
            record.title = draft.title;
            record.genre = draft.genre;
            record.year = draft.year;
            Json(record.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_movie(State(backend): State<Backend>, Path(id): Path<String>) -> StatusCode {
    let mut state = backend.state.lock().unwrap();
    if state.failing {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let before = state.records.len();
    state.records.retain(|r| r.id.to_string() != id);
    if state.records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
