//! File routes backed by the repository store
//!
//! Store operations only say whether they succeeded, so every failure maps to a
//! fixed status: 404 on read paths, 500 on write paths. Upstream detail stays in
//! the server log.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use depot_store::{ContentKind, FileContent, FileRecord};

use crate::app::AppState;

type HandlerError = (StatusCode, &'static str);

const NOT_FOUND: HandlerError = (StatusCode::NOT_FOUND, "Not found");
const WRITE_FAILED: HandlerError = (StatusCode::INTERNAL_SERVER_ERROR, "Internal error");

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub binary: Option<String>,
}

impl ReadParams {
    /// `?binary`, `?binary=1` and `?binary=true` select bytes; `false` and `0` do not.
    pub fn kind(&self) -> ContentKind {
        let binary = match self.binary.as_deref() {
            None => false,
            Some(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0"),
        };
        ContentKind::from_binary_flag(binary)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WriteParams {
    pub sha: Option<String>,
}

impl WriteParams {
    fn revision(&self) -> Option<&str> {
        self.sha.as_deref().filter(|sha| !sha.is_empty())
    }
}

pub async fn read_file(
    Path(path): Path<String>,
    Query(params): Query<ReadParams>,
    State(state): State<AppState>,
) -> Result<Json<FileRecord>, HandlerError> {
    state
        .store
        .get(&path, params.kind())
        .await
        .map(Json)
        .ok_or(NOT_FOUND)
}

pub async fn read_raw(
    Path(path): Path<String>,
    Query(params): Query<ReadParams>,
    State(state): State<AppState>,
) -> Result<Response, HandlerError> {
    let content = state
        .store
        .raw(&path, params.kind())
        .await
        .ok_or(NOT_FOUND)?;

    let response = match content {
        FileContent::Text(text) => {
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        FileContent::Binary(bytes) => {
            ([(header::CONTENT_TYPE, "application/octet-stream")], bytes).into_response()
        }
    };
    Ok(response)
}

pub async fn probe_file(Path(path): Path<String>, State(state): State<AppState>) -> StatusCode {
    if state.store.exist(&path).await {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn create_file(
    Path(path): Path<String>,
    State(state): State<AppState>,
    body: String,
) -> Result<StatusCode, HandlerError> {
    if state.store.create(&path, &body).await {
        Ok(StatusCode::CREATED)
    } else {
        Err(WRITE_FAILED)
    }
}

pub async fn update_file(
    Path(path): Path<String>,
    Query(params): Query<WriteParams>,
    State(state): State<AppState>,
    body: String,
) -> Result<StatusCode, HandlerError> {
    if state
        .store
        .commit(&path, body.as_bytes(), params.revision())
        .await
    {
        Ok(StatusCode::OK)
    } else {
        Err(WRITE_FAILED)
    }
}

pub async fn delete_file(
    Path(path): Path<String>,
    Query(params): Query<WriteParams>,
    State(state): State<AppState>,
) -> Result<StatusCode, HandlerError> {
    if state.store.delete(&path, params.revision()).await {
        Ok(StatusCode::OK)
    } else {
        Err(WRITE_FAILED)
    }
}
