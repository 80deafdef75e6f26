use crate::error::AppError;
use crate::storage::WriteOutcome;
use crate::utils::state::AppState;
use crate::utils::validation::is_valid_entry_name;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResp {
    pub directory: String,
    pub contents: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileResp {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResp {
    pub message: String,
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteFileReq {
    content: Option<String>,
}

/// How a write request labels a replaced entry. Both kinds overwrite in full.
#[derive(Clone, Copy, Debug)]
enum WriteKind {
    Insert,
    Replace,
}

impl WriteKind {
    fn message(self, outcome: WriteOutcome) -> &'static str {
        match (self, outcome) {
            (_, WriteOutcome::Created) => "File created successfully",
            (WriteKind::Insert, WriteOutcome::Replaced) => "File updated successfully",
            (WriteKind::Replace, WriteOutcome::Replaced) => "File replaced successfully",
        }
    }
}

/// GET /files
pub async fn list_files_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let contents = state.storage.list().await?;
    Ok(Json(ListResp {
        directory: state.storage.root().display().to_string(),
        contents,
    }))
}

/// GET /files/<name>
pub async fn get_file_handler(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let name = entry_name(name)?;
    let content = state.storage.read(&name).await?;
    Ok(Json(FileResp {
        filename: name,
        content,
    }))
}

/// POST /files/<name>
pub async fn post_file_handler(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    body: Result<Json<WriteFileReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_file(state, entry_name(name)?, body, WriteKind::Insert).await
}

/// PUT /files/<name>
pub async fn put_file_handler(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    body: Result<Json<WriteFileReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_file(state, entry_name(name)?, body, WriteKind::Replace).await
}

/// DELETE /files/<name>
pub async fn delete_file_handler(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let name = entry_name(name)?;
    validate_name(&name)?;
    let _guard = state.locks.lock(&name).await;
    state.storage.delete(&name).await?;
    tracing::info!(filename = %name, "deleted file");

    Ok(Json(MessageResp {
        message: "File deleted successfully".to_string(),
        filename: name,
    }))
}

/// Unwraps the `{name}` segment; one that can't be decoded is an invalid name.
fn entry_name(name: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    name.map(|Path(name)| name)
        .map_err(|rejection| AppError::InvalidName(rejection.body_text()))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if !is_valid_entry_name(name) {
        return Err(AppError::InvalidName(name.to_string()));
    }
    Ok(())
}

async fn write_file(
    state: Arc<AppState>,
    name: String,
    body: Result<Json<WriteFileReq>, JsonRejection>,
    kind: WriteKind,
) -> Result<(StatusCode, Json<MessageResp>), AppError> {
    // The name is judged before the body.
    validate_name(&name)?;
    let Json(req) = body.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
    let content = req.content.ok_or(AppError::MissingContent)?;

    let _guard = state.locks.lock(&name).await;
    let outcome = state.storage.write(&name, &content).await?;
    tracing::info!(filename = %name, ?outcome, "wrote file");

    let status_code = match outcome {
        WriteOutcome::Created => StatusCode::CREATED,
        WriteOutcome::Replaced => StatusCode::OK,
    };
    Ok((
        status_code,
        Json(MessageResp {
            message: kind.message(outcome).to_string(),
            filename: name,
        }),
    ))
}
