//! Report upload endpoint.
//!
//! POST /api/v1/uploads - Multipart upload of a report file. The file is
//! written to the object store under `{user_id}/{timestamp}.{ext}` and a
//! `files` row is inserted so the analysis and dashboard flows can find it.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use nirogya_core::repository::FileRepository;
use nirogya_core::storage::ObjectStore;
use nirogya_types::file::FileRecord;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub file_path: String,
    pub success: bool,
}

/// POST /api/v1/uploads - Store an uploaded report file.
///
/// Expects multipart fields `user_id` (text) and `file` (the report).
pub async fn upload_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut user_id: Option<String> = None;
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                user_id = Some(text);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("report").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let user_id = user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required parameters".to_string()))?;
    let (file_name, file_type, bytes) = file
        .ok_or_else(|| AppError::Validation("Missing required parameters".to_string()))?;

    let file_path = format!(
        "{user_id}/{}.{}",
        Utc::now().timestamp_millis(),
        extension_of(&file_name)
    );
    state.uploads.put(&file_path, &bytes).await?;

    let record = FileRecord {
        id: Uuid::now_v7(),
        user_id,
        file_name,
        file_path: file_path.clone(),
        file_type,
        uploaded_at: Utc::now(),
    };
    state.files.insert(&record).await?;

    tracing::info!(file_path = %file_path, size = bytes.len(), "report uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: record.id,
            file_path,
            success: true,
        }),
    ))
}

/// Lowercased extension of the original file name, `bin` when absent.
fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}
