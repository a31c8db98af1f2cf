//! Uploaded file metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata row for a file in the object store.
///
/// The bytes themselves live in the object store under `file_path`;
/// this record only tracks ownership and display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
