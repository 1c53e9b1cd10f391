//! Asset uploads
//!
//! Stores uploaded binaries on disk and hands back a stable /uploads URL.
//! The server never looks inside the bytes beyond hashing them for a
//! collision-free filename.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::core::config::AppState;
use crate::core::error::{Error, Result};

/// Disk-backed asset store.
pub struct DiskAssets {
    dir: PathBuf,
}

impl DiskAssets {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Write a blob and return its public URL. The filename is a content
    /// digest prefix plus the sanitized original name, so re-uploading the
    /// same bytes yields the same reference.
    pub async fn put(&self, original_name: &str, data: Bytes) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(&data);
        let digest = format!("{:x}", hasher.finalize());

        let filename = format!("{}-{}", &digest[..16], sanitize(original_name));
        let path = self.dir.join(&filename);

        fs::write(&path, &data)
            .await
            .map_err(|e| Error::Internal(format!("asset write failed: {e}")))?;

        info!("[Assets] Stored {} ({} bytes)", filename, data.len());
        Ok(format!("/uploads/{filename}"))
    }
}

/// Replace anything outside [A-Za-z0-9.-_] to keep names path-safe.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// POST /api/upload
pub async fn upload_asset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("file").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::BadRequest(e.to_string()))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) = upload.ok_or_else(|| Error::BadRequest("no file".to_string()))?;
    let url = state.assets.put(&filename, data).await?;

    Ok(Json(json!({ "url": url })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_unsafe_characters() {
        assert_eq!(sanitize("logo v2 (final)?.png"), "logo_v2__final__.png");
        assert_eq!(sanitize("ok-name_1.jpg"), "ok-name_1.jpg");
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize(""), "file");
    }
}
