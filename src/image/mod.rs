use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use uuid::Uuid;

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// Stores uploaded bytes under a generated name and hands back the
/// filename. Durability beyond a successful write is out of scope.
#[derive(Debug, Clone)]
pub struct ImageService {
    uploads_dir: PathBuf,
}

impl ImageService {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub async fn save(&self, extension: &str, bytes: &[u8]) -> std::io::Result<String> {
        let filename = format!("{}{extension}", Uuid::new_v4());
        tokio::fs::write(self.uploads_dir.join(&filename), bytes).await?;
        Ok(filename)
    }
}

pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        _ => None,
    }
}

/// POST /api/image — multipart upload of one png/jpeg image. Responds with
/// the stored filename as a JSON string; clients keep it in `photo`.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<String>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(content_type) = field.content_type().map(str::to_owned) else {
            continue;
        };
        let extension = extension_for(&content_type)
            .ok_or_else(|| ApiError::Validation(format!("Unsupported image type: {content_type}")))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read upload: {e}")))?;

        let filename = state
            .images
            .save(extension, &bytes)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to store image: {e}")))?;
        return Ok(Json(filename));
    }

    Err(ApiError::Validation("No image field in request".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_png_and_jpeg_are_accepted() {
        assert_eq!(extension_for("image/png"), Some(".png"));
        assert_eq!(extension_for("image/jpeg"), Some(".jpg"));
        assert_eq!(extension_for("image/gif"), None);
        assert_eq!(extension_for("text/plain"), None);
    }

    #[tokio::test]
    async fn save_writes_bytes_under_a_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let service = ImageService::new(dir.path());

        let filename = service.save(".png", b"not-really-a-png").await.unwrap();
        assert!(filename.ends_with(".png"));

        let stored = tokio::fs::read(dir.path().join(&filename)).await.unwrap();
        assert_eq!(stored, b"not-really-a-png");
    }

    #[tokio::test]
    async fn generated_names_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let service = ImageService::new(dir.path());

        let a = service.save(".jpg", b"a").await.unwrap();
        let b = service.save(".jpg", b"b").await.unwrap();
        assert_ne!(a, b);
    }
}
