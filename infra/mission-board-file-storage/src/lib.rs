use mission_board_app::{
    domain::StorageId,
    ports::file_storage::{FileStorageError, FileStoragePort},
};

const DEFAULT_BASE_URL: &str = "http://localhost:3000/storage";

/// Hands out upload slots under `{base}/upload/{uuid}` and resolves stored
/// blobs to `{base}/files/{id}`. The blob host itself lives elsewhere.
pub struct LocalFileStorageAdapter {
    base_url: String,
}

impl LocalFileStorageAdapter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("FILE_STORAGE_BASE_URL").unwrap_or_else(|_| {
            log::warn!(
                "FILE_STORAGE_BASE_URL not set, using {}",
                DEFAULT_BASE_URL
            );
            DEFAULT_BASE_URL.to_string()
        });
        Self::new(&base_url)
    }
}

impl FileStoragePort for LocalFileStorageAdapter {
    fn generate_upload_url(&self) -> Result<String, FileStorageError> {
        if self.base_url.is_empty() {
            return Err(FileStorageError::Unavailable(
                "no storage base url configured".to_string(),
            ));
        }
        Ok(format!("{}/upload/{}", self.base_url, uuid::Uuid::new_v4()))
    }

    fn get_url(&self, storage_id: &StorageId) -> Option<String> {
        if storage_id.0.is_empty() {
            return None;
        }
        Some(format!("{}/files/{}", self.base_url, storage_id.0))
    }
}
