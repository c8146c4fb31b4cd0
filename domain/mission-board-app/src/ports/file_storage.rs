use crate::domain::StorageId;

/// Blob storage collaborator. Clients upload bytes straight to the URL handed
/// out here and pass the resulting storage id back to mutations.
pub trait FileStoragePort {
    fn generate_upload_url(&self) -> Result<String, FileStorageError>;
    fn get_url(&self, storage_id: &StorageId) -> Option<String>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileStorageError {
    #[error("file storage unavailable: {0}")]
    Unavailable(String),
}
