use std::sync::Arc;

use crate::{
    domain::{
        AdminId, RepoCreateError, RepoUpdateError, StorageId,
        admin::{Admin, AdminPatch, AdminRepository, NewAdmin},
        now_millis,
    },
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait ManageAdminUseCase {
    async fn create_admin(
        &self,
        username: &str,
        password: &str,
        avatar_id: Option<StorageId>,
    ) -> Result<AdminId, ManageAdminError>;
    async fn update_admin(
        &self,
        admin_id: AdminId,
        patch: AdminPatch,
    ) -> Result<Option<Admin>, ManageAdminError>;
    /// Unconditional. Deleting the last admin is allowed.
    async fn delete_admin(&self, admin_id: AdminId) -> Result<(), ManageAdminError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ManageAdminError {
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Failed to save admin")]
    RepositoryError,
}

pub struct ManageAdminUseCaseImpl<AR: AdminRepository> {
    admin_repository: Arc<AR>,
}

impl<AR: AdminRepository> ManageAdminUseCaseImpl<AR> {
    pub fn new(admin_repository: Arc<AR>) -> Self {
        Self { admin_repository }
    }
}

#[async_trait::async_trait]
impl<AR: AdminRepository + Send + Sync + 'static> ManageAdminUseCase
    for ManageAdminUseCaseImpl<AR>
{
    async fn create_admin(
        &self,
        username: &str,
        password: &str,
        avatar_id: Option<StorageId>,
    ) -> Result<AdminId, ManageAdminError> {
        let admin = NewAdmin {
            username: username.to_string(),
            password: password.to_string(),
            avatar_id,
            last_login_date: now_millis(),
        };
        match self.admin_repository.create_admin(admin).await {
            Ok(admin_id) => {
                log::info!("Created admin {} ({})", username, admin_id);
                Ok(admin_id)
            }
            Err(RepoCreateError::Conflict) => Err(ManageAdminError::DuplicateUsername),
            Err(RepoCreateError::StorageError(e)) => {
                log_storage_error(&format!("Failed to create admin {}", username), e);
                Err(ManageAdminError::RepositoryError)
            }
        }
    }

    async fn update_admin(
        &self,
        admin_id: AdminId,
        patch: AdminPatch,
    ) -> Result<Option<Admin>, ManageAdminError> {
        match self.admin_repository.update_admin(admin_id, patch).await {
            Ok(admin) => Ok(admin),
            Err(RepoUpdateError::Conflict) => Err(ManageAdminError::DuplicateUsername),
            Err(RepoUpdateError::StorageError(e)) => {
                log_storage_error(&format!("Failed to update admin {}", admin_id), e);
                Err(ManageAdminError::RepositoryError)
            }
        }
    }

    async fn delete_admin(&self, admin_id: AdminId) -> Result<(), ManageAdminError> {
        match self.admin_repository.delete_admin(admin_id).await {
            Ok(deleted) => {
                if deleted {
                    log::info!("Deleted admin {}", admin_id);
                }
                Ok(())
            }
            Err(e) => {
                log_storage_error(&format!("Failed to delete admin {}", admin_id), e);
                Err(ManageAdminError::RepositoryError)
            }
        }
    }
}
