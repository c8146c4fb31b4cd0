use std::sync::Arc;

use crate::{
    domain::{
        AdminId,
        admin::{Admin, AdminRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait AdminQueryUseCase {
    async fn get_admin(&self, admin_id: AdminId) -> Result<Option<Admin>, QueryError>;
    async fn get_all_admins(&self) -> Result<Vec<Admin>, QueryError>;
}

pub struct AdminQueryUseCaseImpl<AR: AdminRepository> {
    admin_repository: Arc<AR>,
}

impl<AR: AdminRepository> AdminQueryUseCaseImpl<AR> {
    pub fn new(admin_repository: Arc<AR>) -> Self {
        Self { admin_repository }
    }
}

#[async_trait::async_trait]
impl<AR: AdminRepository + Send + Sync + 'static> AdminQueryUseCase
    for AdminQueryUseCaseImpl<AR>
{
    async fn get_admin(&self, admin_id: AdminId) -> Result<Option<Admin>, QueryError> {
        self.admin_repository.get_admin(admin_id).await.map_err(|e| {
            log_storage_error(&format!("Failed to load admin {}", admin_id), e);
            QueryError::RepositoryError
        })
    }

    async fn get_all_admins(&self) -> Result<Vec<Admin>, QueryError> {
        self.admin_repository.list_admins().await.map_err(|e| {
            log_storage_error("Failed to list admins", e);
            QueryError::RepositoryError
        })
    }
}
