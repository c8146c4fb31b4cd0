use std::sync::Arc;

use crate::{
    domain::{AdminId, admin::AdminRepository, credentials::credentials_match, now_millis},
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait LoginAdminUseCase {
    async fn login_admin(&self, username: &str, password: &str)
    -> Result<AdminId, LoginAdminError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginAdminError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Failed to log in")]
    RepositoryError,
}

pub struct LoginAdminUseCaseImpl<AR: AdminRepository> {
    admin_repository: Arc<AR>,
}

impl<AR: AdminRepository> LoginAdminUseCaseImpl<AR> {
    pub fn new(admin_repository: Arc<AR>) -> Self {
        Self { admin_repository }
    }
}

#[async_trait::async_trait]
impl<AR: AdminRepository + Send + Sync + 'static> LoginAdminUseCase
    for LoginAdminUseCaseImpl<AR>
{
    async fn login_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminId, LoginAdminError> {
        let admin = match self.admin_repository.get_admin_by_username(username).await {
            Ok(Some(admin)) if credentials_match(&admin.password, password) => admin,
            Ok(_) => return Err(LoginAdminError::InvalidCredentials),
            Err(e) => {
                log_storage_error(&format!("Failed to look up admin {}", username), e);
                return Err(LoginAdminError::RepositoryError);
            }
        };

        if let Err(e) = self
            .admin_repository
            .set_last_login(admin.admin_id, now_millis())
            .await
        {
            log_storage_error(
                &format!("Failed to record login of admin {}", admin.admin_id),
                e,
            );
            return Err(LoginAdminError::RepositoryError);
        }
        log::info!("Admin {} logged in", admin.username);
        Ok(admin.admin_id)
    }
}
