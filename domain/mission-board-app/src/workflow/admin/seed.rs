use std::sync::Arc;

use crate::{
    config::GameConfig,
    domain::{
        admin::{AdminRepository, NewAdmin},
        now_millis,
    },
    workflow::log_storage_error,
};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[async_trait::async_trait]
pub trait SeedAdminsUseCase {
    /// Creates the default admin account when no admin exists. Does nothing
    /// unless the deployment enables default admin seeding.
    async fn initialize_admins(&self) -> Result<(), SeedAdminsError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SeedAdminsError {
    #[error("Failed to seed admins")]
    RepositoryError,
}

pub struct SeedAdminsUseCaseImpl<AR: AdminRepository> {
    admin_repository: Arc<AR>,
    config: GameConfig,
}

impl<AR: AdminRepository> SeedAdminsUseCaseImpl<AR> {
    pub fn new(admin_repository: Arc<AR>, config: GameConfig) -> Self {
        Self {
            admin_repository,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<AR: AdminRepository + Send + Sync + 'static> SeedAdminsUseCase
    for SeedAdminsUseCaseImpl<AR>
{
    async fn initialize_admins(&self) -> Result<(), SeedAdminsError> {
        if !self.config.seed_default_admin {
            log::debug!("Default admin seeding disabled");
            return Ok(());
        }

        let admin = NewAdmin {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            avatar_id: None,
            last_login_date: now_millis(),
        };
        match self.admin_repository.insert_admin_if_empty(admin).await {
            Ok(true) => {
                log::warn!(
                    "Seeded default admin '{}'; change its password",
                    DEFAULT_ADMIN_USERNAME
                );
                Ok(())
            }
            Ok(false) => {
                log::debug!("Admins already initialized");
                Ok(())
            }
            Err(e) => {
                log_storage_error("Failed to initialize admins", e);
                Err(SeedAdminsError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;

    fn seeding_enabled() -> GameConfig {
        GameConfig {
            seed_default_admin: true,
            ..GameConfig::default()
        }
    }

    #[tokio::test]
    async fn seeds_once() {
        let store = Arc::new(MockStore::default());
        let seed = SeedAdminsUseCaseImpl::new(store.clone(), seeding_enabled());

        seed.initialize_admins().await.unwrap();
        seed.initialize_admins().await.unwrap();

        let admins = store.list_admins().await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(admins[0].password, DEFAULT_ADMIN_PASSWORD);
    }

    #[tokio::test]
    async fn skipped_when_admin_exists() {
        let store = Arc::new(MockStore::default());
        store
            .create_admin(NewAdmin {
                username: "root".to_string(),
                password: "pw".to_string(),
                avatar_id: None,
                last_login_date: 0,
            })
            .await
            .unwrap();

        SeedAdminsUseCaseImpl::new(store.clone(), seeding_enabled())
            .initialize_admins()
            .await
            .unwrap();

        let admins = store.list_admins().await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username, "root");
    }

    #[tokio::test]
    async fn disabled_by_default() {
        let store = Arc::new(MockStore::default());
        SeedAdminsUseCaseImpl::new(store.clone(), GameConfig::default())
            .initialize_admins()
            .await
            .unwrap();
        assert!(store.list_admins().await.unwrap().is_empty());
    }
}
