use std::sync::Arc;

use crate::{
    config::GameConfig,
    domain::{
        credentials::credentials_match,
        now_millis,
        player::{Player, PlayerRepository},
    },
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait LoginPlayerUseCase {
    async fn login_player(&self, name: &str, password: &str) -> Result<Player, LoginPlayerError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginPlayerError {
    /// Unknown name and wrong password are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Failed to log in")]
    RepositoryError,
}

pub struct LoginPlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
    config: GameConfig,
}

impl<PR: PlayerRepository> LoginPlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>, config: GameConfig) -> Self {
        Self {
            player_repository,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> LoginPlayerUseCase
    for LoginPlayerUseCaseImpl<PR>
{
    async fn login_player(&self, name: &str, password: &str) -> Result<Player, LoginPlayerError> {
        let player = match self.player_repository.get_player_by_name(name).await {
            Ok(Some(player)) => player,
            Ok(None) => return Err(LoginPlayerError::InvalidCredentials),
            Err(e) => {
                log_storage_error(&format!("Failed to look up player {}", name), e);
                return Err(LoginPlayerError::RepositoryError);
            }
        };

        if !credentials_match(&player.password, password) {
            log::debug!("Rejected login for player {}", player.player_id);
            return Err(LoginPlayerError::InvalidCredentials);
        }

        if !self.config.record_player_logins {
            return Ok(player);
        }

        let now = now_millis();
        if let Err(e) = self
            .player_repository
            .set_last_login(player.player_id, now)
            .await
        {
            log_storage_error(
                &format!("Failed to record login of player {}", player.player_id),
                e,
            );
            return Err(LoginPlayerError::RepositoryError);
        }
        Ok(Player {
            last_login_date: Some(now),
            ..player
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::MockStore,
        workflow::player::register::{RegisterPlayerUseCase, RegisterPlayerUseCaseImpl},
    };

    async fn store_with_player(config: GameConfig) -> Arc<MockStore> {
        let store = Arc::new(MockStore::default());
        RegisterPlayerUseCaseImpl::new(store.clone(), config)
            .create_player("Nova", "secret", "Red", None)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn login_returns_player() {
        let config = GameConfig::default();
        let store = store_with_player(config).await;
        let login = LoginPlayerUseCaseImpl::new(store.clone(), config);

        let player = login.login_player("Nova", "secret").await.unwrap();
        assert_eq!(player.name, "Nova");
        assert_eq!(player.last_login_date, None);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_name_fail_alike() {
        let config = GameConfig::default();
        let store = store_with_player(config).await;
        let login = LoginPlayerUseCaseImpl::new(store.clone(), config);

        let wrong_password = login.login_player("Nova", "guess").await.unwrap_err();
        let unknown_name = login.login_player("Ghost", "secret").await.unwrap_err();

        assert!(matches!(wrong_password, LoginPlayerError::InvalidCredentials));
        assert!(matches!(unknown_name, LoginPlayerError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_name.to_string());
    }

    #[tokio::test]
    async fn login_stamps_date_when_enabled() {
        let config = GameConfig {
            record_player_logins: true,
            ..GameConfig::default()
        };
        let store = store_with_player(config).await;
        let login = LoginPlayerUseCaseImpl::new(store.clone(), config);

        let player = login.login_player("Nova", "secret").await.unwrap();
        let stamped = player.last_login_date.expect("login date should be set");

        let stored = store.get_player(player.player_id).await.unwrap().unwrap();
        assert_eq!(stored.last_login_date, Some(stamped));
    }
}
