use std::sync::Arc;

use crate::{
    config::GameConfig,
    domain::{
        PlayerId, RepoUpdateError,
        player::{Player, PlayerPatch, PlayerRepository},
    },
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait UpdatePlayerUseCase {
    /// Applies a sparse patch. Returns `None` when no player has this id.
    async fn update_player(
        &self,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Option<Player>, UpdatePlayerError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdatePlayerError {
    #[error("Player name already exists")]
    DuplicateName,
    #[error("Extended profile fields are disabled")]
    ProfileFieldsDisabled,
    #[error("Failed to update player")]
    RepositoryError,
}

pub struct UpdatePlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
    config: GameConfig,
}

impl<PR: PlayerRepository> UpdatePlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>, config: GameConfig) -> Self {
        Self {
            player_repository,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> UpdatePlayerUseCase
    for UpdatePlayerUseCaseImpl<PR>
{
    async fn update_player(
        &self,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Option<Player>, UpdatePlayerError> {
        if !self.config.extended_profile_fields && !patch.profile.is_empty() {
            return Err(UpdatePlayerError::ProfileFieldsDisabled);
        }

        match self.player_repository.update_player(player_id, patch).await {
            Ok(Some(player)) => {
                log::info!("Updated player {}", player_id);
                Ok(Some(player))
            }
            Ok(None) => Ok(None),
            Err(RepoUpdateError::Conflict) => Err(UpdatePlayerError::DuplicateName),
            Err(RepoUpdateError::StorageError(e)) => {
                log_storage_error(&format!("Failed to update player {}", player_id), e);
                Err(UpdatePlayerError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::player::ProfilePatch,
        mock::MockStore,
        workflow::player::register::{RegisterPlayerUseCase, RegisterPlayerUseCaseImpl},
    };

    async fn setup(config: GameConfig) -> (Arc<MockStore>, PlayerId, PlayerId) {
        let store = Arc::new(MockStore::default());
        let register = RegisterPlayerUseCaseImpl::new(store.clone(), config);
        let a = register.create_player("A", "p", "Red", None).await.unwrap();
        let b = register.create_player("B", "p", "Red", None).await.unwrap();
        (store, a, b)
    }

    #[tokio::test]
    async fn rename_to_taken_name_fails() {
        let config = GameConfig::default();
        let (store, a, _) = setup(config).await;
        let update = UpdatePlayerUseCaseImpl::new(store.clone(), config);

        let result = update
            .update_player(
                a,
                PlayerPatch {
                    name: Some("B".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UpdatePlayerError::DuplicateName)));
        let player = store.get_player(a).await.unwrap().unwrap();
        assert_eq!(player.name, "A");
    }

    #[tokio::test]
    async fn keeping_own_name_is_not_a_conflict() {
        let config = GameConfig::default();
        let (store, a, _) = setup(config).await;
        let update = UpdatePlayerUseCaseImpl::new(store.clone(), config);

        let player = update
            .update_player(
                a,
                PlayerPatch {
                    name: Some("A".to_string()),
                    password: Some("new".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(player.name, "A");
        assert_eq!(player.password, "new");
        assert_eq!(player.team_name, "Red");
    }

    #[tokio::test]
    async fn unknown_player_returns_none() {
        let config = GameConfig::default();
        let (store, _, _) = setup(config).await;
        let update = UpdatePlayerUseCaseImpl::new(store.clone(), config);

        let result = update
            .update_player(PlayerId(999), PlayerPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn profile_fields_rejected_when_disabled() {
        let config = GameConfig {
            extended_profile_fields: false,
            ..GameConfig::default()
        };
        let (store, a, _) = setup(config).await;
        let update = UpdatePlayerUseCaseImpl::new(store.clone(), config);

        let result = update
            .update_player(
                a,
                PlayerPatch {
                    profile: ProfilePatch {
                        company: Some(Some("Acme".to_string())),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(UpdatePlayerError::ProfileFieldsDisabled)));

        let renamed = update
            .update_player(
                a,
                PlayerPatch {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Renamed");
    }
}
