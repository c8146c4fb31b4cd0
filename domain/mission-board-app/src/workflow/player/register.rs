use std::sync::Arc;

use crate::{
    config::{GameConfig, SIGNUP_BONUS_LABEL, SIGNUP_BONUS_POINTS},
    domain::{
        PlayerId, RepoCreateError, StorageId, now_millis,
        player::{PlayerRegistration, PlayerRepository, WelcomeAchievement},
    },
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait RegisterPlayerUseCase {
    async fn create_player(
        &self,
        name: &str,
        password: &str,
        team_name: &str,
        avatar_id: Option<StorageId>,
    ) -> Result<PlayerId, RegisterPlayerError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RegisterPlayerError {
    #[error("Player name already exists")]
    DuplicateName,
    #[error("Failed to create player")]
    RepositoryError,
}

pub struct RegisterPlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
    config: GameConfig,
}

impl<PR: PlayerRepository> RegisterPlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>, config: GameConfig) -> Self {
        Self {
            player_repository,
            config,
        }
    }

    fn registration(
        &self,
        name: &str,
        password: &str,
        team_name: &str,
        avatar_id: Option<StorageId>,
    ) -> PlayerRegistration {
        let (starting_score, welcome_achievement) = if self.config.award_signup_bonus {
            (
                SIGNUP_BONUS_POINTS,
                Some(WelcomeAchievement {
                    label: SIGNUP_BONUS_LABEL.to_string(),
                    points: SIGNUP_BONUS_POINTS,
                    completed_at: now_millis(),
                }),
            )
        } else {
            (0, None)
        };
        PlayerRegistration {
            name: name.to_string(),
            password: password.to_string(),
            team_name: team_name.to_string(),
            avatar_id,
            starting_score,
            welcome_achievement,
        }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> RegisterPlayerUseCase
    for RegisterPlayerUseCaseImpl<PR>
{
    async fn create_player(
        &self,
        name: &str,
        password: &str,
        team_name: &str,
        avatar_id: Option<StorageId>,
    ) -> Result<PlayerId, RegisterPlayerError> {
        let registration = self.registration(name, password, team_name, avatar_id);
        match self.player_repository.register_player(registration).await {
            Ok(player_id) => {
                log::info!(
                    "Registered player {} ({}) in team {}",
                    name,
                    player_id,
                    team_name
                );
                Ok(player_id)
            }
            Err(RepoCreateError::Conflict) => Err(RegisterPlayerError::DuplicateName),
            Err(RepoCreateError::StorageError(e)) => {
                log_storage_error(&format!("Failed to register player {}", name), e);
                Err(RegisterPlayerError::RepositoryError)
            }
        }
    }
}
