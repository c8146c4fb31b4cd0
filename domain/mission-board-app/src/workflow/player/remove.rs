use std::sync::Arc;

use crate::{
    domain::{PlayerId, player::PlayerRepository},
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait RemovePlayerUseCase {
    async fn delete_player(&self, player_id: PlayerId) -> Result<(), RemovePlayerError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RemovePlayerError {
    #[error("Failed to delete player")]
    RepositoryError,
}

/// Deletes the player row only. Achievements stay orphaned and the team keeps
/// its member count and score.
pub struct RemovePlayerUseCaseImpl<PR: PlayerRepository> {
    player_repository: Arc<PR>,
}

impl<PR: PlayerRepository> RemovePlayerUseCaseImpl<PR> {
    pub fn new(player_repository: Arc<PR>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<PR: PlayerRepository + Send + Sync + 'static> RemovePlayerUseCase
    for RemovePlayerUseCaseImpl<PR>
{
    async fn delete_player(&self, player_id: PlayerId) -> Result<(), RemovePlayerError> {
        match self.player_repository.delete_player(player_id).await {
            Ok(true) => {
                log::info!("Deleted player {}", player_id);
                Ok(())
            }
            Ok(false) => {
                log::debug!("Delete of unknown player {} ignored", player_id);
                Ok(())
            }
            Err(e) => {
                log_storage_error(&format!("Failed to delete player {}", player_id), e);
                Err(RemovePlayerError::RepositoryError)
            }
        }
    }
}
