use std::sync::Arc;

use crate::{
    domain::{
        PlayerId,
        player::{Player, PlayerRepository},
        team::{Team, TeamRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait PlayerQueryUseCase {
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, QueryError>;
    async fn get_all_players(&self) -> Result<Vec<Player>, QueryError>;
    async fn get_all_teams(&self) -> Result<Vec<Team>, QueryError>;
}

pub struct PlayerQueryUseCaseImpl<PR: PlayerRepository, TR: TeamRepository> {
    player_repository: Arc<PR>,
    team_repository: Arc<TR>,
}

impl<PR: PlayerRepository, TR: TeamRepository> PlayerQueryUseCaseImpl<PR, TR> {
    pub fn new(player_repository: Arc<PR>, team_repository: Arc<TR>) -> Self {
        Self {
            player_repository,
            team_repository,
        }
    }
}

#[async_trait::async_trait]
impl<
    PR: PlayerRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
> PlayerQueryUseCase for PlayerQueryUseCaseImpl<PR, TR>
{
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, QueryError> {
        self.player_repository
            .get_player(player_id)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to load player {}", player_id), e);
                QueryError::RepositoryError
            })
    }

    async fn get_all_players(&self) -> Result<Vec<Player>, QueryError> {
        self.player_repository.list_players().await.map_err(|e| {
            log_storage_error("Failed to list players", e);
            QueryError::RepositoryError
        })
    }

    async fn get_all_teams(&self) -> Result<Vec<Team>, QueryError> {
        self.team_repository.list_teams().await.map_err(|e| {
            log_storage_error("Failed to list teams", e);
            QueryError::RepositoryError
        })
    }
}
