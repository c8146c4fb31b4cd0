use std::sync::Arc;

use crate::{
    domain::{
        leaderboard::top_by_score,
        player::{Player, PlayerRepository},
        team::{Team, TeamRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait LeaderboardUseCase {
    /// Top ten players by total score. Equal scores keep signup order.
    async fn get_player_leaderboard(&self) -> Result<Vec<Player>, QueryError>;
    /// Top ten teams by total score. Equal scores keep founding order.
    async fn get_team_leaderboard(&self) -> Result<Vec<Team>, QueryError>;
}

pub struct LeaderboardUseCaseImpl<PR: PlayerRepository, TR: TeamRepository> {
    player_repository: Arc<PR>,
    team_repository: Arc<TR>,
}

impl<PR: PlayerRepository, TR: TeamRepository> LeaderboardUseCaseImpl<PR, TR> {
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
> LeaderboardUseCase for LeaderboardUseCaseImpl<PR, TR>
{
    async fn get_player_leaderboard(&self) -> Result<Vec<Player>, QueryError> {
        match self.player_repository.list_players().await {
            Ok(players) => Ok(top_by_score(players, |p| p.total_score)),
            Err(e) => {
                log_storage_error("Failed to load player leaderboard", e);
                Err(QueryError::RepositoryError)
            }
        }
    }

    async fn get_team_leaderboard(&self) -> Result<Vec<Team>, QueryError> {
        match self.team_repository.list_teams().await {
            Ok(teams) => Ok(top_by_score(teams, |t| t.total_score)),
            Err(e) => {
                log_storage_error("Failed to load team leaderboard", e);
                Err(QueryError::RepositoryError)
            }
        }
    }
}
