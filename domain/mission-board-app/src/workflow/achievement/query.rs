use std::sync::Arc;

use crate::{
    domain::{
        PlayerId,
        achievement::{Achievement, AchievementRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait AchievementQueryUseCase {
    async fn get_player_achievements(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Achievement>, QueryError>;
}

pub struct AchievementQueryUseCaseImpl<AR: AchievementRepository> {
    achievement_repository: Arc<AR>,
}

impl<AR: AchievementRepository> AchievementQueryUseCaseImpl<AR> {
    pub fn new(achievement_repository: Arc<AR>) -> Self {
        Self {
            achievement_repository,
        }
    }
}

#[async_trait::async_trait]
impl<AR: AchievementRepository + Send + Sync + 'static> AchievementQueryUseCase
    for AchievementQueryUseCaseImpl<AR>
{
    async fn get_player_achievements(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Achievement>, QueryError> {
        self.achievement_repository
            .list_player_achievements(player_id)
            .await
            .map_err(|e| {
                log_storage_error(
                    &format!("Failed to load achievements of player {}", player_id),
                    e,
                );
                QueryError::RepositoryError
            })
    }
}
