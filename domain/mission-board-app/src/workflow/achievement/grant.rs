use std::sync::Arc;

use crate::{
    domain::{
        MissionId, PlayerId,
        achievement::{AchievementGrant, AchievementRepository},
        now_millis,
    },
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait GrantAchievementUseCase {
    /// Records the achievement and credits its points to the player and the
    /// player's team. Unknown players or teams are skipped silently. Negative
    /// points are rejected before anything is recorded.
    async fn add_achievement(
        &self,
        player_id: PlayerId,
        label: &str,
        points: i64,
        mission_id: Option<MissionId>,
    ) -> Result<PlayerId, GrantAchievementError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GrantAchievementError {
    #[error("Achievement points must not be negative")]
    InvalidPoints,
    #[error("Failed to add achievement")]
    RepositoryError,
}

pub struct GrantAchievementUseCaseImpl<AR: AchievementRepository> {
    achievement_repository: Arc<AR>,
}

impl<AR: AchievementRepository> GrantAchievementUseCaseImpl<AR> {
    pub fn new(achievement_repository: Arc<AR>) -> Self {
        Self {
            achievement_repository,
        }
    }
}

#[async_trait::async_trait]
impl<AR: AchievementRepository + Send + Sync + 'static> GrantAchievementUseCase
    for GrantAchievementUseCaseImpl<AR>
{
    async fn add_achievement(
        &self,
        player_id: PlayerId,
        label: &str,
        points: i64,
        mission_id: Option<MissionId>,
    ) -> Result<PlayerId, GrantAchievementError> {
        if points < 0 {
            return Err(GrantAchievementError::InvalidPoints);
        }
        let grant = AchievementGrant {
            player_id,
            mission_id,
            label: label.to_string(),
            points,
            completed_at: now_millis(),
        };
        match self.achievement_repository.grant_achievement(grant).await {
            Ok(achievement_id) => {
                log::info!(
                    "Granted achievement {} ({} points) to player {}",
                    achievement_id,
                    points,
                    player_id
                );
                Ok(player_id)
            }
            Err(e) => {
                log_storage_error(
                    &format!("Failed to grant achievement to player {}", player_id),
                    e,
                );
                Err(GrantAchievementError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GameConfig,
        domain::{player::PlayerRepository, team::TeamRepository},
        mock::MockStore,
        workflow::player::register::{RegisterPlayerUseCase, RegisterPlayerUseCaseImpl},
    };

    #[tokio::test]
    async fn credits_player_and_team() {
        let store = Arc::new(MockStore::default());
        let register = RegisterPlayerUseCaseImpl::new(store.clone(), GameConfig::default());
        let player_id = register.create_player("A", "p", "Red", None).await.unwrap();
        register.create_player("B", "p", "Red", None).await.unwrap();
        let before_player = store.get_player(player_id).await.unwrap().unwrap();
        let before_team = store.list_teams().await.unwrap()[0].clone();
        let before_achievements = store.achievement_count();

        GrantAchievementUseCaseImpl::new(store.clone())
            .add_achievement(player_id, "Bonus", 20, None)
            .await
            .unwrap();

        let player = store.get_player(player_id).await.unwrap().unwrap();
        let team = &store.list_teams().await.unwrap()[0];
        assert_eq!(player.total_score, before_player.total_score + 20);
        assert_eq!(team.total_score, before_team.total_score + 20);
        assert_eq!(team.member_count, before_team.member_count);
        assert_eq!(store.achievement_count(), before_achievements + 1);
    }

    #[tokio::test]
    async fn unknown_player_records_achievement_only() {
        let store = Arc::new(MockStore::default());
        let register = RegisterPlayerUseCaseImpl::new(store.clone(), GameConfig::default());
        let player_id = register.create_player("A", "p", "Red", None).await.unwrap();
        let before_achievements = store.achievement_count();

        let result = GrantAchievementUseCaseImpl::new(store.clone())
            .add_achievement(PlayerId(404), "Bonus", 20, None)
            .await;

        assert_eq!(result.unwrap(), PlayerId(404));
        assert_eq!(store.achievement_count(), before_achievements + 1);
        let player = store.get_player(player_id).await.unwrap().unwrap();
        assert_eq!(player.total_score, 10);
        assert_eq!(store.list_teams().await.unwrap()[0].total_score, 10);
    }

    #[tokio::test]
    async fn negative_points_rejected() {
        let store = Arc::new(MockStore::default());
        let register = RegisterPlayerUseCaseImpl::new(store.clone(), GameConfig::default());
        let player_id = register.create_player("A", "p", "Red", None).await.unwrap();
        let before_achievements = store.achievement_count();

        let result = GrantAchievementUseCaseImpl::new(store.clone())
            .add_achievement(player_id, "Penalty", -50, None)
            .await;

        assert!(matches!(result, Err(GrantAchievementError::InvalidPoints)));
        assert_eq!(store.achievement_count(), before_achievements);
        let player = store.get_player(player_id).await.unwrap().unwrap();
        assert_eq!(player.total_score, 10);
        assert_eq!(store.list_teams().await.unwrap()[0].total_score, 10);
    }

    #[tokio::test]
    async fn zero_points_recorded() {
        let store = Arc::new(MockStore::default());
        let register = RegisterPlayerUseCaseImpl::new(store.clone(), GameConfig::default());
        let player_id = register.create_player("A", "p", "Red", None).await.unwrap();

        GrantAchievementUseCaseImpl::new(store.clone())
            .add_achievement(player_id, "Participation", 0, None)
            .await
            .unwrap();

        let player = store.get_player(player_id).await.unwrap().unwrap();
        assert_eq!(player.total_score, 10);
    }
}
