use crate::domain::{AchievementId, MissionId, PlayerId, RepoError, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub achievement_id: AchievementId,
    pub player_id: PlayerId,
    pub mission_id: Option<MissionId>,
    pub label: String,
    pub points: i64,
    pub completed_at: Option<Timestamp>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementGrant {
    pub player_id: PlayerId,
    pub mission_id: Option<MissionId>,
    pub label: String,
    pub points: i64,
    pub completed_at: Timestamp,
}

#[async_trait::async_trait]
pub trait AchievementRepository {
    /// Inserts the achievement, then adds its points to the player and to the
    /// player's team, all in one transaction. A missing player or team is
    /// skipped without error; the achievement row is inserted regardless.
    async fn grant_achievement(&self, grant: AchievementGrant)
    -> Result<AchievementId, RepoError>;
    async fn list_player_achievements(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Achievement>, RepoError>;
}
