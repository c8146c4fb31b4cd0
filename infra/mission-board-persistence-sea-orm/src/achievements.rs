use mission_board_app::domain::{
    AchievementId, MissionId, PlayerId, RepoError,
    achievement::{Achievement, AchievementGrant, AchievementRepository},
    team::TeamContribution,
};
use mission_board_persistence_sea_orm_entities::{achievement, player};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ExprTrait, QueryFilter,
    QueryOrder, TransactionTrait, prelude::Expr,
};

use crate::{FromDbErr, flatten_transaction, teams::contribute_to_team};

pub struct AchievementRepositoryImpl {
    db: DatabaseConnection,
}

impl AchievementRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_achievement(model: achievement::Model) -> Achievement {
    Achievement {
        achievement_id: AchievementId(model.id),
        player_id: PlayerId(model.player_id),
        mission_id: model.mission_id.map(MissionId),
        label: model.label,
        points: model.points,
        completed_at: model.completed_at,
    }
}

#[async_trait::async_trait]
impl AchievementRepository for AchievementRepositoryImpl {
    async fn grant_achievement(
        &self,
        grant: AchievementGrant,
    ) -> Result<AchievementId, RepoError> {
        let res = self
            .db
            .transaction::<_, AchievementId, RepoError>(|txn| {
                Box::pin(async move {
                    let model = achievement::ActiveModel {
                        player_id: Set(grant.player_id.0),
                        mission_id: Set(grant.mission_id.map(|id| id.0)),
                        label: Set(grant.label),
                        points: Set(grant.points),
                        completed_at: Set(Some(grant.completed_at)),
                        ..Default::default()
                    };
                    let achievement_id = achievement::Entity::insert(model)
                        .exec(txn)
                        .await
                        .map_err(RepoError::from_db_err)?
                        .last_insert_id;

                    let owner = player::Entity::find_by_id(grant.player_id.0)
                        .one(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    let Some(owner) = owner else {
                        log::debug!(
                            "Achievement {} granted to unknown player {}",
                            achievement_id,
                            grant.player_id
                        );
                        return Ok(AchievementId(achievement_id));
                    };

                    player::Entity::update_many()
                        .col_expr(
                            player::Column::TotalScore,
                            Expr::col(player::Column::TotalScore).add(grant.points),
                        )
                        .filter(player::Column::Id.eq(owner.id))
                        .exec(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;

                    contribute_to_team(
                        txn,
                        &owner.team_name,
                        TeamContribution::points(grant.points),
                    )
                    .await
                    .map_err(RepoError::from_db_err)?;

                    Ok(AchievementId(achievement_id))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn list_player_achievements(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Achievement>, RepoError> {
        let models = achievement::Entity::find()
            .filter(achievement::Column::PlayerId.eq(player_id.0))
            .order_by_asc(achievement::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_achievement).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory_db, players::PlayerRepositoryImpl, teams::TeamRepositoryImpl};
    use mission_board_app::domain::{
        player::{PlayerRegistration, PlayerRepository},
        team::TeamRepository,
    };

    fn grant(player_id: PlayerId, points: i64) -> AchievementGrant {
        AchievementGrant {
            player_id,
            mission_id: Some(MissionId(3)),
            label: "SOS Mission".to_string(),
            points,
            completed_at: 2_000,
        }
    }

    #[tokio::test]
    async fn grant_credits_player_and_team() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db.clone());
        let teams = TeamRepositoryImpl::new(db.clone());
        let achievements = AchievementRepositoryImpl::new(db);

        let player_id = players
            .register_player(PlayerRegistration {
                name: "Nova".to_string(),
                password: "pw".to_string(),
                team_name: "Red".to_string(),
                avatar_id: None,
                starting_score: 0,
                welcome_achievement: None,
            })
            .await
            .unwrap();

        achievements
            .grant_achievement(grant(player_id, 48))
            .await
            .unwrap();
        achievements
            .grant_achievement(grant(player_id, 2))
            .await
            .unwrap();

        let player = players.get_player(player_id).await.unwrap().unwrap();
        assert_eq!(player.total_score, 50);
        assert_eq!(teams.list_teams().await.unwrap()[0].total_score, 50);

        let rows = achievements
            .list_player_achievements(player_id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mission_id, Some(MissionId(3)));
        assert_eq!(rows[0].completed_at, Some(2_000));
    }

    #[tokio::test]
    async fn unknown_player_only_records_row() {
        let db = memory_db().await;
        let teams = TeamRepositoryImpl::new(db.clone());
        let achievements = AchievementRepositoryImpl::new(db);

        achievements
            .grant_achievement(grant(PlayerId(99), 10))
            .await
            .unwrap();

        assert!(teams.list_teams().await.unwrap().is_empty());
        assert_eq!(
            achievements
                .list_player_achievements(PlayerId(99))
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
