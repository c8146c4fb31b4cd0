use mission_board_app::domain::{
    RepoError, TeamId,
    team::{Team, TeamContribution, TeamRepository},
};
use mission_board_persistence_sea_orm_entities::team;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ExprTrait, QueryFilter, QueryOrder, prelude::Expr,
};

use crate::FromDbErr;

/// The only writer of team aggregates. Adds the contribution to the team
/// named `team_name`; a missing team is founded by a signup contribution and
/// skipped otherwise. Callers run this inside their own transaction.
pub(crate) async fn contribute_to_team<C: ConnectionTrait>(
    conn: &C,
    team_name: &str,
    contribution: TeamContribution,
) -> Result<(), DbErr> {
    let res = team::Entity::update_many()
        .col_expr(
            team::Column::MemberCount,
            Expr::col(team::Column::MemberCount).add(contribution.members),
        )
        .col_expr(
            team::Column::TotalScore,
            Expr::col(team::Column::TotalScore).add(contribution.points),
        )
        .filter(team::Column::Name.eq(team_name))
        .exec(conn)
        .await?;

    if res.rows_affected == 0 {
        if !contribution.founds_team() {
            log::debug!("No team named {}, skipping contribution", team_name);
            return Ok(());
        }
        let model = team::ActiveModel {
            name: Set(team_name.to_string()),
            total_score: Set(contribution.points),
            member_count: Set(contribution.members),
            ..Default::default()
        };
        team::Entity::insert(model).exec(conn).await?;
        log::info!("Founded team {}", team_name);
    }
    Ok(())
}

fn model_to_team(model: team::Model) -> Team {
    Team {
        team_id: TeamId(model.id),
        name: model.name,
        total_score: model.total_score,
        member_count: model.member_count,
    }
}

pub struct TeamRepositoryImpl {
    db: DatabaseConnection,
}

impl TeamRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl TeamRepository for TeamRepositoryImpl {
    async fn list_teams(&self) -> Result<Vec<Team>, RepoError> {
        let models = team::Entity::find()
            .order_by_asc(team::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_team).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_db;

    #[tokio::test]
    async fn signup_founds_then_joins() {
        let db = memory_db().await;
        contribute_to_team(&db, "Red", TeamContribution::signup(10))
            .await
            .unwrap();
        contribute_to_team(&db, "Red", TeamContribution::signup(10))
            .await
            .unwrap();
        contribute_to_team(&db, "Red", TeamContribution::points(25))
            .await
            .unwrap();

        let teams = TeamRepositoryImpl::new(db).list_teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].member_count, 2);
        assert_eq!(teams[0].total_score, 45);
    }

    #[tokio::test]
    async fn points_never_found_a_team() {
        let db = memory_db().await;
        contribute_to_team(&db, "Ghost", TeamContribution::points(25))
            .await
            .unwrap();

        let teams = TeamRepositoryImpl::new(db).list_teams().await.unwrap();
        assert!(teams.is_empty());
    }
}
