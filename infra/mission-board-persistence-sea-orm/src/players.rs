use mission_board_app::domain::{
    PlayerId, RepoCreateError, RepoError, RepoUpdateError, StorageId, Timestamp,
    player::{Player, PlayerPatch, PlayerProfile, PlayerRegistration, PlayerRepository},
    team::TeamContribution,
};
use mission_board_persistence_sea_orm_entities::{achievement, player};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait, prelude::Expr,
};

use crate::{
    FromDbErr, decode_hobbies, encode_hobbies, flatten_transaction, patched, storage_column,
    teams::contribute_to_team,
};

pub struct PlayerRepositoryImpl {
    db: DatabaseConnection,
}

impl PlayerRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_player(model: player::Model) -> Player {
    Player {
        player_id: PlayerId(model.id),
        name: model.name,
        password: model.password,
        team_name: model.team_name,
        total_score: model.total_score,
        avatar_id: model.avatar_id.map(StorageId),
        last_login_date: model.last_login_date,
        profile: PlayerProfile {
            real_name: model.real_name,
            gender: model.gender,
            hide_gender: model.hide_gender,
            hometown: model.hometown,
            hide_hometown: model.hide_hometown,
            company: model.company,
            occupation: model.occupation,
            about_you: model.about_you,
            favorite_hobbies: decode_hobbies(model.favorite_hobbies),
            custom_hobbies: model.custom_hobbies,
            id_card_id: model.id_card_id.map(StorageId),
            personal_website: model.personal_website,
        },
    }
}

/// Row update carrying only the columns the patch touches.
fn patch_to_active_model(player_id: PlayerId, patch: &PlayerPatch) -> player::ActiveModel {
    let profile = &patch.profile;
    player::ActiveModel {
        id: Unchanged(player_id.0),
        name: patched(&patch.name, Clone::clone),
        password: patched(&patch.password, Clone::clone),
        avatar_id: patched(&patch.avatar_id, storage_column),
        real_name: patched(&profile.real_name, Clone::clone),
        gender: patched(&profile.gender, Clone::clone),
        hide_gender: patched(&profile.hide_gender, Clone::clone),
        hometown: patched(&profile.hometown, Clone::clone),
        hide_hometown: patched(&profile.hide_hometown, Clone::clone),
        company: patched(&profile.company, Clone::clone),
        occupation: patched(&profile.occupation, Clone::clone),
        about_you: patched(&profile.about_you, Clone::clone),
        favorite_hobbies: patched(&profile.favorite_hobbies, encode_hobbies),
        custom_hobbies: patched(&profile.custom_hobbies, Clone::clone),
        id_card_id: patched(&profile.id_card_id, storage_column),
        personal_website: patched(&profile.personal_website, Clone::clone),
        ..Default::default()
    }
}

async fn name_taken<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    except: Option<PlayerId>,
) -> Result<bool, sea_orm::DbErr> {
    let mut query = player::Entity::find().filter(player::Column::Name.eq(name));
    if let Some(player_id) = except {
        query = query.filter(player::Column::Id.ne(player_id.0));
    }
    Ok(query.one(conn).await?.is_some())
}

#[async_trait::async_trait]
impl PlayerRepository for PlayerRepositoryImpl {
    async fn register_player(
        &self,
        registration: PlayerRegistration,
    ) -> Result<PlayerId, RepoCreateError> {
        let res = self
            .db
            .transaction::<_, PlayerId, RepoCreateError>(|txn| {
                Box::pin(async move {
                    if name_taken(txn, &registration.name, None)
                        .await
                        .map_err(RepoCreateError::from_db_err)?
                    {
                        return Err(RepoCreateError::Conflict);
                    }

                    contribute_to_team(
                        txn,
                        &registration.team_name,
                        TeamContribution::signup(registration.starting_score),
                    )
                    .await
                    .map_err(RepoCreateError::from_db_err)?;

                    let model = player::ActiveModel {
                        name: Set(registration.name),
                        password: Set(registration.password),
                        team_name: Set(registration.team_name),
                        total_score: Set(registration.starting_score),
                        avatar_id: Set(registration.avatar_id.map(|id| id.0)),
                        ..Default::default()
                    };
                    let player_id = player::Entity::insert(model)
                        .exec(txn)
                        .await
                        .map_err(RepoCreateError::from_db_err)?
                        .last_insert_id;

                    if let Some(welcome) = registration.welcome_achievement {
                        let model = achievement::ActiveModel {
                            player_id: Set(player_id),
                            mission_id: Set(None),
                            label: Set(welcome.label),
                            points: Set(welcome.points),
                            completed_at: Set(Some(welcome.completed_at)),
                            ..Default::default()
                        };
                        achievement::Entity::insert(model)
                            .exec(txn)
                            .await
                            .map_err(RepoCreateError::from_db_err)?;
                    }
                    Ok(PlayerId(player_id))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, RepoError> {
        let model = player::Entity::find_by_id(player_id.0)
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_player))
    }

    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, RepoError> {
        let model = player::Entity::find()
            .filter(player::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_player))
    }

    async fn list_players(&self) -> Result<Vec<Player>, RepoError> {
        let models = player::Entity::find()
            .order_by_asc(player::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_player).collect())
    }

    async fn update_player(
        &self,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Option<Player>, RepoUpdateError> {
        let res = self
            .db
            .transaction::<_, Option<Player>, RepoUpdateError>(|txn| {
                Box::pin(async move {
                    let Some(model) = player::Entity::find_by_id(player_id.0)
                        .one(txn)
                        .await
                        .map_err(RepoUpdateError::from_db_err)?
                    else {
                        return Ok(None);
                    };

                    if let Some(name) = &patch.name {
                        if name_taken(txn, name, Some(player_id))
                            .await
                            .map_err(RepoUpdateError::from_db_err)?
                        {
                            return Err(RepoUpdateError::Conflict);
                        }
                    }

                    let active = patch_to_active_model(player_id, &patch);
                    if active.is_changed() {
                        player::Entity::update(active)
                            .exec(txn)
                            .await
                            .map_err(RepoUpdateError::from_db_err)?;
                    }
                    let mut player = model_to_player(model);
                    patch.apply(&mut player);
                    Ok(Some(player))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn set_last_login(&self, player_id: PlayerId, at: Timestamp) -> Result<(), RepoError> {
        player::Entity::update_many()
            .col_expr(player::Column::LastLoginDate, Expr::value(at))
            .filter(player::Column::Id.eq(player_id.0))
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(())
    }

    async fn delete_player(&self, player_id: PlayerId) -> Result<bool, RepoError> {
        let res = player::Entity::delete_by_id(player_id.0)
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{connect, create_schema, memory_db, teams::TeamRepositoryImpl};
    use mission_board_app::domain::{
        player::{ProfilePatch, WelcomeAchievement},
        team::TeamRepository,
    };

    fn registration(name: &str, team_name: &str, bonus: bool) -> PlayerRegistration {
        PlayerRegistration {
            name: name.to_string(),
            password: "pw".to_string(),
            team_name: team_name.to_string(),
            avatar_id: None,
            starting_score: if bonus { 10 } else { 0 },
            welcome_achievement: bonus.then(|| WelcomeAchievement {
                label: "Welcome Bonus".to_string(),
                points: 10,
                completed_at: 1_000,
            }),
        }
    }

    async fn achievement_rows(db: &DatabaseConnection) -> usize {
        achievement::Entity::find().all(db).await.unwrap().len()
    }

    #[tokio::test]
    async fn registration_updates_team_and_records_bonus() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db.clone());
        let teams = TeamRepositoryImpl::new(db.clone());

        let a = players
            .register_player(registration("A", "TeamX", true))
            .await
            .unwrap();
        players
            .register_player(registration("B", "TeamX", true))
            .await
            .unwrap();

        let team = &teams.list_teams().await.unwrap()[0];
        assert_eq!(team.member_count, 2);
        assert_eq!(team.total_score, 20);
        assert_eq!(players.get_player(a).await.unwrap().unwrap().total_score, 10);
        assert_eq!(achievement_rows(&db).await, 2);
    }

    #[tokio::test]
    async fn duplicate_registration_rolls_back() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db.clone());
        let teams = TeamRepositoryImpl::new(db.clone());

        players
            .register_player(registration("A", "TeamX", true))
            .await
            .unwrap();
        let result = players
            .register_player(registration("A", "TeamY", true))
            .await;

        assert!(matches!(result, Err(RepoCreateError::Conflict)));
        let all_teams = teams.list_teams().await.unwrap();
        assert_eq!(all_teams.len(), 1);
        assert_eq!(all_teams[0].member_count, 1);
        assert_eq!(achievement_rows(&db).await, 1);
    }

    #[tokio::test]
    async fn update_applies_sparse_patch() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db);
        let id = players
            .register_player(registration("A", "TeamX", false))
            .await
            .unwrap();

        let updated = players
            .update_player(
                id,
                PlayerPatch {
                    profile: ProfilePatch {
                        company: Some(Some("Acme".to_string())),
                        favorite_hobbies: Some(Some(vec!["Chess".to_string()])),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.profile.company.as_deref(), Some("Acme"));

        let cleared = players
            .update_player(
                id,
                PlayerPatch {
                    profile: ProfilePatch {
                        company: Some(None),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.profile.company, None);
        assert_eq!(
            cleared.profile.favorite_hobbies,
            Some(vec!["Chess".to_string()])
        );
        assert_eq!(players.get_player(id).await.unwrap().unwrap(), cleared);
    }

    #[tokio::test]
    async fn rename_conflicts_only_with_other_players() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db);
        let a = players
            .register_player(registration("A", "TeamX", false))
            .await
            .unwrap();
        players
            .register_player(registration("B", "TeamX", false))
            .await
            .unwrap();

        let same_name = PlayerPatch {
            name: Some("A".to_string()),
            ..Default::default()
        };
        assert!(players.update_player(a, same_name).await.unwrap().is_some());

        let taken = PlayerPatch {
            name: Some("B".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            players.update_player(a, taken).await,
            Err(RepoUpdateError::Conflict)
        ));
    }

    #[tokio::test]
    async fn unknown_player_update_is_none() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db);
        let result = players
            .update_player(PlayerId(42), PlayerPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_keeps_team_member_count() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db.clone());
        let teams = TeamRepositoryImpl::new(db);
        let id = players
            .register_player(registration("A", "TeamX", true))
            .await
            .unwrap();

        assert!(players.delete_player(id).await.unwrap());
        assert!(!players.delete_player(id).await.unwrap());
        assert!(players.get_player(id).await.unwrap().is_none());
        assert_eq!(teams.list_teams().await.unwrap()[0].member_count, 1);
    }

    #[tokio::test]
    async fn last_login_is_stamped() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db);
        let id = players
            .register_player(registration("A", "TeamX", false))
            .await
            .unwrap();

        players.set_last_login(id, 5_000).await.unwrap();
        let player = players.get_player_by_name("A").await.unwrap().unwrap();
        assert_eq!(player.last_login_date, Some(5_000));
    }

    #[tokio::test]
    async fn unreadable_hobbies_survive_profile_update() {
        let db = memory_db().await;
        let players = PlayerRepositoryImpl::new(db.clone());
        let id = players
            .register_player(registration("A", "TeamX", false))
            .await
            .unwrap();
        player::Entity::update_many()
            .col_expr(player::Column::FavoriteHobbies, Expr::value("Chess, Hiking"))
            .filter(player::Column::Id.eq(id.0))
            .exec(&db)
            .await
            .unwrap();

        let loaded = players.get_player(id).await.unwrap().unwrap();
        assert_eq!(loaded.profile.favorite_hobbies, None);

        let updated = players
            .update_player(
                id,
                PlayerPatch {
                    profile: ProfilePatch {
                        company: Some(Some("Acme".to_string())),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.profile.company.as_deref(), Some("Acme"));

        let row = player::Entity::find_by_id(id.0)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.favorite_hobbies.as_deref(), Some("Chess, Hiking"));
        assert_eq!(row.company.as_deref(), Some("Acme"));

        let untouched = players
            .update_player(id, PlayerPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.profile.company.as_deref(), Some("Acme"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_signups_queue_behind_each_other() {
        let path = std::env::temp_dir().join(format!(
            "mission-board-signups-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let db = connect(&format!("sqlite://{}?mode=rwc", path.display()))
            .await
            .unwrap();
        create_schema(&db).await.unwrap();
        let players = Arc::new(PlayerRepositoryImpl::new(db.clone()));

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let players = players.clone();
                tokio::spawn(async move {
                    players
                        .register_player(registration(&format!("P{}", i), "TeamX", true))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let teams = TeamRepositoryImpl::new(db.clone()).list_teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].member_count, 40);
        assert_eq!(teams[0].total_score, 400);
        assert_eq!(achievement_rows(&db).await, 40);

        db.close().await.unwrap();
        let _ = std::fs::remove_file(&path);
    }
}
