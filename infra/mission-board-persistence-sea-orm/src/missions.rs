use mission_board_app::domain::{
    MissionId, RepoError,
    mission::{Mission, MissionPatch, MissionRepository, NewMission},
};
use mission_board_persistence_sea_orm_entities::mission;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::{FromDbErr, flatten_transaction};

pub struct MissionRepositoryImpl {
    db: DatabaseConnection,
}

impl MissionRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_mission(model: mission::Model) -> Mission {
    Mission {
        mission_id: MissionId(model.id),
        name: model.name,
        description: model.description,
        points: model.points,
        is_active: model.is_active,
    }
}

fn new_mission_model(mission: NewMission) -> mission::ActiveModel {
    mission::ActiveModel {
        name: Set(mission.name),
        description: Set(mission.description),
        points: Set(mission.points),
        is_active: Set(mission.is_active),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl MissionRepository for MissionRepositoryImpl {
    async fn list_missions(&self) -> Result<Vec<Mission>, RepoError> {
        let models = mission::Entity::find()
            .order_by_asc(mission::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_mission).collect())
    }

    async fn get_mission(&self, mission_id: MissionId) -> Result<Option<Mission>, RepoError> {
        let model = mission::Entity::find_by_id(mission_id.0)
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_mission))
    }

    async fn create_mission(&self, mission: NewMission) -> Result<MissionId, RepoError> {
        let res = mission::Entity::insert(new_mission_model(mission))
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(MissionId(res.last_insert_id))
    }

    async fn update_mission(
        &self,
        mission_id: MissionId,
        patch: MissionPatch,
    ) -> Result<Option<Mission>, RepoError> {
        let res = self
            .db
            .transaction::<_, Option<Mission>, RepoError>(|txn| {
                Box::pin(async move {
                    let Some(model) = mission::Entity::find_by_id(mission_id.0)
                        .one(txn)
                        .await
                        .map_err(RepoError::from_db_err)?
                    else {
                        return Ok(None);
                    };

                    let mut mission = model_to_mission(model);
                    patch.apply(&mut mission);
                    mission::Entity::update(mission::ActiveModel {
                        id: Set(mission.mission_id.0),
                        name: Set(mission.name.clone()),
                        description: Set(mission.description.clone()),
                        points: Set(mission.points),
                        is_active: Set(mission.is_active),
                    })
                    .exec(txn)
                    .await
                    .map_err(RepoError::from_db_err)?;
                    Ok(Some(mission))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn insert_missions_if_empty(
        &self,
        missions: Vec<NewMission>,
    ) -> Result<usize, RepoError> {
        let res = self
            .db
            .transaction::<_, usize, RepoError>(|txn| {
                Box::pin(async move {
                    let existing = mission::Entity::find()
                        .count(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    if existing > 0 || missions.is_empty() {
                        return Ok(0);
                    }
                    let count = missions.len();
                    mission::Entity::insert_many(missions.into_iter().map(new_mission_model))
                        .exec(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    Ok(count)
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn insert_missing_missions(
        &self,
        missions: Vec<NewMission>,
    ) -> Result<usize, RepoError> {
        let res = self
            .db
            .transaction::<_, usize, RepoError>(|txn| {
                Box::pin(async move {
                    let mut inserted = 0;
                    for mission in missions {
                        let exists = mission::Entity::find()
                            .filter(mission::Column::Name.eq(mission.name.as_str()))
                            .one(txn)
                            .await
                            .map_err(RepoError::from_db_err)?
                            .is_some();
                        if exists {
                            continue;
                        }
                        mission::Entity::insert(new_mission_model(mission))
                            .exec(txn)
                            .await
                            .map_err(RepoError::from_db_err)?;
                        inserted += 1;
                    }
                    Ok(inserted)
                })
            })
            .await;
        flatten_transaction(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_db;

    #[tokio::test]
    async fn seeding_only_fills_empty_table() {
        let db = memory_db().await;
        let missions = MissionRepositoryImpl::new(db);

        let first = vec![
            NewMission::active("Alpha", "First", 10),
            NewMission::active("Beta", "Second", 20),
        ];
        assert_eq!(
            missions
                .insert_missions_if_empty(first.clone())
                .await
                .unwrap(),
            2
        );
        assert_eq!(missions.insert_missions_if_empty(first).await.unwrap(), 0);
        assert_eq!(missions.list_missions().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_missions_are_matched_by_name() {
        let db = memory_db().await;
        let missions = MissionRepositoryImpl::new(db);
        missions
            .create_mission(NewMission::active("Alpha", "First", 10))
            .await
            .unwrap();

        let inserted = missions
            .insert_missing_missions(vec![
                NewMission::active("Alpha", "Changed", 99),
                NewMission::active("Gamma", "Third", 30),
            ])
            .await
            .unwrap();

        assert_eq!(inserted, 1);
        let all = missions.list_missions().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].points, 10);
        assert_eq!(all[1].name, "Gamma");
    }

    #[tokio::test]
    async fn update_mission_patches_fields() {
        let db = memory_db().await;
        let missions = MissionRepositoryImpl::new(db);
        let id = missions
            .create_mission(NewMission::active("Alpha", "First", 10))
            .await
            .unwrap();

        let updated = missions
            .update_mission(
                id,
                MissionPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.points, 10);
        assert_eq!(missions.get_mission(id).await.unwrap(), Some(updated));
        assert!(
            missions
                .update_mission(MissionId(77), MissionPatch::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
