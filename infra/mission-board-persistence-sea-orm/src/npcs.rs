use mission_board_app::domain::{
    NpcId, RepoError, StorageId,
    npc::{NewNpc, Npc, NpcDetails, NpcPatch, NpcRepository},
};
use mission_board_persistence_sea_orm_entities::npc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait,
};

use crate::{
    FromDbErr, decode_hobbies, encode_hobbies, flatten_transaction, patched, storage_column,
};

pub struct NpcRepositoryImpl {
    db: DatabaseConnection,
}

impl NpcRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_npc(model: npc::Model) -> Npc {
    Npc {
        npc_id: NpcId(model.id),
        name: model.name,
        real_name: model.real_name,
        details: NpcDetails {
            gender: model.gender,
            hide_gender: model.hide_gender,
            hometown: model.hometown,
            hide_hometown: model.hide_hometown,
            company: model.company,
            occupation: model.occupation,
            about_you: model.about_you,
            team_name: model.team_name,
            favorite_hobbies: decode_hobbies(model.favorite_hobbies),
            custom_hobbies: model.custom_hobbies,
            avatar_id: model.avatar_id.map(StorageId),
        },
    }
}

fn npc_columns(name: &str, real_name: &str, details: &NpcDetails) -> npc::ActiveModel {
    npc::ActiveModel {
        name: Set(name.to_string()),
        real_name: Set(real_name.to_string()),
        gender: Set(details.gender.clone()),
        hide_gender: Set(details.hide_gender),
        hometown: Set(details.hometown.clone()),
        hide_hometown: Set(details.hide_hometown),
        company: Set(details.company.clone()),
        occupation: Set(details.occupation.clone()),
        about_you: Set(details.about_you.clone()),
        team_name: Set(details.team_name.clone()),
        favorite_hobbies: Set(encode_hobbies(&details.favorite_hobbies)),
        custom_hobbies: Set(details.custom_hobbies.clone()),
        avatar_id: Set(details.avatar_id.as_ref().map(|id| id.0.clone())),
        ..Default::default()
    }
}

fn patch_to_active_model(npc_id: NpcId, patch: &NpcPatch) -> npc::ActiveModel {
    npc::ActiveModel {
        id: Unchanged(npc_id.0),
        name: patched(&patch.name, Clone::clone),
        real_name: patched(&patch.real_name, Clone::clone),
        gender: patched(&patch.gender, Clone::clone),
        hide_gender: patched(&patch.hide_gender, Clone::clone),
        hometown: patched(&patch.hometown, Clone::clone),
        hide_hometown: patched(&patch.hide_hometown, Clone::clone),
        company: patched(&patch.company, Clone::clone),
        occupation: patched(&patch.occupation, Clone::clone),
        about_you: patched(&patch.about_you, Clone::clone),
        team_name: patched(&patch.team_name, Clone::clone),
        favorite_hobbies: patched(&patch.favorite_hobbies, encode_hobbies),
        custom_hobbies: patched(&patch.custom_hobbies, Clone::clone),
        avatar_id: patched(&patch.avatar_id, storage_column),
    }
}

#[async_trait::async_trait]
impl NpcRepository for NpcRepositoryImpl {
    async fn list_npcs(&self) -> Result<Vec<Npc>, RepoError> {
        let models = npc::Entity::find()
            .order_by_asc(npc::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_npc).collect())
    }

    async fn get_npc(&self, npc_id: NpcId) -> Result<Option<Npc>, RepoError> {
        let model = npc::Entity::find_by_id(npc_id.0)
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_npc))
    }

    async fn create_npc(&self, npc: NewNpc) -> Result<NpcId, RepoError> {
        let res = npc::Entity::insert(npc_columns(&npc.name, &npc.real_name, &npc.details))
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(NpcId(res.last_insert_id))
    }

    async fn update_npc(&self, npc_id: NpcId, patch: NpcPatch) -> Result<Option<Npc>, RepoError> {
        let res = self
            .db
            .transaction::<_, Option<Npc>, RepoError>(|txn| {
                Box::pin(async move {
                    let Some(model) = npc::Entity::find_by_id(npc_id.0)
                        .one(txn)
                        .await
                        .map_err(RepoError::from_db_err)?
                    else {
                        return Ok(None);
                    };

                    let active = patch_to_active_model(npc_id, &patch);
                    if active.is_changed() {
                        npc::Entity::update(active)
                            .exec(txn)
                            .await
                            .map_err(RepoError::from_db_err)?;
                    }
                    let mut npc = model_to_npc(model);
                    patch.apply(&mut npc);
                    Ok(Some(npc))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn delete_npc(&self, npc_id: NpcId) -> Result<bool, RepoError> {
        let res = npc::Entity::delete_by_id(npc_id.0)
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(res.rows_affected > 0)
    }
}
