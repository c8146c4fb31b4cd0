use std::sync::Arc;

use crate::{
    domain::{
        NpcId,
        npc::{NewNpc, Npc, NpcPatch, NpcRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait ManageNpcUseCase {
    async fn get_all_npcs(&self) -> Result<Vec<Npc>, QueryError>;
    async fn get_npc(&self, npc_id: NpcId) -> Result<Option<Npc>, QueryError>;
    async fn create_npc(&self, npc: NewNpc) -> Result<NpcId, ManageNpcError>;
    async fn update_npc(
        &self,
        npc_id: NpcId,
        patch: NpcPatch,
    ) -> Result<Option<Npc>, ManageNpcError>;
    async fn delete_npc(&self, npc_id: NpcId) -> Result<(), ManageNpcError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ManageNpcError {
    #[error("Failed to save NPC")]
    RepositoryError,
}

pub struct ManageNpcUseCaseImpl<NR: NpcRepository> {
    npc_repository: Arc<NR>,
}

impl<NR: NpcRepository> ManageNpcUseCaseImpl<NR> {
    pub fn new(npc_repository: Arc<NR>) -> Self {
        Self { npc_repository }
    }
}

#[async_trait::async_trait]
impl<NR: NpcRepository + Send + Sync + 'static> ManageNpcUseCase for ManageNpcUseCaseImpl<NR> {
    async fn get_all_npcs(&self) -> Result<Vec<Npc>, QueryError> {
        self.npc_repository.list_npcs().await.map_err(|e| {
            log_storage_error("Failed to list NPCs", e);
            QueryError::RepositoryError
        })
    }

    async fn get_npc(&self, npc_id: NpcId) -> Result<Option<Npc>, QueryError> {
        self.npc_repository.get_npc(npc_id).await.map_err(|e| {
            log_storage_error(&format!("Failed to load NPC {}", npc_id), e);
            QueryError::RepositoryError
        })
    }

    async fn create_npc(&self, npc: NewNpc) -> Result<NpcId, ManageNpcError> {
        let name = npc.name.clone();
        match self.npc_repository.create_npc(npc).await {
            Ok(npc_id) => {
                log::info!("Created NPC {} ({})", name, npc_id);
                Ok(npc_id)
            }
            Err(e) => {
                log_storage_error(&format!("Failed to create NPC {}", name), e);
                Err(ManageNpcError::RepositoryError)
            }
        }
    }

    async fn update_npc(
        &self,
        npc_id: NpcId,
        patch: NpcPatch,
    ) -> Result<Option<Npc>, ManageNpcError> {
        self.npc_repository
            .update_npc(npc_id, patch)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to update NPC {}", npc_id), e);
                ManageNpcError::RepositoryError
            })
    }

    async fn delete_npc(&self, npc_id: NpcId) -> Result<(), ManageNpcError> {
        self.npc_repository
            .delete_npc(npc_id)
            .await
            .map(|_| ())
            .map_err(|e| {
                log_storage_error(&format!("Failed to delete NPC {}", npc_id), e);
                ManageNpcError::RepositoryError
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::npc::NpcDetails, mock::MockStore};

    #[tokio::test]
    async fn npc_lifecycle() {
        let store = Arc::new(MockStore::default());
        let manage = ManageNpcUseCaseImpl::new(store.clone());

        let npc_id = manage
            .create_npc(NewNpc {
                name: "Commander".to_string(),
                real_name: "Ada Reyes".to_string(),
                details: NpcDetails {
                    hometown: Some("Olympus".to_string()),
                    favorite_hobbies: Some(vec!["chess".to_string()]),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        let updated = manage
            .update_npc(
                npc_id,
                NpcPatch {
                    hometown: Some(None),
                    team_name: Some(Some("Red".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.real_name, "Ada Reyes");
        assert_eq!(updated.details.hometown, None);
        assert_eq!(updated.details.team_name.as_deref(), Some("Red"));
        assert_eq!(
            updated.details.favorite_hobbies,
            Some(vec!["chess".to_string()])
        );

        assert_eq!(manage.get_all_npcs().await.unwrap().len(), 1);
        manage.delete_npc(npc_id).await.unwrap();
        assert!(manage.get_npc(npc_id).await.unwrap().is_none());
    }
}
