use std::sync::Arc;

use crate::{
    domain::{
        MissionId,
        mission::{Mission, MissionPatch, MissionRepository, NewMission},
    },
    workflow::log_storage_error,
};

/// Missions can be created and edited but never deleted.
#[async_trait::async_trait]
pub trait ManageMissionUseCase {
    async fn create_mission(&self, mission: NewMission) -> Result<MissionId, ManageMissionError>;
    async fn update_mission(
        &self,
        mission_id: MissionId,
        patch: MissionPatch,
    ) -> Result<Option<Mission>, ManageMissionError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ManageMissionError {
    #[error("Failed to save mission")]
    RepositoryError,
}

pub struct ManageMissionUseCaseImpl<MR: MissionRepository> {
    mission_repository: Arc<MR>,
}

impl<MR: MissionRepository> ManageMissionUseCaseImpl<MR> {
    pub fn new(mission_repository: Arc<MR>) -> Self {
        Self { mission_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MissionRepository + Send + Sync + 'static> ManageMissionUseCase
    for ManageMissionUseCaseImpl<MR>
{
    async fn create_mission(&self, mission: NewMission) -> Result<MissionId, ManageMissionError> {
        let name = mission.name.clone();
        match self.mission_repository.create_mission(mission).await {
            Ok(mission_id) => {
                log::info!("Created mission {} ({})", name, mission_id);
                Ok(mission_id)
            }
            Err(e) => {
                log_storage_error(&format!("Failed to create mission {}", name), e);
                Err(ManageMissionError::RepositoryError)
            }
        }
    }

    async fn update_mission(
        &self,
        mission_id: MissionId,
        patch: MissionPatch,
    ) -> Result<Option<Mission>, ManageMissionError> {
        self.mission_repository
            .update_mission(mission_id, patch)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to update mission {}", mission_id), e);
                ManageMissionError::RepositoryError
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;

    #[tokio::test]
    async fn update_is_sparse() {
        let store = Arc::new(MockStore::default());
        let manage = ManageMissionUseCaseImpl::new(store.clone());
        let mission_id = manage
            .create_mission(NewMission::active("Cyber Mission", "Protect assets.", 50))
            .await
            .unwrap();

        let updated = manage
            .update_mission(
                mission_id,
                MissionPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Cyber Mission");
        assert_eq!(updated.description, "Protect assets.");
        assert_eq!(updated.points, 50);
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn update_of_unknown_mission_returns_none() {
        let store = Arc::new(MockStore::default());
        let manage = ManageMissionUseCaseImpl::new(store.clone());
        let result = manage
            .update_mission(MissionId(7), MissionPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
