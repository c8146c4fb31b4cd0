use std::sync::Arc;

use crate::{
    domain::{
        MissionId,
        mission::{Mission, MissionRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait MissionQueryUseCase {
    /// Every mission, active or not. Callers decide what to display.
    async fn get_missions(&self) -> Result<Vec<Mission>, QueryError>;
    async fn get_mission(&self, mission_id: MissionId) -> Result<Option<Mission>, QueryError>;
}

pub struct MissionQueryUseCaseImpl<MR: MissionRepository> {
    mission_repository: Arc<MR>,
}

impl<MR: MissionRepository> MissionQueryUseCaseImpl<MR> {
    pub fn new(mission_repository: Arc<MR>) -> Self {
        Self { mission_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MissionRepository + Send + Sync + 'static> MissionQueryUseCase
    for MissionQueryUseCaseImpl<MR>
{
    async fn get_missions(&self) -> Result<Vec<Mission>, QueryError> {
        self.mission_repository.list_missions().await.map_err(|e| {
            log_storage_error("Failed to list missions", e);
            QueryError::RepositoryError
        })
    }

    async fn get_mission(&self, mission_id: MissionId) -> Result<Option<Mission>, QueryError> {
        self.mission_repository
            .get_mission(mission_id)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to load mission {}", mission_id), e);
                QueryError::RepositoryError
            })
    }
}
