use crate::domain::{MissionId, RepoError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mission {
    pub mission_id: MissionId,
    pub name: String,
    pub description: String,
    pub points: i64,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMission {
    pub name: String,
    pub description: String,
    pub points: i64,
    pub is_active: bool,
}

impl NewMission {
    pub fn active(name: &str, description: &str, points: i64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            points,
            is_active: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MissionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub points: Option<i64>,
    pub is_active: Option<bool>,
}

impl MissionPatch {
    pub fn apply(self, mission: &mut Mission) {
        if let Some(name) = self.name {
            mission.name = name;
        }
        if let Some(description) = self.description {
            mission.description = description;
        }
        if let Some(points) = self.points {
            mission.points = points;
        }
        if let Some(is_active) = self.is_active {
            mission.is_active = is_active;
        }
    }
}

#[async_trait::async_trait]
pub trait MissionRepository {
    /// All missions in creation order.
    async fn list_missions(&self) -> Result<Vec<Mission>, RepoError>;
    async fn get_mission(&self, mission_id: MissionId) -> Result<Option<Mission>, RepoError>;
    async fn create_mission(&self, mission: NewMission) -> Result<MissionId, RepoError>;
    async fn update_mission(
        &self,
        mission_id: MissionId,
        patch: MissionPatch,
    ) -> Result<Option<Mission>, RepoError>;
    /// Inserts all missions if and only if the table is empty. Returns the
    /// number of inserted rows.
    async fn insert_missions_if_empty(&self, missions: Vec<NewMission>)
    -> Result<usize, RepoError>;
    /// Inserts every mission whose name is not present yet. Returns the number
    /// of inserted rows.
    async fn insert_missing_missions(&self, missions: Vec<NewMission>)
    -> Result<usize, RepoError>;
}
