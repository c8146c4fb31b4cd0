use crate::domain::{Clearable, NpcId, RepoError, StorageId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Npc {
    pub npc_id: NpcId,
    pub name: String,
    pub real_name: String,
    pub details: NpcDetails,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NpcDetails {
    pub gender: Option<String>,
    pub hide_gender: Option<bool>,
    pub hometown: Option<String>,
    pub hide_hometown: Option<bool>,
    pub company: Option<String>,
    pub occupation: Option<String>,
    pub about_you: Option<String>,
    pub team_name: Option<String>,
    pub favorite_hobbies: Option<Vec<String>>,
    pub custom_hobbies: Option<String>,
    pub avatar_id: Option<StorageId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNpc {
    pub name: String,
    pub real_name: String,
    pub details: NpcDetails,
}

#[derive(Clone, Debug, Default)]
pub struct NpcPatch {
    pub name: Option<String>,
    pub real_name: Option<String>,
    pub gender: Clearable<String>,
    pub hide_gender: Clearable<bool>,
    pub hometown: Clearable<String>,
    pub hide_hometown: Clearable<bool>,
    pub company: Clearable<String>,
    pub occupation: Clearable<String>,
    pub about_you: Clearable<String>,
    pub team_name: Clearable<String>,
    pub favorite_hobbies: Clearable<Vec<String>>,
    pub custom_hobbies: Clearable<String>,
    pub avatar_id: Clearable<StorageId>,
}

impl NpcPatch {
    pub fn apply(self, npc: &mut Npc) {
        fn set<T>(target: &mut Option<T>, update: Clearable<T>) {
            if let Some(value) = update {
                *target = value;
            }
        }

        if let Some(name) = self.name {
            npc.name = name;
        }
        if let Some(real_name) = self.real_name {
            npc.real_name = real_name;
        }
        let details = &mut npc.details;
        set(&mut details.gender, self.gender);
        set(&mut details.hide_gender, self.hide_gender);
        set(&mut details.hometown, self.hometown);
        set(&mut details.hide_hometown, self.hide_hometown);
        set(&mut details.company, self.company);
        set(&mut details.occupation, self.occupation);
        set(&mut details.about_you, self.about_you);
        set(&mut details.team_name, self.team_name);
        set(&mut details.favorite_hobbies, self.favorite_hobbies);
        set(&mut details.custom_hobbies, self.custom_hobbies);
        set(&mut details.avatar_id, self.avatar_id);
    }
}

#[async_trait::async_trait]
pub trait NpcRepository {
    async fn list_npcs(&self) -> Result<Vec<Npc>, RepoError>;
    async fn get_npc(&self, npc_id: NpcId) -> Result<Option<Npc>, RepoError>;
    async fn create_npc(&self, npc: NewNpc) -> Result<NpcId, RepoError>;
    async fn update_npc(&self, npc_id: NpcId, patch: NpcPatch) -> Result<Option<Npc>, RepoError>;
    async fn delete_npc(&self, npc_id: NpcId) -> Result<bool, RepoError>;
}
