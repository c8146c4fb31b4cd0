use crate::domain::{
    Clearable, PlayerId, RepoCreateError, RepoError, RepoUpdateError, StorageId, Timestamp,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub password: String,
    pub team_name: String,
    pub total_score: i64,
    pub avatar_id: Option<StorageId>,
    pub last_login_date: Option<Timestamp>,
    pub profile: PlayerProfile,
}

/// Extended profile fields. Only populated in deployments that enable them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerProfile {
    pub real_name: Option<String>,
    pub gender: Option<String>,
    pub hide_gender: Option<bool>,
    pub hometown: Option<String>,
    pub hide_hometown: Option<bool>,
    pub company: Option<String>,
    pub occupation: Option<String>,
    pub about_you: Option<String>,
    pub favorite_hobbies: Option<Vec<String>>,
    pub custom_hobbies: Option<String>,
    pub id_card_id: Option<StorageId>,
    pub personal_website: Option<String>,
}

/// Everything needed to insert a player together with its team contribution.
#[derive(Clone, Debug)]
pub struct PlayerRegistration {
    pub name: String,
    pub password: String,
    pub team_name: String,
    pub avatar_id: Option<StorageId>,
    pub starting_score: i64,
    pub welcome_achievement: Option<WelcomeAchievement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomeAchievement {
    pub label: String,
    pub points: i64,
    pub completed_at: Timestamp,
}

#[derive(Clone, Debug, Default)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub password: Option<String>,
    pub avatar_id: Clearable<StorageId>,
    pub profile: ProfilePatch,
}

#[derive(Clone, Debug, Default)]
pub struct ProfilePatch {
    pub real_name: Clearable<String>,
    pub gender: Clearable<String>,
    pub hide_gender: Clearable<bool>,
    pub hometown: Clearable<String>,
    pub hide_hometown: Clearable<bool>,
    pub company: Clearable<String>,
    pub occupation: Clearable<String>,
    pub about_you: Clearable<String>,
    pub favorite_hobbies: Clearable<Vec<String>>,
    pub custom_hobbies: Clearable<String>,
    pub id_card_id: Clearable<StorageId>,
    pub personal_website: Clearable<String>,
}

fn patch_field<T>(target: &mut Option<T>, update: Clearable<T>) {
    if let Some(value) = update {
        *target = value;
    }
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.real_name.is_none()
            && self.gender.is_none()
            && self.hide_gender.is_none()
            && self.hometown.is_none()
            && self.hide_hometown.is_none()
            && self.company.is_none()
            && self.occupation.is_none()
            && self.about_you.is_none()
            && self.favorite_hobbies.is_none()
            && self.custom_hobbies.is_none()
            && self.id_card_id.is_none()
            && self.personal_website.is_none()
    }

    pub fn apply(self, profile: &mut PlayerProfile) {
        patch_field(&mut profile.real_name, self.real_name);
        patch_field(&mut profile.gender, self.gender);
        patch_field(&mut profile.hide_gender, self.hide_gender);
        patch_field(&mut profile.hometown, self.hometown);
        patch_field(&mut profile.hide_hometown, self.hide_hometown);
        patch_field(&mut profile.company, self.company);
        patch_field(&mut profile.occupation, self.occupation);
        patch_field(&mut profile.about_you, self.about_you);
        patch_field(&mut profile.favorite_hobbies, self.favorite_hobbies);
        patch_field(&mut profile.custom_hobbies, self.custom_hobbies);
        patch_field(&mut profile.id_card_id, self.id_card_id);
        patch_field(&mut profile.personal_website, self.personal_website);
    }
}

impl PlayerPatch {
    pub fn apply(self, player: &mut Player) {
        if let Some(name) = self.name {
            player.name = name;
        }
        if let Some(password) = self.password {
            player.password = password;
        }
        patch_field(&mut player.avatar_id, self.avatar_id);
        self.profile.apply(&mut player.profile);
    }
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    /// Inserts the player and applies its signup contribution to the team
    /// named `registration.team_name` (founding it when missing) in a single
    /// transaction. Fails with `Conflict` when the name is taken.
    async fn register_player(
        &self,
        registration: PlayerRegistration,
    ) -> Result<PlayerId, RepoCreateError>;
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, RepoError>;
    /// All players in creation order.
    async fn list_players(&self) -> Result<Vec<Player>, RepoError>;
    /// Applies the patch atomically. A name change that collides with another
    /// player fails with `Conflict`. Returns `None` for an unknown id.
    async fn update_player(
        &self,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Option<Player>, RepoUpdateError>;
    async fn set_last_login(&self, player_id: PlayerId, at: Timestamp) -> Result<(), RepoError>;
    async fn delete_player(&self, player_id: PlayerId) -> Result<bool, RepoError>;
}
