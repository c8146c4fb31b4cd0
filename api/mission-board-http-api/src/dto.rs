use mission_board_app::domain::{
    Clearable, StorageId, Timestamp,
    achievement::Achievement,
    admin::Admin,
    message::{Message, Priority},
    mission::Mission,
    npc::{Npc, NpcDetails},
    player::{Player, ProfilePatch},
    team::Team,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Keeps an explicit `null` apart from an absent field: absent becomes
/// `None` through `#[serde(default)]`, `null` becomes `Some(None)`.
pub fn clearable<'de, T, D>(deserializer: D) -> Result<Clearable<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn storage_id(raw: Option<String>) -> Option<StorageId> {
    raw.map(StorageId)
}

pub fn clearable_storage_id(raw: Clearable<String>) -> Clearable<StorageId> {
    raw.map(|value| value.map(StorageId))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonPriority {
    Low,
    Medium,
    High,
}

impl From<JsonPriority> for Priority {
    fn from(value: JsonPriority) -> Self {
        match value {
            JsonPriority::Low => Priority::Low,
            JsonPriority::Medium => Priority::Medium,
            JsonPriority::High => Priority::High,
        }
    }
}

impl From<Priority> for JsonPriority {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Low => JsonPriority::Low,
            Priority::Medium => JsonPriority::Medium,
            Priority::High => JsonPriority::High,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayer {
    pub id: i64,
    pub name: String,
    pub team_name: String,
    pub total_score: i64,
    pub avatar_id: Option<String>,
    pub last_login_date: Option<Timestamp>,
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
    pub id_card_id: Option<String>,
    pub personal_website: Option<String>,
}

impl From<Player> for JsonPlayer {
    fn from(player: Player) -> Self {
        let profile = player.profile;
        Self {
            id: player.player_id.0,
            name: player.name,
            team_name: player.team_name,
            total_score: player.total_score,
            avatar_id: player.avatar_id.map(|id| id.0),
            last_login_date: player.last_login_date,
            real_name: profile.real_name,
            gender: profile.gender,
            hide_gender: profile.hide_gender,
            hometown: profile.hometown,
            hide_hometown: profile.hide_hometown,
            company: profile.company,
            occupation: profile.occupation,
            about_you: profile.about_you,
            favorite_hobbies: profile.favorite_hobbies,
            custom_hobbies: profile.custom_hobbies,
            id_card_id: profile.id_card_id.map(|id| id.0),
            personal_website: profile.personal_website,
        }
    }
}

/// Extended profile part of an update request.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonProfilePatch {
    #[serde(default, deserialize_with = "clearable")]
    pub real_name: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub gender: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub hide_gender: Clearable<bool>,
    #[serde(default, deserialize_with = "clearable")]
    pub hometown: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub hide_hometown: Clearable<bool>,
    #[serde(default, deserialize_with = "clearable")]
    pub company: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub occupation: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub about_you: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub favorite_hobbies: Clearable<Vec<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub custom_hobbies: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub id_card_id: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub personal_website: Clearable<String>,
}

impl From<JsonProfilePatch> for ProfilePatch {
    fn from(patch: JsonProfilePatch) -> Self {
        ProfilePatch {
            real_name: patch.real_name,
            gender: patch.gender,
            hide_gender: patch.hide_gender,
            hometown: patch.hometown,
            hide_hometown: patch.hide_hometown,
            company: patch.company,
            occupation: patch.occupation,
            about_you: patch.about_you,
            favorite_hobbies: patch.favorite_hobbies,
            custom_hobbies: patch.custom_hobbies,
            id_card_id: clearable_storage_id(patch.id_card_id),
            personal_website: patch.personal_website,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonTeam {
    pub id: i64,
    pub name: String,
    pub total_score: i64,
    pub member_count: i64,
}

impl From<Team> for JsonTeam {
    fn from(team: Team) -> Self {
        Self {
            id: team.team_id.0,
            name: team.name,
            total_score: team.total_score,
            member_count: team.member_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonMission {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub points: i64,
    pub is_active: bool,
}

impl From<Mission> for JsonMission {
    fn from(mission: Mission) -> Self {
        Self {
            id: mission.mission_id.0,
            name: mission.name,
            description: mission.description,
            points: mission.points,
            is_active: mission.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonAchievement {
    pub id: i64,
    pub player_id: i64,
    pub mission_id: Option<i64>,
    pub label: String,
    pub points: i64,
    pub completed_at: Option<Timestamp>,
}

impl From<Achievement> for JsonAchievement {
    fn from(achievement: Achievement) -> Self {
        Self {
            id: achievement.achievement_id.0,
            player_id: achievement.player_id.0,
            mission_id: achievement.mission_id.map(|id| id.0),
            label: achievement.label,
            points: achievement.points,
            completed_at: achievement.completed_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessage {
    pub id: i64,
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub send_date: Timestamp,
    pub priority: JsonPriority,
    pub message_read: bool,
    pub read_date: Option<Timestamp>,
}

impl From<Message> for JsonMessage {
    fn from(message: Message) -> Self {
        Self {
            id: message.message_id.0,
            to: message.to,
            from: message.from,
            subject: message.subject,
            body: message.body,
            send_date: message.send_date,
            priority: message.priority.into(),
            message_read: message.message_read,
            read_date: message.read_date,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonAdmin {
    pub id: i64,
    pub username: String,
    pub avatar_id: Option<String>,
    pub last_login_date: Timestamp,
}

impl From<Admin> for JsonAdmin {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.admin_id.0,
            username: admin.username,
            avatar_id: admin.avatar_id.map(|id| id.0),
            last_login_date: admin.last_login_date,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonNpcDetails {
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
    pub avatar_id: Option<String>,
}

impl From<NpcDetails> for JsonNpcDetails {
    fn from(details: NpcDetails) -> Self {
        Self {
            gender: details.gender,
            hide_gender: details.hide_gender,
            hometown: details.hometown,
            hide_hometown: details.hide_hometown,
            company: details.company,
            occupation: details.occupation,
            about_you: details.about_you,
            team_name: details.team_name,
            favorite_hobbies: details.favorite_hobbies,
            custom_hobbies: details.custom_hobbies,
            avatar_id: details.avatar_id.map(|id| id.0),
        }
    }
}

impl From<JsonNpcDetails> for NpcDetails {
    fn from(details: JsonNpcDetails) -> Self {
        Self {
            gender: details.gender,
            hide_gender: details.hide_gender,
            hometown: details.hometown,
            hide_hometown: details.hide_hometown,
            company: details.company,
            occupation: details.occupation,
            about_you: details.about_you,
            team_name: details.team_name,
            favorite_hobbies: details.favorite_hobbies,
            custom_hobbies: details.custom_hobbies,
            avatar_id: storage_id(details.avatar_id),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonNpc {
    pub id: i64,
    pub name: String,
    pub real_name: String,
    #[serde(flatten)]
    pub details: JsonNpcDetails,
}

impl From<Npc> for JsonNpc {
    fn from(npc: Npc) -> Self {
        Self {
            id: npc.npc_id.0,
            name: npc.name,
            real_name: npc.real_name,
            details: npc.details.into(),
        }
    }
}
