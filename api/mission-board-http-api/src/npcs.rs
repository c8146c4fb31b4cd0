use axum::{Json, Router, extract::State, routing::post};
use mission_board_app::domain::{
    Clearable, NpcId,
    npc::{NewNpc, NpcPatch},
};
use serde::Deserialize;

use crate::{
    ApiError, AppState,
    dto::{JsonNpc, JsonNpcDetails, clearable, clearable_storage_id},
    storage,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getAllNpcs", post(get_all_npcs))
        .route("/getNpc", post(get_npc))
        .route("/createNpc", post(create_npc))
        .route("/updateNpc", post(update_npc))
        .route("/deleteNpc", post(delete_npc))
        .route("/generateUploadUrl", post(storage::generate_upload_url))
        .route("/getAvatarUrl", post(storage::get_avatar_url))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonNpcRef {
    npc_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreateNpc {
    name: String,
    real_name: String,
    #[serde(flatten)]
    details: JsonNpcDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdateNpc {
    npc_id: i64,
    name: Option<String>,
    real_name: Option<String>,
    #[serde(default, deserialize_with = "clearable")]
    gender: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    hide_gender: Clearable<bool>,
    #[serde(default, deserialize_with = "clearable")]
    hometown: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    hide_hometown: Clearable<bool>,
    #[serde(default, deserialize_with = "clearable")]
    company: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    occupation: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    about_you: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    team_name: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    favorite_hobbies: Clearable<Vec<String>>,
    #[serde(default, deserialize_with = "clearable")]
    custom_hobbies: Clearable<String>,
    #[serde(default, deserialize_with = "clearable")]
    avatar_id: Clearable<String>,
}

impl From<JsonUpdateNpc> for NpcPatch {
    fn from(args: JsonUpdateNpc) -> Self {
        NpcPatch {
            name: args.name,
            real_name: args.real_name,
            gender: args.gender,
            hide_gender: args.hide_gender,
            hometown: args.hometown,
            hide_hometown: args.hide_hometown,
            company: args.company,
            occupation: args.occupation,
            about_you: args.about_you,
            team_name: args.team_name,
            favorite_hobbies: args.favorite_hobbies,
            custom_hobbies: args.custom_hobbies,
            avatar_id: clearable_storage_id(args.avatar_id),
        }
    }
}

async fn get_all_npcs(State(state): State<AppState>) -> Result<Json<Vec<JsonNpc>>, ApiError> {
    let npcs = state.app.npc_manage_use_case.get_all_npcs().await?;
    Ok(Json(npcs.into_iter().map(JsonNpc::from).collect()))
}

async fn get_npc(
    State(state): State<AppState>,
    Json(args): Json<JsonNpcRef>,
) -> Result<Json<Option<JsonNpc>>, ApiError> {
    let npc = state
        .app
        .npc_manage_use_case
        .get_npc(NpcId(args.npc_id))
        .await?;
    Ok(Json(npc.map(JsonNpc::from)))
}

async fn create_npc(
    State(state): State<AppState>,
    Json(args): Json<JsonCreateNpc>,
) -> Result<Json<i64>, ApiError> {
    let npc_id = state
        .app
        .npc_manage_use_case
        .create_npc(NewNpc {
            name: args.name,
            real_name: args.real_name,
            details: args.details.into(),
        })
        .await?;
    Ok(Json(npc_id.0))
}

async fn update_npc(
    State(state): State<AppState>,
    Json(args): Json<JsonUpdateNpc>,
) -> Result<Json<Option<JsonNpc>>, ApiError> {
    let npc_id = NpcId(args.npc_id);
    let npc = state
        .app
        .npc_manage_use_case
        .update_npc(npc_id, args.into())
        .await?;
    Ok(Json(npc.map(JsonNpc::from)))
}

async fn delete_npc(
    State(state): State<AppState>,
    Json(args): Json<JsonNpcRef>,
) -> Result<Json<()>, ApiError> {
    state
        .app
        .npc_manage_use_case
        .delete_npc(NpcId(args.npc_id))
        .await?;
    Ok(Json(()))
}
