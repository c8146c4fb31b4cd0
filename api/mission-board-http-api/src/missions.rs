use axum::{Json, Router, extract::State, routing::post};
use mission_board_app::domain::{
    MissionId,
    mission::{MissionPatch, NewMission},
};
use serde::Deserialize;

use crate::{ApiError, AppState, dto::JsonMission};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getMissions", post(get_missions))
        .route("/getMission", post(get_mission))
        .route("/createMission", post(create_mission))
        .route("/updateMission", post(update_mission))
        .route("/initializeMissions", post(initialize_missions))
        .route("/addNewMissions", post(add_new_missions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMissionRef {
    mission_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreateMission {
    name: String,
    description: String,
    points: i64,
    is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdateMission {
    mission_id: i64,
    name: Option<String>,
    description: Option<String>,
    points: Option<i64>,
    is_active: Option<bool>,
}

async fn get_missions(State(state): State<AppState>) -> Result<Json<Vec<JsonMission>>, ApiError> {
    let missions = state.app.mission_query_use_case.get_missions().await?;
    Ok(Json(missions.into_iter().map(JsonMission::from).collect()))
}

async fn get_mission(
    State(state): State<AppState>,
    Json(args): Json<JsonMissionRef>,
) -> Result<Json<Option<JsonMission>>, ApiError> {
    let mission = state
        .app
        .mission_query_use_case
        .get_mission(MissionId(args.mission_id))
        .await?;
    Ok(Json(mission.map(JsonMission::from)))
}

pub(crate) async fn create_mission(
    State(state): State<AppState>,
    Json(args): Json<JsonCreateMission>,
) -> Result<Json<i64>, ApiError> {
    let mission_id = state
        .app
        .mission_manage_use_case
        .create_mission(NewMission {
            name: args.name,
            description: args.description,
            points: args.points,
            is_active: args.is_active,
        })
        .await?;
    Ok(Json(mission_id.0))
}

pub(crate) async fn update_mission(
    State(state): State<AppState>,
    Json(args): Json<JsonUpdateMission>,
) -> Result<Json<Option<JsonMission>>, ApiError> {
    let patch = MissionPatch {
        name: args.name,
        description: args.description,
        points: args.points,
        is_active: args.is_active,
    };
    let mission = state
        .app
        .mission_manage_use_case
        .update_mission(MissionId(args.mission_id), patch)
        .await?;
    Ok(Json(mission.map(JsonMission::from)))
}

async fn initialize_missions(State(state): State<AppState>) -> Result<Json<()>, ApiError> {
    state.app.mission_seed_use_case.initialize_missions().await?;
    Ok(Json(()))
}

async fn add_new_missions(State(state): State<AppState>) -> Result<Json<()>, ApiError> {
    state.app.mission_seed_use_case.add_new_missions().await?;
    Ok(Json(()))
}
