use axum::{Json, Router, extract::State, routing::post};
use mission_board_app::domain::{MissionId, PlayerId};
use serde::Deserialize;

use crate::{ApiError, AppState, dto::JsonAchievement, players::JsonPlayerRef};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getPlayerAchievements", post(get_player_achievements))
        .route("/addAchievement", post(add_achievement))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAddAchievement {
    player_id: i64,
    label: String,
    points: i64,
    mission_id: Option<i64>,
}

async fn get_player_achievements(
    State(state): State<AppState>,
    Json(args): Json<JsonPlayerRef>,
) -> Result<Json<Vec<JsonAchievement>>, ApiError> {
    let achievements = state
        .app
        .achievement_query_use_case
        .get_player_achievements(PlayerId(args.player_id))
        .await?;
    Ok(Json(
        achievements.into_iter().map(JsonAchievement::from).collect(),
    ))
}

async fn add_achievement(
    State(state): State<AppState>,
    Json(args): Json<JsonAddAchievement>,
) -> Result<Json<i64>, ApiError> {
    let player_id = state
        .app
        .achievement_grant_use_case
        .add_achievement(
            PlayerId(args.player_id),
            &args.label,
            args.points,
            args.mission_id.map(MissionId),
        )
        .await?;
    Ok(Json(player_id.0))
}
