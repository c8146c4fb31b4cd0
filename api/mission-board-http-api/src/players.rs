use axum::{Json, Router, extract::State, routing::post};
use mission_board_app::domain::{
    Clearable, PlayerId,
    player::{PlayerPatch, ProfilePatch},
};
use serde::Deserialize;

use crate::{
    ApiError, AppState,
    dto::{JsonPlayer, JsonProfilePatch, JsonTeam, clearable, clearable_storage_id, storage_id},
    storage,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/createPlayer", post(create_player))
        .route("/loginPlayer", post(login_player))
        .route("/updatePlayer", post(update_player))
        .route("/getPlayer", post(get_player))
        .route("/getAllPlayers", post(get_all_players))
        .route("/deletePlayer", post(delete_player))
        .route("/getPlayerLeaderboard", post(get_player_leaderboard))
        .route("/getTeamLeaderboard", post(get_team_leaderboard))
        .route("/getAllTeams", post(get_all_teams))
        .route("/generateUploadUrl", post(storage::generate_upload_url))
        .route("/getAvatarUrl", post(storage::get_avatar_url))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreatePlayer {
    name: String,
    password: String,
    team_name: String,
    avatar_id: Option<String>,
}

#[derive(Deserialize)]
pub struct JsonLogin {
    name: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayerRef {
    pub player_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdatePlayer {
    player_id: i64,
    name: Option<String>,
    password: Option<String>,
    #[serde(default, deserialize_with = "clearable")]
    avatar_id: Clearable<String>,
    #[serde(flatten)]
    profile: JsonProfilePatch,
}

async fn create_player(
    State(state): State<AppState>,
    Json(args): Json<JsonCreatePlayer>,
) -> Result<Json<i64>, ApiError> {
    let player_id = state
        .app
        .player_register_use_case
        .create_player(
            &args.name,
            &args.password,
            &args.team_name,
            storage_id(args.avatar_id),
        )
        .await?;
    Ok(Json(player_id.0))
}

async fn login_player(
    State(state): State<AppState>,
    Json(args): Json<JsonLogin>,
) -> Result<Json<JsonPlayer>, ApiError> {
    let player = state
        .app
        .player_login_use_case
        .login_player(&args.name, &args.password)
        .await?;
    Ok(Json(player.into()))
}

async fn update_player(
    State(state): State<AppState>,
    Json(args): Json<JsonUpdatePlayer>,
) -> Result<Json<Option<JsonPlayer>>, ApiError> {
    let patch = PlayerPatch {
        name: args.name,
        password: args.password,
        avatar_id: clearable_storage_id(args.avatar_id),
        profile: ProfilePatch::from(args.profile),
    };
    let player = state
        .app
        .player_update_use_case
        .update_player(PlayerId(args.player_id), patch)
        .await?;
    Ok(Json(player.map(JsonPlayer::from)))
}

async fn get_player(
    State(state): State<AppState>,
    Json(args): Json<JsonPlayerRef>,
) -> Result<Json<Option<JsonPlayer>>, ApiError> {
    let player = state
        .app
        .player_query_use_case
        .get_player(PlayerId(args.player_id))
        .await?;
    Ok(Json(player.map(JsonPlayer::from)))
}

async fn get_all_players(State(state): State<AppState>) -> Result<Json<Vec<JsonPlayer>>, ApiError> {
    let players = state.app.player_query_use_case.get_all_players().await?;
    Ok(Json(players.into_iter().map(JsonPlayer::from).collect()))
}

pub(crate) async fn delete_player(
    State(state): State<AppState>,
    Json(args): Json<JsonPlayerRef>,
) -> Result<Json<()>, ApiError> {
    state
        .app
        .player_remove_use_case
        .delete_player(PlayerId(args.player_id))
        .await?;
    Ok(Json(()))
}

async fn get_player_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonPlayer>>, ApiError> {
    let players = state.app.leaderboard_use_case.get_player_leaderboard().await?;
    Ok(Json(players.into_iter().map(JsonPlayer::from).collect()))
}

async fn get_team_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonTeam>>, ApiError> {
    let teams = state.app.leaderboard_use_case.get_team_leaderboard().await?;
    Ok(Json(teams.into_iter().map(JsonTeam::from).collect()))
}

async fn get_all_teams(State(state): State<AppState>) -> Result<Json<Vec<JsonTeam>>, ApiError> {
    let teams = state.app.player_query_use_case.get_all_teams().await?;
    Ok(Json(teams.into_iter().map(JsonTeam::from).collect()))
}
