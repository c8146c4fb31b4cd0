use axum::{Json, Router, extract::State, routing::post};
use mission_board_app::domain::{AdminId, Clearable, admin::AdminPatch};
use serde::Deserialize;

use crate::{
    ApiError, AppState,
    dto::{JsonAdmin, clearable, clearable_storage_id, storage_id},
    missions, players, storage,
};

/// Admin console. Mission and player management reuse the handlers of the
/// owning modules.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getAdmin", post(get_admin))
        .route("/getAllAdmins", post(get_all_admins))
        .route("/loginAdmin", post(login_admin))
        .route("/createAdmin", post(create_admin))
        .route("/updateAdmin", post(update_admin))
        .route("/deleteAdmin", post(delete_admin))
        .route("/initializeAdmins", post(initialize_admins))
        .route("/createMission", post(missions::create_mission))
        .route("/updateMission", post(missions::update_mission))
        .route("/deletePlayer", post(players::delete_player))
        .route("/generateUploadUrl", post(storage::generate_upload_url))
        .route("/getAvatarUrl", post(storage::get_avatar_url))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAdminRef {
    admin_id: i64,
}

#[derive(Deserialize)]
pub struct JsonAdminLogin {
    username: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreateAdmin {
    username: String,
    password: String,
    avatar_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdateAdmin {
    admin_id: i64,
    username: Option<String>,
    password: Option<String>,
    #[serde(default, deserialize_with = "clearable")]
    avatar_id: Clearable<String>,
}

async fn get_admin(
    State(state): State<AppState>,
    Json(args): Json<JsonAdminRef>,
) -> Result<Json<Option<JsonAdmin>>, ApiError> {
    let admin = state
        .app
        .admin_query_use_case
        .get_admin(AdminId(args.admin_id))
        .await?;
    Ok(Json(admin.map(JsonAdmin::from)))
}

async fn get_all_admins(State(state): State<AppState>) -> Result<Json<Vec<JsonAdmin>>, ApiError> {
    let admins = state.app.admin_query_use_case.get_all_admins().await?;
    Ok(Json(admins.into_iter().map(JsonAdmin::from).collect()))
}

async fn login_admin(
    State(state): State<AppState>,
    Json(args): Json<JsonAdminLogin>,
) -> Result<Json<i64>, ApiError> {
    let admin_id = state
        .app
        .admin_login_use_case
        .login_admin(&args.username, &args.password)
        .await?;
    Ok(Json(admin_id.0))
}

async fn create_admin(
    State(state): State<AppState>,
    Json(args): Json<JsonCreateAdmin>,
) -> Result<Json<i64>, ApiError> {
    let admin_id = state
        .app
        .admin_manage_use_case
        .create_admin(&args.username, &args.password, storage_id(args.avatar_id))
        .await?;
    Ok(Json(admin_id.0))
}

async fn update_admin(
    State(state): State<AppState>,
    Json(args): Json<JsonUpdateAdmin>,
) -> Result<Json<Option<JsonAdmin>>, ApiError> {
    let patch = AdminPatch {
        username: args.username,
        password: args.password,
        avatar_id: clearable_storage_id(args.avatar_id),
    };
    let admin = state
        .app
        .admin_manage_use_case
        .update_admin(AdminId(args.admin_id), patch)
        .await?;
    Ok(Json(admin.map(JsonAdmin::from)))
}

async fn delete_admin(
    State(state): State<AppState>,
    Json(args): Json<JsonAdminRef>,
) -> Result<Json<()>, ApiError> {
    state
        .app
        .admin_manage_use_case
        .delete_admin(AdminId(args.admin_id))
        .await?;
    Ok(Json(()))
}

async fn initialize_admins(State(state): State<AppState>) -> Result<Json<()>, ApiError> {
    state.app.admin_seed_use_case.initialize_admins().await?;
    Ok(Json(()))
}
