use axum::{Json, Router, extract::State, routing::post};
use mission_board_app::domain::{
    Clearable, MessageId, Timestamp,
    message::{MessagePatch, Priority},
};
use serde::Deserialize;

use crate::{
    ApiError, AppState,
    dto::{JsonMessage, JsonPriority, clearable},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getMessages", post(get_messages))
        .route("/getMessagesByRecipient", post(get_messages_by_recipient))
        .route("/getMessage", post(get_message))
        .route("/createMessage", post(create_message))
        .route("/updateMessage", post(update_message))
        .route("/deleteMessage", post(delete_message))
        .route("/markMessageAsRead", post(mark_message_as_read))
        .route("/initializeMessages", post(initialize_messages))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessageRef {
    message_id: i64,
}

#[derive(Deserialize)]
pub struct JsonRecipient {
    to: String,
}

#[derive(Deserialize)]
pub struct JsonCreateMessage {
    to: String,
    from: String,
    subject: String,
    body: String,
    priority: JsonPriority,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdateMessage {
    message_id: i64,
    to: Option<String>,
    from: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    priority: Option<JsonPriority>,
    message_read: Option<bool>,
    #[serde(default, deserialize_with = "clearable")]
    read_date: Clearable<Timestamp>,
}

async fn get_messages(State(state): State<AppState>) -> Result<Json<Vec<JsonMessage>>, ApiError> {
    let messages = state.app.message_query_use_case.get_messages().await?;
    Ok(Json(messages.into_iter().map(JsonMessage::from).collect()))
}

async fn get_messages_by_recipient(
    State(state): State<AppState>,
    Json(args): Json<JsonRecipient>,
) -> Result<Json<Vec<JsonMessage>>, ApiError> {
    let messages = state
        .app
        .message_query_use_case
        .get_messages_by_recipient(&args.to)
        .await?;
    Ok(Json(messages.into_iter().map(JsonMessage::from).collect()))
}

async fn get_message(
    State(state): State<AppState>,
    Json(args): Json<JsonMessageRef>,
) -> Result<Json<Option<JsonMessage>>, ApiError> {
    let message = state
        .app
        .message_query_use_case
        .get_message(MessageId(args.message_id))
        .await?;
    Ok(Json(message.map(JsonMessage::from)))
}

async fn create_message(
    State(state): State<AppState>,
    Json(args): Json<JsonCreateMessage>,
) -> Result<Json<i64>, ApiError> {
    let message_id = state
        .app
        .message_manage_use_case
        .create_message(
            &args.to,
            &args.from,
            &args.subject,
            &args.body,
            Priority::from(args.priority),
        )
        .await?;
    Ok(Json(message_id.0))
}

async fn update_message(
    State(state): State<AppState>,
    Json(args): Json<JsonUpdateMessage>,
) -> Result<Json<Option<JsonMessage>>, ApiError> {
    let patch = MessagePatch {
        to: args.to,
        from: args.from,
        subject: args.subject,
        body: args.body,
        priority: args.priority.map(Priority::from),
        message_read: args.message_read,
        read_date: args.read_date,
    };
    let message = state
        .app
        .message_manage_use_case
        .update_message(MessageId(args.message_id), patch)
        .await?;
    Ok(Json(message.map(JsonMessage::from)))
}

async fn delete_message(
    State(state): State<AppState>,
    Json(args): Json<JsonMessageRef>,
) -> Result<Json<()>, ApiError> {
    state
        .app
        .message_manage_use_case
        .delete_message(MessageId(args.message_id))
        .await?;
    Ok(Json(()))
}

async fn mark_message_as_read(
    State(state): State<AppState>,
    Json(args): Json<JsonMessageRef>,
) -> Result<Json<()>, ApiError> {
    state
        .app
        .message_read_use_case
        .mark_message_as_read(MessageId(args.message_id))
        .await?;
    Ok(Json(()))
}

async fn initialize_messages(State(state): State<AppState>) -> Result<Json<()>, ApiError> {
    state.app.message_seed_use_case.initialize_messages().await?;
    Ok(Json(()))
}
