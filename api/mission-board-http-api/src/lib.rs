use std::sync::Arc;

use axum::{Router, http::StatusCode, response::IntoResponse};
use log::info;
use mission_board_app::{
    Application,
    ports::file_storage::FileStorageError,
    workflow::{
        QueryError,
        achievement::grant::GrantAchievementError,
        admin::{login::LoginAdminError, manage::ManageAdminError, seed::SeedAdminsError},
        message::{manage::ManageMessageError, read::MarkReadError, seed::SeedMessagesError},
        mission::{manage::ManageMissionError, seed::SeedMissionsError},
        npc::manage::ManageNpcError,
        player::{
            login::LoginPlayerError, register::RegisterPlayerError, remove::RemovePlayerError,
            update::UpdatePlayerError,
        },
    },
};

mod achievements;
mod admin;
pub mod dto;
mod messages;
mod missions;
mod npcs;
mod players;
mod storage;

const DEFAULT_PORT: u16 = 3210;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

/// Every operation is `POST /api/{module}/{operation}` with a JSON argument
/// record as body.
pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .nest("/players", players::routes())
                .nest("/achievements", achievements::routes())
                .nest("/missions", missions::routes())
                .nest("/messages", messages::routes())
                .nest("/admin", admin::routes())
                .nest("/npcs", npcs::routes()),
        )
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let port = match std::env::var("MISSION_BOARD_HTTP_PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("MISSION_BOARD_HTTP_PORT must be a valid u16: {}", e),
            )
        })?,
        Err(_) => DEFAULT_PORT,
    };

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    info!("API server listening on port {}", port);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl ToString) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    fn internal(message: impl ToString) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, axum::Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::internal(e)
    }
}

impl From<RegisterPlayerError> for ApiError {
    fn from(e: RegisterPlayerError) -> Self {
        match e {
            RegisterPlayerError::DuplicateName => ApiError::new(StatusCode::CONFLICT, e),
            RegisterPlayerError::RepositoryError => ApiError::internal(e),
        }
    }
}

impl From<LoginPlayerError> for ApiError {
    fn from(e: LoginPlayerError) -> Self {
        match e {
            LoginPlayerError::InvalidCredentials => ApiError::new(StatusCode::UNAUTHORIZED, e),
            LoginPlayerError::RepositoryError => ApiError::internal(e),
        }
    }
}

impl From<UpdatePlayerError> for ApiError {
    fn from(e: UpdatePlayerError) -> Self {
        match e {
            UpdatePlayerError::DuplicateName => ApiError::new(StatusCode::CONFLICT, e),
            UpdatePlayerError::ProfileFieldsDisabled => ApiError::new(StatusCode::BAD_REQUEST, e),
            UpdatePlayerError::RepositoryError => ApiError::internal(e),
        }
    }
}

impl From<RemovePlayerError> for ApiError {
    fn from(e: RemovePlayerError) -> Self {
        ApiError::internal(e)
    }
}

impl From<GrantAchievementError> for ApiError {
    fn from(e: GrantAchievementError) -> Self {
        match e {
            GrantAchievementError::InvalidPoints => ApiError::new(StatusCode::BAD_REQUEST, e),
            GrantAchievementError::RepositoryError => ApiError::internal(e),
        }
    }
}

impl From<ManageMissionError> for ApiError {
    fn from(e: ManageMissionError) -> Self {
        ApiError::internal(e)
    }
}

impl From<SeedMissionsError> for ApiError {
    fn from(e: SeedMissionsError) -> Self {
        ApiError::internal(e)
    }
}

impl From<ManageMessageError> for ApiError {
    fn from(e: ManageMessageError) -> Self {
        ApiError::internal(e)
    }
}

impl From<MarkReadError> for ApiError {
    fn from(e: MarkReadError) -> Self {
        ApiError::internal(e)
    }
}

impl From<SeedMessagesError> for ApiError {
    fn from(e: SeedMessagesError) -> Self {
        ApiError::internal(e)
    }
}

impl From<LoginAdminError> for ApiError {
    fn from(e: LoginAdminError) -> Self {
        match e {
            LoginAdminError::InvalidCredentials => ApiError::new(StatusCode::UNAUTHORIZED, e),
            LoginAdminError::RepositoryError => ApiError::internal(e),
        }
    }
}

impl From<ManageAdminError> for ApiError {
    fn from(e: ManageAdminError) -> Self {
        match e {
            ManageAdminError::DuplicateUsername => ApiError::new(StatusCode::CONFLICT, e),
            ManageAdminError::RepositoryError => ApiError::internal(e),
        }
    }
}

impl From<SeedAdminsError> for ApiError {
    fn from(e: SeedAdminsError) -> Self {
        ApiError::internal(e)
    }
}

impl From<ManageNpcError> for ApiError {
    fn from(e: ManageNpcError) -> Self {
        ApiError::internal(e)
    }
}

impl From<FileStorageError> for ApiError {
    fn from(e: FileStorageError) -> Self {
        log::error!("File storage failure: {}", e);
        ApiError::internal(e)
    }
}
