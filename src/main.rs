use std::sync::Arc;

use log::{error, info, warn};
use mission_board_app::{Application, build_application, config::GameConfig};
use mission_board_file_storage::LocalFileStorageAdapter;
use mission_board_persistence_sea_orm::{
    achievements::AchievementRepositoryImpl, admins::AdminRepositoryImpl, create_db_pool,
    create_schema, messages::MessageRepositoryImpl, missions::MissionRepositoryImpl,
    npcs::NpcRepositoryImpl, players::PlayerRepositoryImpl, teams::TeamRepositoryImpl,
};

mod logs;

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                warn!("{} has unrecognized value {:?}, using {}", key, other, default);
                default
            }
        },
        Err(_) => default,
    }
}

fn game_config_from_env() -> GameConfig {
    let defaults = GameConfig::default();
    GameConfig {
        award_signup_bonus: env_flag("AWARD_SIGNUP_BONUS", defaults.award_signup_bonus),
        extended_profile_fields: env_flag(
            "EXTENDED_PROFILE_FIELDS",
            defaults.extended_profile_fields,
        ),
        record_player_logins: env_flag("RECORD_PLAYER_LOGINS", defaults.record_player_logins),
        seed_default_admin: env_flag("SEED_DEFAULT_ADMIN", defaults.seed_default_admin),
    }
}

/// Seed failures are logged and do not stop startup.
async fn seed_reference_data(app: &Application) {
    if let Err(e) = app.mission_seed_use_case.initialize_missions().await {
        error!("Mission seeding failed: {}", e);
    }
    if let Err(e) = app.mission_seed_use_case.add_new_missions().await {
        error!("Adding new missions failed: {}", e);
    }
    if let Err(e) = app.message_seed_use_case.initialize_messages().await {
        error!("Message seeding failed: {}", e);
    }
    if let Err(e) = app.admin_seed_use_case.initialize_admins().await {
        error!("Admin seeding failed: {}", e);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    if let Err(e) = logs::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = dotenv_result {
        warn!("No .env file loaded: {}", e);
    }

    let config = game_config_from_env();
    info!("Starting with {:?}", config);

    let db = match create_db_pool().await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = create_schema(&db).await {
        error!("Failed to create database schema: {}", e);
        std::process::exit(1);
    }

    let app = Arc::new(build_application(
        config,
        Arc::new(PlayerRepositoryImpl::new(db.clone())),
        Arc::new(TeamRepositoryImpl::new(db.clone())),
        Arc::new(AchievementRepositoryImpl::new(db.clone())),
        Arc::new(MissionRepositoryImpl::new(db.clone())),
        Arc::new(MessageRepositoryImpl::new(db.clone())),
        Arc::new(AdminRepositoryImpl::new(db.clone())),
        Arc::new(NpcRepositoryImpl::new(db)),
        Arc::new(LocalFileStorageAdapter::from_env()),
    ));

    seed_reference_data(&app).await;

    info!("Starting application");

    if let Err(e) = mission_board_http_api::run(app, shutdown_signal()).await {
        error!("HTTP API failed: {}", e);
        std::process::exit(1);
    }
}
