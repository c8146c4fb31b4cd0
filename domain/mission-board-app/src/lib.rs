use std::sync::Arc;

use crate::{
    config::GameConfig,
    domain::{
        achievement::AchievementRepository, admin::AdminRepository, message::MessageRepository,
        mission::MissionRepository, npc::NpcRepository, player::PlayerRepository,
        team::TeamRepository,
    },
    ports::file_storage::FileStoragePort,
    workflow::{
        achievement::{
            grant::{GrantAchievementUseCase, GrantAchievementUseCaseImpl},
            query::{AchievementQueryUseCase, AchievementQueryUseCaseImpl},
        },
        admin::{
            login::{LoginAdminUseCase, LoginAdminUseCaseImpl},
            manage::{ManageAdminUseCase, ManageAdminUseCaseImpl},
            query::{AdminQueryUseCase, AdminQueryUseCaseImpl},
            seed::{SeedAdminsUseCase, SeedAdminsUseCaseImpl},
        },
        message::{
            manage::{ManageMessageUseCase, ManageMessageUseCaseImpl},
            query::{MessageQueryUseCase, MessageQueryUseCaseImpl},
            read::{MarkMessageReadUseCase, MarkMessageReadUseCaseImpl},
            seed::{SeedMessagesUseCase, SeedMessagesUseCaseImpl},
        },
        mission::{
            manage::{ManageMissionUseCase, ManageMissionUseCaseImpl},
            query::{MissionQueryUseCase, MissionQueryUseCaseImpl},
            seed::{SeedMissionsUseCase, SeedMissionsUseCaseImpl},
        },
        npc::manage::{ManageNpcUseCase, ManageNpcUseCaseImpl},
        player::{
            leaderboard::{LeaderboardUseCase, LeaderboardUseCaseImpl},
            login::{LoginPlayerUseCase, LoginPlayerUseCaseImpl},
            query::{PlayerQueryUseCase, PlayerQueryUseCaseImpl},
            register::{RegisterPlayerUseCase, RegisterPlayerUseCaseImpl},
            remove::{RemovePlayerUseCase, RemovePlayerUseCaseImpl},
            update::{UpdatePlayerUseCase, UpdatePlayerUseCaseImpl},
        },
    },
};

pub mod config;
pub mod domain;
pub mod ports;
pub mod workflow;

#[cfg(test)]
pub(crate) mod mock;

pub struct Application {
    pub player_register_use_case: Box<dyn RegisterPlayerUseCase + Send + Sync>,
    pub player_login_use_case: Box<dyn LoginPlayerUseCase + Send + Sync>,
    pub player_update_use_case: Box<dyn UpdatePlayerUseCase + Send + Sync>,
    pub player_query_use_case: Box<dyn PlayerQueryUseCase + Send + Sync>,
    pub player_remove_use_case: Box<dyn RemovePlayerUseCase + Send + Sync>,
    pub leaderboard_use_case: Box<dyn LeaderboardUseCase + Send + Sync>,

    pub achievement_grant_use_case: Box<dyn GrantAchievementUseCase + Send + Sync>,
    pub achievement_query_use_case: Box<dyn AchievementQueryUseCase + Send + Sync>,

    pub mission_query_use_case: Box<dyn MissionQueryUseCase + Send + Sync>,
    pub mission_manage_use_case: Box<dyn ManageMissionUseCase + Send + Sync>,
    pub mission_seed_use_case: Box<dyn SeedMissionsUseCase + Send + Sync>,

    pub message_query_use_case: Box<dyn MessageQueryUseCase + Send + Sync>,
    pub message_manage_use_case: Box<dyn ManageMessageUseCase + Send + Sync>,
    pub message_read_use_case: Box<dyn MarkMessageReadUseCase + Send + Sync>,
    pub message_seed_use_case: Box<dyn SeedMessagesUseCase + Send + Sync>,

    pub admin_query_use_case: Box<dyn AdminQueryUseCase + Send + Sync>,
    pub admin_login_use_case: Box<dyn LoginAdminUseCase + Send + Sync>,
    pub admin_manage_use_case: Box<dyn ManageAdminUseCase + Send + Sync>,
    pub admin_seed_use_case: Box<dyn SeedAdminsUseCase + Send + Sync>,

    pub npc_manage_use_case: Box<dyn ManageNpcUseCase + Send + Sync>,

    pub file_storage: Arc<dyn FileStoragePort + Send + Sync>,
}

pub fn build_application<
    PR: PlayerRepository + Send + Sync + 'static,
    TR: TeamRepository + Send + Sync + 'static,
    AR: AchievementRepository + Send + Sync + 'static,
    MR: MissionRepository + Send + Sync + 'static,
    GR: MessageRepository + Send + Sync + 'static,
    DR: AdminRepository + Send + Sync + 'static,
    NR: NpcRepository + Send + Sync + 'static,
    FS: FileStoragePort + Send + Sync + 'static,
>(
    config: GameConfig,
    player_repository: Arc<PR>,
    team_repository: Arc<TR>,
    achievement_repository: Arc<AR>,
    mission_repository: Arc<MR>,
    message_repository: Arc<GR>,
    admin_repository: Arc<DR>,
    npc_repository: Arc<NR>,
    file_storage: Arc<FS>,
) -> Application {
    Application {
        player_register_use_case: Box::new(RegisterPlayerUseCaseImpl::new(
            player_repository.clone(),
            config,
        )),
        player_login_use_case: Box::new(LoginPlayerUseCaseImpl::new(
            player_repository.clone(),
            config,
        )),
        player_update_use_case: Box::new(UpdatePlayerUseCaseImpl::new(
            player_repository.clone(),
            config,
        )),
        player_query_use_case: Box::new(PlayerQueryUseCaseImpl::new(
            player_repository.clone(),
            team_repository.clone(),
        )),
        player_remove_use_case: Box::new(RemovePlayerUseCaseImpl::new(player_repository.clone())),
        leaderboard_use_case: Box::new(LeaderboardUseCaseImpl::new(
            player_repository,
            team_repository,
        )),

        achievement_grant_use_case: Box::new(GrantAchievementUseCaseImpl::new(
            achievement_repository.clone(),
        )),
        achievement_query_use_case: Box::new(AchievementQueryUseCaseImpl::new(
            achievement_repository,
        )),

        mission_query_use_case: Box::new(MissionQueryUseCaseImpl::new(mission_repository.clone())),
        mission_manage_use_case: Box::new(ManageMissionUseCaseImpl::new(
            mission_repository.clone(),
        )),
        mission_seed_use_case: Box::new(SeedMissionsUseCaseImpl::new(mission_repository)),

        message_query_use_case: Box::new(MessageQueryUseCaseImpl::new(message_repository.clone())),
        message_manage_use_case: Box::new(ManageMessageUseCaseImpl::new(
            message_repository.clone(),
        )),
        message_read_use_case: Box::new(MarkMessageReadUseCaseImpl::new(
            message_repository.clone(),
        )),
        message_seed_use_case: Box::new(SeedMessagesUseCaseImpl::new(message_repository)),

        admin_query_use_case: Box::new(AdminQueryUseCaseImpl::new(admin_repository.clone())),
        admin_login_use_case: Box::new(LoginAdminUseCaseImpl::new(admin_repository.clone())),
        admin_manage_use_case: Box::new(ManageAdminUseCaseImpl::new(admin_repository.clone())),
        admin_seed_use_case: Box::new(SeedAdminsUseCaseImpl::new(admin_repository, config)),

        npc_manage_use_case: Box::new(ManageNpcUseCaseImpl::new(npc_repository)),

        file_storage,
    }
}
