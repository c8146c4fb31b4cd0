use std::sync::Arc;

use crate::{
    domain::mission::{MissionRepository, NewMission},
    workflow::log_storage_error,
};

/// The default mission catalogue, seeded into an empty database.
pub fn starter_missions() -> Vec<NewMission> {
    let mut missions = vec![
        NewMission::active(
            "Cyber Mission",
            "Complete cybersecurity challenges and protect digital assets from threats.",
            50,
        ),
        NewMission::active(
            "Avatar Mission",
            "Customize your avatar and express your unique identity in the digital realm.",
            25,
        ),
        NewMission::active(
            "PR Mission",
            "Build your public relations skills and create compelling content.",
            40,
        ),
        NewMission::active(
            "Blinky Mission",
            "Master the art of quick reflexes and lightning-fast decision making.",
            35,
        ),
        NewMission::active(
            "Distance Alarm Mission",
            "Monitor and manage remote systems with precision and accuracy.",
            45,
        ),
    ];
    missions.extend(expansion_missions());
    missions
}

/// Missions added after launch. Existing databases receive the ones they miss.
pub fn expansion_missions() -> Vec<NewMission> {
    vec![
        NewMission::active(
            "Face Shield Mission",
            "Deploy advanced facial recognition and protection systems to secure critical areas.",
            55,
        ),
        NewMission::active(
            "Cylon Mission",
            "Navigate through hostile robotic territories and disable enemy surveillance networks.",
            60,
        ),
        NewMission::active(
            "Web Mission",
            "Infiltrate complex web architectures and establish secure communication channels.",
            42,
        ),
        NewMission::active(
            "SOS Mission",
            "Respond to emergency distress signals and coordinate rescue operations across the galaxy.",
            48,
        ),
        NewMission::active(
            "Auto Dispenser Mission",
            "Optimize automated resource distribution systems for maximum efficiency and reliability.",
            38,
        ),
        NewMission::active(
            "Living Shield Mission",
            "Develop and maintain bio-integrated defense systems that adapt to evolving threats.",
            65,
        ),
    ]
}

#[async_trait::async_trait]
pub trait SeedMissionsUseCase {
    /// Seeds the starter catalogue unless any mission exists.
    async fn initialize_missions(&self) -> Result<(), SeedMissionsError>;
    /// Inserts the expansion missions whose names are not present yet.
    async fn add_new_missions(&self) -> Result<(), SeedMissionsError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SeedMissionsError {
    #[error("Failed to seed missions")]
    RepositoryError,
}

pub struct SeedMissionsUseCaseImpl<MR: MissionRepository> {
    mission_repository: Arc<MR>,
}

impl<MR: MissionRepository> SeedMissionsUseCaseImpl<MR> {
    pub fn new(mission_repository: Arc<MR>) -> Self {
        Self { mission_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MissionRepository + Send + Sync + 'static> SeedMissionsUseCase
    for SeedMissionsUseCaseImpl<MR>
{
    async fn initialize_missions(&self) -> Result<(), SeedMissionsError> {
        match self
            .mission_repository
            .insert_missions_if_empty(starter_missions())
            .await
        {
            Ok(0) => {
                log::debug!("Missions already initialized");
                Ok(())
            }
            Ok(count) => {
                log::info!("Seeded {} starter missions", count);
                Ok(())
            }
            Err(e) => {
                log_storage_error("Failed to initialize missions", e);
                Err(SeedMissionsError::RepositoryError)
            }
        }
    }

    async fn add_new_missions(&self) -> Result<(), SeedMissionsError> {
        match self
            .mission_repository
            .insert_missing_missions(expansion_missions())
            .await
        {
            Ok(count) => {
                log::info!("Added {} new missions", count);
                Ok(())
            }
            Err(e) => {
                log_storage_error("Failed to add new missions", e);
                Err(SeedMissionsError::RepositoryError)
            }
        }
    }
}
