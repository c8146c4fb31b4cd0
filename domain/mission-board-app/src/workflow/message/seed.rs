use std::sync::Arc;

use crate::{
    domain::{
        Timestamp,
        message::{BROADCAST_RECIPIENT, MessageRepository, NewMessage, Priority},
        now_millis,
    },
    workflow::log_storage_error,
};

const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// Sample broadcasts dated relative to `now`, oldest first.
pub fn sample_messages(now: Timestamp) -> Vec<NewMessage> {
    let broadcast = |from: &str, subject: &str, body: &str, age: i64, priority| NewMessage {
        to: BROADCAST_RECIPIENT.to_string(),
        from: from.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        send_date: now - age,
        priority,
        message_read: false,
    };
    vec![
        broadcast(
            "System",
            "Welcome to the Space Dashboard",
            "Welcome to your new space mission dashboard! Check out the available missions and start earning points.",
            24 * HOUR_MILLIS,
            Priority::Medium,
        ),
        broadcast(
            "Mission Control",
            "New Missions Available",
            "Several new high-priority missions have been added to the system. Check the mission list for details.",
            12 * HOUR_MILLIS,
            Priority::High,
        ),
        broadcast(
            "Admin",
            "System Maintenance Notice",
            "Scheduled maintenance will occur this weekend. All missions will remain active during this time.",
            6 * HOUR_MILLIS,
            Priority::Low,
        ),
    ]
}

#[async_trait::async_trait]
pub trait SeedMessagesUseCase {
    /// Inserts the sample broadcasts unless any message exists.
    async fn initialize_messages(&self) -> Result<(), SeedMessagesError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SeedMessagesError {
    #[error("Failed to seed messages")]
    RepositoryError,
}

pub struct SeedMessagesUseCaseImpl<MR: MessageRepository> {
    message_repository: Arc<MR>,
}

impl<MR: MessageRepository> SeedMessagesUseCaseImpl<MR> {
    pub fn new(message_repository: Arc<MR>) -> Self {
        Self { message_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MessageRepository + Send + Sync + 'static> SeedMessagesUseCase
    for SeedMessagesUseCaseImpl<MR>
{
    async fn initialize_messages(&self) -> Result<(), SeedMessagesError> {
        match self
            .message_repository
            .insert_messages_if_empty(sample_messages(now_millis()))
            .await
        {
            Ok(0) => {
                log::debug!("Messages already initialized");
                Ok(())
            }
            Ok(count) => {
                log::info!("Seeded {} sample messages", count);
                Ok(())
            }
            Err(e) => {
                log_storage_error("Failed to initialize messages", e);
                Err(SeedMessagesError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;

    #[test]
    fn samples_are_relative_to_now() {
        let samples = sample_messages(100 * HOUR_MILLIS);
        let dates: Vec<i64> = samples.iter().map(|m| m.send_date).collect();
        assert_eq!(
            dates,
            vec![76 * HOUR_MILLIS, 88 * HOUR_MILLIS, 94 * HOUR_MILLIS]
        );
        assert!(samples.iter().all(|m| m.to == BROADCAST_RECIPIENT));
        assert!(samples.iter().all(|m| !m.message_read));
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let store = Arc::new(MockStore::default());
        let seed = SeedMessagesUseCaseImpl::new(store.clone());

        seed.initialize_messages().await.unwrap();
        seed.initialize_messages().await.unwrap();

        let messages = store.list_messages().await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].subject, "System Maintenance Notice");
    }
}
