use std::sync::Arc;

use crate::{
    domain::{
        MessageId,
        message::{Message, MessageRepository},
    },
    workflow::{QueryError, log_storage_error},
};

#[async_trait::async_trait]
pub trait MessageQueryUseCase {
    /// Every message, newest first.
    async fn get_messages(&self) -> Result<Vec<Message>, QueryError>;
    /// Messages addressed to exactly `to`, newest first. Broadcasts are only
    /// included when `to` is the broadcast recipient itself.
    async fn get_messages_by_recipient(&self, to: &str) -> Result<Vec<Message>, QueryError>;
    async fn get_message(&self, message_id: MessageId) -> Result<Option<Message>, QueryError>;
}

pub struct MessageQueryUseCaseImpl<MR: MessageRepository> {
    message_repository: Arc<MR>,
}

impl<MR: MessageRepository> MessageQueryUseCaseImpl<MR> {
    pub fn new(message_repository: Arc<MR>) -> Self {
        Self { message_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MessageRepository + Send + Sync + 'static> MessageQueryUseCase
    for MessageQueryUseCaseImpl<MR>
{
    async fn get_messages(&self) -> Result<Vec<Message>, QueryError> {
        self.message_repository.list_messages().await.map_err(|e| {
            log_storage_error("Failed to list messages", e);
            QueryError::RepositoryError
        })
    }

    async fn get_messages_by_recipient(&self, to: &str) -> Result<Vec<Message>, QueryError> {
        self.message_repository
            .list_messages_for(to)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to list messages for {}", to), e);
                QueryError::RepositoryError
            })
    }

    async fn get_message(&self, message_id: MessageId) -> Result<Option<Message>, QueryError> {
        self.message_repository
            .get_message(message_id)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to load message {}", message_id), e);
                QueryError::RepositoryError
            })
    }
}
