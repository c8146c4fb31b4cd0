use std::sync::Arc;

use crate::{
    domain::{
        MessageId,
        message::{Message, MessagePatch, MessageRepository, NewMessage, Priority},
        now_millis,
    },
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait ManageMessageUseCase {
    /// Sends a new unread message stamped with the current time.
    async fn create_message(
        &self,
        to: &str,
        from: &str,
        subject: &str,
        body: &str,
        priority: Priority,
    ) -> Result<MessageId, ManageMessageError>;
    async fn update_message(
        &self,
        message_id: MessageId,
        patch: MessagePatch,
    ) -> Result<Option<Message>, ManageMessageError>;
    async fn delete_message(&self, message_id: MessageId) -> Result<(), ManageMessageError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ManageMessageError {
    #[error("Failed to save message")]
    RepositoryError,
}

pub struct ManageMessageUseCaseImpl<MR: MessageRepository> {
    message_repository: Arc<MR>,
}

impl<MR: MessageRepository> ManageMessageUseCaseImpl<MR> {
    pub fn new(message_repository: Arc<MR>) -> Self {
        Self { message_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MessageRepository + Send + Sync + 'static> ManageMessageUseCase
    for ManageMessageUseCaseImpl<MR>
{
    async fn create_message(
        &self,
        to: &str,
        from: &str,
        subject: &str,
        body: &str,
        priority: Priority,
    ) -> Result<MessageId, ManageMessageError> {
        let message = NewMessage {
            to: to.to_string(),
            from: from.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            send_date: now_millis(),
            priority,
            message_read: false,
        };
        match self.message_repository.create_message(message).await {
            Ok(message_id) => {
                log::info!("Message {} sent from {} to {}", message_id, from, to);
                Ok(message_id)
            }
            Err(e) => {
                log_storage_error(&format!("Failed to send message to {}", to), e);
                Err(ManageMessageError::RepositoryError)
            }
        }
    }

    async fn update_message(
        &self,
        message_id: MessageId,
        patch: MessagePatch,
    ) -> Result<Option<Message>, ManageMessageError> {
        self.message_repository
            .update_message(message_id, patch)
            .await
            .map_err(|e| {
                log_storage_error(&format!("Failed to update message {}", message_id), e);
                ManageMessageError::RepositoryError
            })
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), ManageMessageError> {
        match self.message_repository.delete_message(message_id).await {
            Ok(deleted) => {
                if deleted {
                    log::info!("Deleted message {}", message_id);
                }
                Ok(())
            }
            Err(e) => {
                log_storage_error(&format!("Failed to delete message {}", message_id), e);
                Err(ManageMessageError::RepositoryError)
            }
        }
    }
}
