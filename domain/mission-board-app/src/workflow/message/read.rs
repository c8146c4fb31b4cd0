use std::sync::Arc;

use crate::{
    domain::{MessageId, message::MessageRepository, now_millis},
    workflow::log_storage_error,
};

#[async_trait::async_trait]
pub trait MarkMessageReadUseCase {
    /// Marks the message read. The read date is stamped on the first call
    /// only; repeated calls keep the first date.
    async fn mark_message_as_read(&self, message_id: MessageId) -> Result<(), MarkReadError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkReadError {
    #[error("Failed to mark message as read")]
    RepositoryError,
}

pub struct MarkMessageReadUseCaseImpl<MR: MessageRepository> {
    message_repository: Arc<MR>,
}

impl<MR: MessageRepository> MarkMessageReadUseCaseImpl<MR> {
    pub fn new(message_repository: Arc<MR>) -> Self {
        Self { message_repository }
    }
}

#[async_trait::async_trait]
impl<MR: MessageRepository + Send + Sync + 'static> MarkMessageReadUseCase
    for MarkMessageReadUseCaseImpl<MR>
{
    async fn mark_message_as_read(&self, message_id: MessageId) -> Result<(), MarkReadError> {
        match self
            .message_repository
            .mark_read(message_id, now_millis())
            .await
        {
            Ok(changed) => {
                if !changed {
                    log::debug!("Message {} already read or missing", message_id);
                }
                Ok(())
            }
            Err(e) => {
                log_storage_error(&format!("Failed to mark message {} read", message_id), e);
                Err(MarkReadError::RepositoryError)
            }
        }
    }
}
