use mission_board_app::domain::{
    MessageId, RepoError, Timestamp,
    message::{Message, MessagePatch, MessageRepository, NewMessage, Priority},
};
use mission_board_persistence_sea_orm_entities::message;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait, prelude::Expr,
};

use crate::{FromDbErr, flatten_transaction};

pub struct MessageRepositoryImpl {
    db: DatabaseConnection,
}

impl MessageRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_message(model: message::Model) -> Message {
    let priority: Priority = model.priority.parse().unwrap_or_else(|e| {
        log::warn!("Message {}: {}, reading as medium", model.id, e);
        Priority::Medium
    });
    Message {
        message_id: MessageId(model.id),
        to: model.recipient,
        from: model.sender,
        subject: model.subject,
        body: model.body,
        send_date: model.send_date,
        priority,
        message_read: model.message_read,
        read_date: model.read_date,
    }
}

fn new_message_model(message: NewMessage) -> message::ActiveModel {
    message::ActiveModel {
        recipient: Set(message.to),
        sender: Set(message.from),
        subject: Set(message.subject),
        body: Set(message.body),
        send_date: Set(message.send_date),
        priority: Set(message.priority.as_str().to_string()),
        message_read: Set(message.message_read),
        read_date: Set(None),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryImpl {
    async fn list_messages(&self) -> Result<Vec<Message>, RepoError> {
        let models = message::Entity::find()
            .order_by_desc(message::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_message).collect())
    }

    async fn list_messages_for(&self, to: &str) -> Result<Vec<Message>, RepoError> {
        let models = message::Entity::find()
            .filter(message::Column::Recipient.eq(to))
            .order_by_desc(message::Column::SendDate)
            .order_by_desc(message::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_message).collect())
    }

    async fn get_message(&self, message_id: MessageId) -> Result<Option<Message>, RepoError> {
        let model = message::Entity::find_by_id(message_id.0)
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_message))
    }

    async fn create_message(&self, message: NewMessage) -> Result<MessageId, RepoError> {
        let res = message::Entity::insert(new_message_model(message))
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(MessageId(res.last_insert_id))
    }

    async fn update_message(
        &self,
        message_id: MessageId,
        patch: MessagePatch,
    ) -> Result<Option<Message>, RepoError> {
        let res = self
            .db
            .transaction::<_, Option<Message>, RepoError>(|txn| {
                Box::pin(async move {
                    let Some(model) = message::Entity::find_by_id(message_id.0)
                        .one(txn)
                        .await
                        .map_err(RepoError::from_db_err)?
                    else {
                        return Ok(None);
                    };

                    let mut message = model_to_message(model);
                    patch.apply(&mut message);
                    message::Entity::update(message::ActiveModel {
                        id: Set(message.message_id.0),
                        recipient: Set(message.to.clone()),
                        sender: Set(message.from.clone()),
                        subject: Set(message.subject.clone()),
                        body: Set(message.body.clone()),
                        send_date: Set(message.send_date),
                        priority: Set(message.priority.as_str().to_string()),
                        message_read: Set(message.message_read),
                        read_date: Set(message.read_date),
                    })
                    .exec(txn)
                    .await
                    .map_err(RepoError::from_db_err)?;
                    Ok(Some(message))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<bool, RepoError> {
        let res = message::Entity::delete_by_id(message_id.0)
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn mark_read(&self, message_id: MessageId, at: Timestamp) -> Result<bool, RepoError> {
        let res = message::Entity::update_many()
            .col_expr(message::Column::MessageRead, Expr::value(true))
            .col_expr(message::Column::ReadDate, Expr::value(at))
            .filter(message::Column::Id.eq(message_id.0))
            .filter(message::Column::MessageRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_messages_if_empty(
        &self,
        messages: Vec<NewMessage>,
    ) -> Result<usize, RepoError> {
        let res = self
            .db
            .transaction::<_, usize, RepoError>(|txn| {
                Box::pin(async move {
                    let existing = message::Entity::find()
                        .count(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    if existing > 0 || messages.is_empty() {
                        return Ok(0);
                    }
                    let count = messages.len();
                    message::Entity::insert_many(messages.into_iter().map(new_message_model))
                        .exec(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    Ok(count)
                })
            })
            .await;
        flatten_transaction(res)
    }
}
