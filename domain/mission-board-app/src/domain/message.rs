use crate::domain::{MessageId, RepoError, Timestamp};

/// Recipient that addresses every player.
pub const BROADCAST_RECIPIENT: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub message_id: MessageId,
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub send_date: Timestamp,
    pub priority: Priority,
    pub message_read: bool,
    pub read_date: Option<Timestamp>,
}

impl Message {
    pub fn is_broadcast(&self) -> bool {
        self.to == BROADCAST_RECIPIENT
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub send_date: Timestamp,
    pub priority: Priority,
    pub message_read: bool,
}

#[derive(Clone, Debug, Default)]
pub struct MessagePatch {
    pub to: Option<String>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub priority: Option<Priority>,
    pub message_read: Option<bool>,
    pub read_date: Option<Option<Timestamp>>,
}

impl MessagePatch {
    pub fn apply(self, message: &mut Message) {
        if let Some(to) = self.to {
            message.to = to;
        }
        if let Some(from) = self.from {
            message.from = from;
        }
        if let Some(subject) = self.subject {
            message.subject = subject;
        }
        if let Some(body) = self.body {
            message.body = body;
        }
        if let Some(priority) = self.priority {
            message.priority = priority;
        }
        if let Some(message_read) = self.message_read {
            message.message_read = message_read;
        }
        if let Some(read_date) = self.read_date {
            message.read_date = read_date;
        }
    }
}

#[async_trait::async_trait]
pub trait MessageRepository {
    /// All messages, newest first.
    async fn list_messages(&self) -> Result<Vec<Message>, RepoError>;
    /// Messages addressed to `to`, newest `send_date` first.
    async fn list_messages_for(&self, to: &str) -> Result<Vec<Message>, RepoError>;
    async fn get_message(&self, message_id: MessageId) -> Result<Option<Message>, RepoError>;
    async fn create_message(&self, message: NewMessage) -> Result<MessageId, RepoError>;
    async fn update_message(
        &self,
        message_id: MessageId,
        patch: MessagePatch,
    ) -> Result<Option<Message>, RepoError>;
    async fn delete_message(&self, message_id: MessageId) -> Result<bool, RepoError>;
    /// Marks the message read and stamps `at` as its read date, but only if it
    /// is currently unread. Returns whether a row changed.
    async fn mark_read(&self, message_id: MessageId, at: Timestamp) -> Result<bool, RepoError>;
    async fn insert_messages_if_empty(&self, messages: Vec<NewMessage>)
    -> Result<usize, RepoError>;
}
