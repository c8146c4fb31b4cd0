pub mod achievement;
pub mod admin;
pub mod credentials;
pub mod leaderboard;
pub mod message;
pub mod mission;
pub mod npc;
pub mod player;
pub mod team;

macro_rules! row_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(PlayerId);
row_id!(TeamId);
row_id!(MissionId);
row_id!(AchievementId);
row_id!(MessageId);
row_id!(AdminId);
row_id!(NpcId);

/// Opaque reference to a blob held by the file storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageId(pub String);

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the unix epoch.
pub type Timestamp = i64;

pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug)]
pub enum RepoError {
    StorageError(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for RepoError {}

#[derive(Debug)]
pub enum RepoCreateError {
    Conflict,
    StorageError(String),
}

impl std::fmt::Display for RepoCreateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoCreateError::Conflict => write!(f, "Resource conflict"),
            RepoCreateError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for RepoCreateError {}

#[derive(Debug)]
pub enum RepoUpdateError {
    Conflict,
    StorageError(String),
}

impl std::fmt::Display for RepoUpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoUpdateError::Conflict => write!(f, "Resource conflict"),
            RepoUpdateError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for RepoUpdateError {}

/// Field update for a nullable column: `None` leaves the column untouched,
/// `Some(None)` clears it and `Some(Some(v))` overwrites it.
pub type Clearable<T> = Option<Option<T>>;
