pub mod achievement;
pub mod admin;
pub mod message;
pub mod mission;
pub mod npc;
pub mod player;

/// Failure of a read-only use case. Missing rows are not errors; reads return
/// `None` or an empty list instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    #[error("Failed to load data")]
    RepositoryError,
}

pub(crate) fn log_storage_error(context: &str, error: impl std::fmt::Display) {
    log::error!("{}: {}", context, error);
}
