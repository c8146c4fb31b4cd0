use std::time::Duration;

use async_lock::OnceCell;
use mission_board_app::domain::{RepoCreateError, RepoError, RepoUpdateError, StorageId};
use mission_board_persistence_sea_orm_entities::{
    achievement, admin, message, mission, npc, player, team,
};
use sea_orm::{
    ActiveValue, ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection,
    DbErr, EntityName, EntityTrait, Schema, SqlErr, TransactionError, Value,
};

pub mod achievements;
pub mod admins;
pub mod messages;
pub mod missions;
pub mod npcs;
pub mod players;
pub mod teams;

const DEFAULT_DATABASE_URL: &str = "sqlite://mission_board.db?mode=rwc";

const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

/// Shared connection pool for `DATABASE_URL`, opened on first use.
pub async fn create_db_pool() -> Result<DatabaseConnection, DbErr> {
    DB_POOL
        .get_or_try_init(|| async move {
            let db_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
                log::warn!(
                    "DATABASE_URL not set, falling back to {}",
                    DEFAULT_DATABASE_URL
                );
                DEFAULT_DATABASE_URL.to_string()
            });
            connect(&db_url).await
        })
        .await
        .cloned()
}

/// SQLite admits one writer, and a transaction that reads before it writes
/// fails with SQLITE_BUSY instead of waiting when another connection holds
/// the write lock. All statements therefore share a single connection and
/// concurrent callers queue on the pool.
pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(1)
        .min_connections(1)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT);

    Database::connect(opt).await
}

/// Creates every table and index that does not exist yet.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_entity_schema(db, player::Entity).await?;
    create_entity_schema(db, team::Entity).await?;
    create_entity_schema(db, mission::Entity).await?;
    create_entity_schema(db, achievement::Entity).await?;
    create_entity_schema(db, message::Entity).await?;
    create_entity_schema(db, admin::Entity).await?;
    create_entity_schema(db, npc::Entity).await?;
    Ok(())
}

async fn create_entity_schema<E: EntityTrait>(
    db: &DatabaseConnection,
    entity: E,
) -> Result<(), DbErr> {
    let schema = Schema::new(DatabaseBackend::Sqlite);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(&table).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(&index).await?;
    }
    log::debug!("Ensured table {}", entity.table_name());
    Ok(())
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Conversion of database failures into the repository error of a port.
pub(crate) trait FromDbErr {
    fn from_db_err(e: DbErr) -> Self;
}

impl FromDbErr for RepoError {
    fn from_db_err(e: DbErr) -> Self {
        RepoError::StorageError(e.to_string())
    }
}

impl FromDbErr for RepoCreateError {
    fn from_db_err(e: DbErr) -> Self {
        if is_unique_violation(&e) {
            RepoCreateError::Conflict
        } else {
            RepoCreateError::StorageError(e.to_string())
        }
    }
}

impl FromDbErr for RepoUpdateError {
    fn from_db_err(e: DbErr) -> Self {
        if is_unique_violation(&e) {
            RepoUpdateError::Conflict
        } else {
            RepoUpdateError::StorageError(e.to_string())
        }
    }
}

pub(crate) fn flatten_transaction<T, E: FromDbErr + std::error::Error>(
    result: Result<T, TransactionError<E>>,
) -> Result<T, E> {
    match result {
        Ok(value) => Ok(value),
        Err(TransactionError::Transaction(e)) => Err(e),
        Err(TransactionError::Connection(e)) => Err(E::from_db_err(e)),
    }
}

pub(crate) fn encode_hobbies(hobbies: &Option<Vec<String>>) -> Option<String> {
    hobbies
        .as_ref()
        .and_then(|list| serde_json::to_string(list).ok())
}

/// Column value for a sparse update: set when the patch carries the field.
pub(crate) fn patched<T, U>(update: &Option<T>, column: impl FnOnce(&T) -> U) -> ActiveValue<U>
where
    U: Into<Value>,
{
    match update {
        Some(value) => ActiveValue::Set(column(value)),
        None => ActiveValue::NotSet,
    }
}

pub(crate) fn storage_column(id: &Option<StorageId>) -> Option<String> {
    id.as_ref().map(|id| id.0.clone())
}

/// Unreadable stored text decodes to `None`. Row updates only write patched
/// columns, so the stored text survives until the field is set again.
pub(crate) fn decode_hobbies(raw: Option<String>) -> Option<Vec<String>> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(hobbies) => Some(hobbies),
        Err(e) => {
            log::warn!("Unreadable favorite_hobbies {:?}: {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
pub(crate) async fn memory_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:").await.unwrap();
    create_schema(&db).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hobbies_round_trip_through_json_text() {
        let hobbies = Some(vec!["Chess".to_string(), "Hiking".to_string()]);
        let encoded = encode_hobbies(&hobbies);
        assert_eq!(encoded.as_deref(), Some(r#"["Chess","Hiking"]"#));
        assert_eq!(decode_hobbies(encoded), hobbies);
        assert_eq!(decode_hobbies(None), None);
    }

    #[test]
    fn unreadable_hobbies_decode_to_none() {
        assert_eq!(decode_hobbies(Some("Chess, Hiking".to_string())), None);
        assert_eq!(decode_hobbies(Some("{}".to_string())), None);
    }

    #[tokio::test]
    async fn schema_creation_is_repeatable() {
        let db = memory_db().await;
        create_schema(&db).await.unwrap();
    }
}
