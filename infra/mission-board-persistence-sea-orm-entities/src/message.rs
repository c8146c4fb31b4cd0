use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub recipient: String,
    pub sender: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub send_date: i64,
    /// One of `low`, `medium`, `high`.
    pub priority: String,
    pub message_read: bool,
    pub read_date: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
