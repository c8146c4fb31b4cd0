use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "npcs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub name: String,
    pub real_name: String,
    pub gender: Option<String>,
    pub hide_gender: Option<bool>,
    pub hometown: Option<String>,
    pub hide_hometown: Option<bool>,
    pub company: Option<String>,
    pub occupation: Option<String>,
    pub about_you: Option<String>,
    pub team_name: Option<String>,
    pub favorite_hobbies: Option<String>,
    pub custom_hobbies: Option<String>,
    pub avatar_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
