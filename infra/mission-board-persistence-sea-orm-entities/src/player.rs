use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub password: String,
    #[sea_orm(indexed)]
    pub team_name: String,
    pub total_score: i64,
    pub avatar_id: Option<String>,
    pub last_login_date: Option<i64>,

    pub real_name: Option<String>,
    pub gender: Option<String>,
    pub hide_gender: Option<bool>,
    pub hometown: Option<String>,
    pub hide_hometown: Option<bool>,
    pub company: Option<String>,
    pub occupation: Option<String>,
    pub about_you: Option<String>,
    /// JSON array of hobby names.
    pub favorite_hobbies: Option<String>,
    pub custom_hobbies: Option<String>,
    pub id_card_id: Option<String>,
    pub personal_website: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
