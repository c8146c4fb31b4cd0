use mission_board_app::domain::{
    AdminId, RepoCreateError, RepoError, RepoUpdateError, StorageId, Timestamp,
    admin::{Admin, AdminPatch, AdminRepository, NewAdmin},
};
use mission_board_persistence_sea_orm_entities::admin;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait, prelude::Expr,
};

use crate::{FromDbErr, flatten_transaction};

pub struct AdminRepositoryImpl {
    db: DatabaseConnection,
}

impl AdminRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_admin(model: admin::Model) -> Admin {
    Admin {
        admin_id: AdminId(model.id),
        username: model.username,
        password: model.password,
        avatar_id: model.avatar_id.map(StorageId),
        last_login_date: model.last_login_date,
    }
}

fn new_admin_model(admin: NewAdmin) -> admin::ActiveModel {
    admin::ActiveModel {
        username: Set(admin.username),
        password: Set(admin.password),
        avatar_id: Set(admin.avatar_id.map(|id| id.0)),
        last_login_date: Set(admin.last_login_date),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl AdminRepository for AdminRepositoryImpl {
    async fn get_admin(&self, admin_id: AdminId) -> Result<Option<Admin>, RepoError> {
        let model = admin::Entity::find_by_id(admin_id.0)
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_admin))
    }

    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>, RepoError> {
        let model = admin::Entity::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(model.map(model_to_admin))
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, RepoError> {
        let models = admin::Entity::find()
            .order_by_asc(admin::Column::Id)
            .all(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(models.into_iter().map(model_to_admin).collect())
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminId, RepoCreateError> {
        let res = self
            .db
            .transaction::<_, AdminId, RepoCreateError>(|txn| {
                Box::pin(async move {
                    let taken = admin::Entity::find()
                        .filter(admin::Column::Username.eq(admin.username.as_str()))
                        .one(txn)
                        .await
                        .map_err(RepoCreateError::from_db_err)?
                        .is_some();
                    if taken {
                        return Err(RepoCreateError::Conflict);
                    }
                    let res = admin::Entity::insert(new_admin_model(admin))
                        .exec(txn)
                        .await
                        .map_err(RepoCreateError::from_db_err)?;
                    Ok(AdminId(res.last_insert_id))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn update_admin(
        &self,
        admin_id: AdminId,
        patch: AdminPatch,
    ) -> Result<Option<Admin>, RepoUpdateError> {
        let res = self
            .db
            .transaction::<_, Option<Admin>, RepoUpdateError>(|txn| {
                Box::pin(async move {
                    let Some(model) = admin::Entity::find_by_id(admin_id.0)
                        .one(txn)
                        .await
                        .map_err(RepoUpdateError::from_db_err)?
                    else {
                        return Ok(None);
                    };

                    if let Some(username) = &patch.username {
                        let taken = admin::Entity::find()
                            .filter(admin::Column::Username.eq(username.as_str()))
                            .filter(admin::Column::Id.ne(admin_id.0))
                            .one(txn)
                            .await
                            .map_err(RepoUpdateError::from_db_err)?
                            .is_some();
                        if taken {
                            return Err(RepoUpdateError::Conflict);
                        }
                    }

                    let mut admin = model_to_admin(model);
                    patch.apply(&mut admin);
                    admin::Entity::update(admin::ActiveModel {
                        id: Set(admin.admin_id.0),
                        username: Set(admin.username.clone()),
                        password: Set(admin.password.clone()),
                        avatar_id: Set(admin.avatar_id.as_ref().map(|id| id.0.clone())),
                        last_login_date: Set(admin.last_login_date),
                    })
                    .exec(txn)
                    .await
                    .map_err(RepoUpdateError::from_db_err)?;
                    Ok(Some(admin))
                })
            })
            .await;
        flatten_transaction(res)
    }

    async fn set_last_login(&self, admin_id: AdminId, at: Timestamp) -> Result<(), RepoError> {
        admin::Entity::update_many()
            .col_expr(admin::Column::LastLoginDate, Expr::value(at))
            .filter(admin::Column::Id.eq(admin_id.0))
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(())
    }

    async fn delete_admin(&self, admin_id: AdminId) -> Result<bool, RepoError> {
        let res = admin::Entity::delete_by_id(admin_id.0)
            .exec(&self.db)
            .await
            .map_err(RepoError::from_db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_admin_if_empty(&self, admin: NewAdmin) -> Result<bool, RepoError> {
        let res = self
            .db
            .transaction::<_, bool, RepoError>(|txn| {
                Box::pin(async move {
                    let existing = admin::Entity::find()
                        .count(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    if existing > 0 {
                        return Ok(false);
                    }
                    admin::Entity::insert(new_admin_model(admin))
                        .exec(txn)
                        .await
                        .map_err(RepoError::from_db_err)?;
                    Ok(true)
                })
            })
            .await;
        flatten_transaction(res)
    }
}
