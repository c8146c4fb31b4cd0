use crate::domain::{
    AdminId, Clearable, RepoCreateError, RepoError, RepoUpdateError, StorageId, Timestamp,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admin {
    pub admin_id: AdminId,
    pub username: String,
    pub password: String,
    pub avatar_id: Option<StorageId>,
    pub last_login_date: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: String,
    pub password: String,
    pub avatar_id: Option<StorageId>,
    pub last_login_date: Timestamp,
}

#[derive(Clone, Debug, Default)]
pub struct AdminPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub avatar_id: Clearable<StorageId>,
}

impl AdminPatch {
    pub fn apply(self, admin: &mut Admin) {
        if let Some(username) = self.username {
            admin.username = username;
        }
        if let Some(password) = self.password {
            admin.password = password;
        }
        if let Some(avatar_id) = self.avatar_id {
            admin.avatar_id = avatar_id;
        }
    }
}

#[async_trait::async_trait]
pub trait AdminRepository {
    async fn get_admin(&self, admin_id: AdminId) -> Result<Option<Admin>, RepoError>;
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>, RepoError>;
    async fn list_admins(&self) -> Result<Vec<Admin>, RepoError>;
    /// Fails with `Conflict` when the username is taken.
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminId, RepoCreateError>;
    /// A username change that collides with another admin fails with
    /// `Conflict`. Returns `None` for an unknown id.
    async fn update_admin(
        &self,
        admin_id: AdminId,
        patch: AdminPatch,
    ) -> Result<Option<Admin>, RepoUpdateError>;
    async fn set_last_login(&self, admin_id: AdminId, at: Timestamp) -> Result<(), RepoError>;
    async fn delete_admin(&self, admin_id: AdminId) -> Result<bool, RepoError>;
    /// Inserts the admin only when no admin exists. Returns whether it did.
    async fn insert_admin_if_empty(&self, admin: NewAdmin) -> Result<bool, RepoError>;
}
