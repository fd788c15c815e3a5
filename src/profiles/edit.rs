use tracing::info;

use crate::{
    AppError, AppResult, Server,
    auth::{PermissionId, UserId},
    validate::{validate_email, validate_handle, validate_name},
};

impl Server {
    pub async fn set_name(&self, token: &str, name_first: &str, name_last: &str) -> AppResult<()> {
        let caller = self.caller(token).await?;
        if !validate_name(name_first) || !validate_name(name_last) {
            return Err(AppError::input("Names must be between 1 and 50 characters"));
        }

        let mut users = self.users.write().await;
        let user = users
            .by_id_mut(caller.u_id)
            .ok_or_else(|| AppError::access("Invalid token"))?;
        user.name_first = name_first.to_owned();
        user.name_last = name_last.to_owned();
        Ok(())
    }

    /// Setting the address you already have is an error, not a no-op.
    pub async fn set_email(&self, token: &str, email: &str) -> AppResult<()> {
        let caller = self.caller(token).await?;
        if !validate_email(email) {
            return Err(AppError::input("Invalid email address"));
        }
        if self.config.bot.owns(email) {
            return Err(AppError::input("Email address is already being used"));
        }
        self.users.write().await.set_email(caller.u_id, email)
    }

    pub async fn set_handle(&self, token: &str, handle: &str) -> AppResult<()> {
        let caller = self.caller(token).await?;
        if !validate_handle(handle) {
            return Err(AppError::input("Handle must be between 3 and 20 characters"));
        }
        self.users.write().await.set_handle(caller.u_id, handle)?;
        info!("u/{} is now @{handle}", caller.u_id);
        Ok(())
    }

    pub async fn admin_userpermission_change(
        &self,
        token: &str,
        u_id: UserId,
        permission_id: u8,
    ) -> AppResult<()> {
        let caller = self.caller(token).await?;
        if !caller.is_global_owner() {
            return Err(AppError::access("Only owners can change permissions"));
        }
        let permission_id = PermissionId::try_from(permission_id)?;

        let mut users = self.users.write().await;
        let user = users
            .by_id_mut(u_id)
            .ok_or_else(|| AppError::input(format!("No user with id {u_id}")))?;
        user.permission_id = permission_id;
        info!("u/{} set u/{u_id} to {permission_id:?}", caller.u_id);
        Ok(())
    }
}
