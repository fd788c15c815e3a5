use tracing::info;

use crate::{
    AppError, AppResult, Server,
    validate::{validate_email, validate_name, validate_password},
};

use super::{AuthResponse, NewUser, password::hash_password};

impl Server {
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name_first: &str,
        name_last: &str,
    ) -> AppResult<AuthResponse> {
        if !validate_email(email) {
            return Err(AppError::input("Invalid email address"));
        }
        if !validate_password(password) {
            return Err(AppError::input("Password must be at least 6 characters long"));
        }
        if !validate_name(name_first) {
            return Err(AppError::input("First name must be between 1 and 50 characters"));
        }
        if !validate_name(name_last) {
            return Err(AppError::input("Last name must be between 1 and 50 characters"));
        }
        // cheap early out before hashing; insert checks again under the write lock
        if self.config.bot.owns(email) || self.users.read().await.by_email(email).is_some() {
            return Err(AppError::input("Email address is already being used by another user"));
        }

        let password_hash = hash_password(&self.config, password)?;

        let mut users = self.users.write().await;
        let user = users.insert(NewUser {
            email: email.to_owned(),
            password_hash: Some(password_hash),
            name_first: name_first.to_owned(),
            name_last: name_last.to_owned(),
            profile_img_url: None,
        })?;
        let u_id = user.u_id;
        info!("registered u/{u_id} @{} ({:?})", user.handle, user.permission_id);

        let token = self.sessions.write().await.issue(u_id);
        Ok(AuthResponse { u_id, token })
    }
}
