use crate::{AppError, AppResult, Server, auth::UserId};

use super::UserProfile;

impl Server {
    pub async fn user_profile(&self, token: &str, u_id: UserId) -> AppResult<UserProfile> {
        self.caller(token).await?;
        self.users
            .read()
            .await
            .by_id(u_id)
            .map(UserProfile::from)
            .ok_or_else(|| AppError::input(format!("No user with id {u_id}")))
    }

    pub async fn users_all(&self, token: &str) -> AppResult<Vec<UserProfile>> {
        self.caller(token).await?;
        Ok(self.users.read().await.iter().map(UserProfile::from).collect())
    }
}
