use serde::Serialize;
use tracing::info;

use crate::{AppError, AppResult, Server, validate::validate_email};

use super::{UserId, password::verify_password};

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub u_id: UserId,
    pub token: String,
}

impl Server {
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        if !validate_email(email) {
            return Err(AppError::input("Invalid email address"));
        }

        let (u_id, password_hash) = {
            let users = self.users.read().await;
            let Some(user) = users.by_email(email) else {
                return Err(AppError::input("Email address is not registered"));
            };
            (user.u_id, user.password_hash.clone())
        };

        let Some(password_hash) = password_hash else {
            return Err(AppError::input("Incorrect password"));
        };
        if !verify_password(password, &password_hash)? {
            return Err(AppError::input("Incorrect password"));
        }

        let token = self.sessions.write().await.issue(u_id);
        info!("welcome u/{u_id}");
        Ok(AuthResponse { u_id, token })
    }
}
