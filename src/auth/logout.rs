use tracing::info;

use crate::{AppError, AppResult, Server};

impl Server {
    pub async fn logout(&self, token: &str) -> AppResult<bool> {
        let Some(u_id) = self.sessions.write().await.revoke(token) else {
            return Err(AppError::access("Invalid token"));
        };
        info!("goodbye u/{u_id}");
        Ok(true)
    }
}
