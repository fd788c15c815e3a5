use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    AppError, AppResult, Server,
    auth::{PermissionId, User, UserId},
};

/// Live tokens. A token maps to one user; a user may hold many tokens.
#[derive(Debug, Default)]
pub struct Sessions {
    tokens: HashMap<String, UserId>,
}

impl Sessions {
    pub(crate) fn issue(&mut self, u_id: UserId) -> String {
        loop {
            let token = Uuid::new_v4().simple().to_string();
            if !self.tokens.contains_key(&token) {
                self.tokens.insert(token.clone(), u_id);
                return token;
            }
        }
    }

    /// Exact match only: padded, trimmed or re-cased tokens miss.
    pub fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).copied()
    }

    pub(crate) fn revoke(&mut self, token: &str) -> Option<UserId> {
        self.tokens.remove(token)
    }

    pub fn active_for(&self, u_id: UserId) -> usize {
        self.tokens.values().filter(|id| **id == u_id).count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub u_id: UserId,
    pub permission_id: PermissionId,
}

impl Caller {
    pub fn is_global_owner(&self) -> bool {
        self.permission_id == PermissionId::Owner
    }
}

impl Server {
    pub(crate) async fn caller(&self, token: &str) -> AppResult<Caller> {
        let u_id = self
            .sessions
            .read()
            .await
            .resolve(token)
            .ok_or_else(|| AppError::access("Invalid token"))?;
        let users = self.users.read().await;
        let user = users
            .by_id(u_id)
            .ok_or_else(|| AppError::access("Invalid token"))?;

        Ok(Caller {
            u_id,
            permission_id: user.permission_id,
        })
    }

    pub async fn user_with_token(&self, token: &str) -> Option<User> {
        let u_id = self.sessions.read().await.resolve(token)?;
        self.users.read().await.by_id(u_id).cloned()
    }

    pub async fn user_with_id(&self, u_id: UserId) -> Option<User> {
        self.users.read().await.by_id(u_id).cloned()
    }

    pub async fn user_with_handle(&self, handle: &str) -> Option<User> {
        self.users.read().await.by_handle(handle).cloned()
    }

    pub async fn user_with_email(&self, email: &str) -> Option<User> {
        self.users.read().await.by_email(email).cloned()
    }

    pub async fn active_sessions(&self, u_id: UserId) -> usize {
        self.sessions.read().await.active_for(u_id)
    }
}
