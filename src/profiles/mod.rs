mod edit;
mod page;

use serde::Serialize;

use crate::auth::{PermissionId, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub u_id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle_str: String,
    pub permission_id: PermissionId,
    pub profile_img_url: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            u_id: user.u_id,
            email: user.email.clone(),
            name_first: user.name_first.clone(),
            name_last: user.name_last.clone(),
            handle_str: user.handle.clone(),
            permission_id: user.permission_id,
            profile_img_url: user.profile_img_url.clone(),
        }
    }
}
