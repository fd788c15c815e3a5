use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    AppError, AppResult,
    validate::{MAX_HANDLE_LEN, validate_handle},
};

mod login;
mod logout;
mod password;
mod register;

pub use login::AuthResponse;

pub type UserId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionId {
    Owner = 1,
    Member = 2,
}

impl TryFrom<u8> for PermissionId {
    type Error = AppError;

    fn try_from(value: u8) -> AppResult<Self> {
        match value {
            1 => Ok(Self::Owner),
            2 => Ok(Self::Member),
            _ => Err(AppError::input(format!("Invalid permission id {value}"))),
        }
    }
}

impl Serialize for PermissionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub u_id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle: String,
    pub permission_id: PermissionId,
    pub profile_img_url: Option<String>,
    /// `None` for accounts that cannot log in (the bot).
    pub(crate) password_hash: Option<String>,
}

pub(crate) struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub name_first: String,
    pub name_last: String,
    pub profile_img_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct Directory {
    next_id: UserId,
    users: BTreeMap<UserId, User>,
}

impl Directory {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn by_id(&self, u_id: UserId) -> Option<&User> {
        self.users.get(&u_id)
    }

    pub fn by_email(&self, email: &str) -> Option<&User> {
        let email = email.to_lowercase();
        self.users.values().find(|u| u.email == email)
    }

    pub fn by_handle(&self, handle: &str) -> Option<&User> {
        self.users.values().find(|u| u.handle == handle)
    }

    pub(crate) fn by_id_mut(&mut self, u_id: UserId) -> Option<&mut User> {
        self.users.get_mut(&u_id)
    }

    /// The first account ever stored becomes the global owner.
    pub(crate) fn insert(&mut self, new: NewUser) -> AppResult<&User> {
        if self.by_email(&new.email).is_some() {
            return Err(AppError::input("Email address is already being used by another user"));
        }

        let u_id = self.next_id;
        self.next_id += 1;
        let handle = self.derive_handle(&new.name_first, &new.name_last);
        let permission_id = if self.users.is_empty() {
            PermissionId::Owner
        } else {
            PermissionId::Member
        };

        let user = User {
            u_id,
            email: new.email.to_lowercase(),
            name_first: new.name_first,
            name_last: new.name_last,
            handle,
            permission_id,
            profile_img_url: new.profile_img_url,
            password_hash: new.password_hash,
        };
        Ok(self.users.entry(u_id).or_insert(user))
    }

    /// Rejects an email held by anyone, the caller included.
    pub(crate) fn set_email(&mut self, u_id: UserId, email: &str) -> AppResult<()> {
        if self.by_email(email).is_some() {
            return Err(AppError::input("Email address is already being used"));
        }
        let user = self.by_id_mut(u_id).ok_or_else(|| AppError::access("Invalid token"))?;
        user.email = email.to_lowercase();
        Ok(())
    }

    pub(crate) fn set_handle(&mut self, u_id: UserId, handle: &str) -> AppResult<()> {
        if self.by_handle(handle).is_some_and(|u| u.u_id != u_id) {
            return Err(AppError::input("Handle is already being used by another user"));
        }
        let user = self.by_id_mut(u_id).ok_or_else(|| AppError::access("Invalid token"))?;
        user.handle = handle.to_owned();
        Ok(())
    }

    /// Lower-cased first+last name without whitespace, cut to the handle
    /// limit, with a numeric suffix when that is too short or already taken.
    fn derive_handle(&self, first: &str, last: &str) -> String {
        let base: String = first
            .chars()
            .chain(last.chars())
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .take(MAX_HANDLE_LEN)
            .collect();
        if validate_handle(&base) && self.by_handle(&base).is_none() {
            return base;
        }

        let mut n = 0u32;
        loop {
            n += 1;
            let suffix = n.to_string();
            let mut handle: String = base.chars().take(MAX_HANDLE_LEN - suffix.len()).collect();
            handle.push_str(&suffix);
            if validate_handle(&handle) && self.by_handle(&handle).is_none() {
                return handle;
            }
        }
    }
}
