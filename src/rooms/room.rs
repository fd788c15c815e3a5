use serde::Serialize;
use tracing::info;

use crate::{
    AppError, AppResult, Server,
    auth::UserId,
    db::{ChannelId, Message},
};

use super::{Action, PAGE_SIZE, permit};

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub u_id: UserId,
    pub name_first: String,
    pub name_last: String,
    pub profile_img_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelDetails {
    pub name: String,
    pub owner_members: Vec<Member>,
    pub all_members: Vec<Member>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesPage {
    /// Newest first.
    pub messages: Vec<Message>,
    pub start: usize,
    /// `None` once the oldest message is on this page.
    pub end: Option<usize>,
}

impl Server {
    /// Private channels only let global owners in. Joining twice does nothing.
    pub async fn channel_join(&self, token: &str, channel_id: ChannelId) -> AppResult<()> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        let mut channel = channel.lock().await;
        if !channel.is_public && !caller.is_global_owner() {
            return Err(AppError::access("This channel is private"));
        }
        if channel.all_members.insert(caller.u_id) {
            info!("u/{} joined channel {channel_id}", caller.u_id);
        }
        Ok(())
    }

    pub async fn channel_details(&self, token: &str, channel_id: ChannelId) -> AppResult<ChannelDetails> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        let (name, owners, members) = {
            let channel = channel.lock().await;
            permit(&caller, &channel, Action::View)?;
            (channel.name.clone(), channel.owner_members.clone(), channel.all_members.clone())
        };

        let users = self.users.read().await;
        let member = |u_id: &UserId| {
            users.by_id(*u_id).map(|u| Member {
                u_id: u.u_id,
                name_first: u.name_first.clone(),
                name_last: u.name_last.clone(),
                profile_img_url: u.profile_img_url.clone(),
            })
        };
        Ok(ChannelDetails {
            name,
            owner_members: owners.iter().filter_map(member).collect(),
            all_members: members.iter().filter_map(member).collect(),
        })
    }

    pub async fn channel_messages(
        &self,
        token: &str,
        channel_id: ChannelId,
        start: usize,
    ) -> AppResult<MessagesPage> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        let channel = channel.lock().await;
        permit(&caller, &channel, Action::View)?;

        let total = channel.messages.len();
        if start > total {
            return Err(AppError::input(format!(
                "Start {start} is past the {total} messages in this channel"
            )));
        }

        let messages: Vec<Message> = channel
            .messages
            .iter()
            .rev()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        let end = (start + PAGE_SIZE < total).then_some(start + PAGE_SIZE);
        Ok(MessagesPage { messages, start, end })
    }

    pub async fn channel_kick(&self, token: &str, channel_id: ChannelId, u_id: UserId) -> AppResult<()> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        let mut channel = channel.lock().await;
        permit(&caller, &channel, Action::Moderate)?;
        if !channel.is_member(u_id) {
            return Err(AppError::input("That user is not a member of this channel"));
        }

        channel.all_members.remove(&u_id);
        channel.owner_members.remove(&u_id);
        info!("u/{} kicked u/{u_id} from channel {channel_id}", caller.u_id);
        Ok(())
    }
}
