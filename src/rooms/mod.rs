mod msg;
mod new;
mod room;

use crate::{
    AppError, AppResult, Server,
    db::{Channel, ChannelHandle, ChannelId},
    session::Caller,
};

pub use room::{ChannelDetails, Member, MessagesPage};

pub const MAX_CHANNEL_NAME_LEN: usize = 20;
pub const MAX_MESSAGE_LEN: usize = 1000;
pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read or post. Membership is enough.
    View,
    /// Kick or prune. Needs channel ownership or global ownership.
    Moderate,
}

/// Membership and ownership gates. Token and channel lookups happen before
/// this, in [`Server::authorize`].
pub fn permit(caller: &Caller, channel: &Channel, action: Action) -> AppResult<()> {
    if !channel.is_member(caller.u_id) {
        return Err(AppError::access("You are not a member of this channel"));
    }
    if action == Action::Moderate && !channel.is_owner(caller.u_id) && !caller.is_global_owner() {
        return Err(AppError::access("You are not an owner of this channel"));
    }
    Ok(())
}

impl Server {
    pub(crate) async fn channel(&self, channel_id: ChannelId) -> AppResult<ChannelHandle> {
        self.channels
            .read()
            .await
            .get(channel_id)
            .ok_or_else(|| AppError::input(format!("Invalid channel {channel_id}")))
    }

    /// Token first, then the channel. The caller still has to lock the
    /// channel and [`permit`] the action so the check and the change happen
    /// under the same lock.
    pub(crate) async fn authorize(
        &self,
        token: &str,
        channel_id: ChannelId,
    ) -> AppResult<(Caller, ChannelHandle)> {
        let caller = self.caller(token).await?;
        let channel = self.channel(channel_id).await?;
        Ok((caller, channel))
    }
}
