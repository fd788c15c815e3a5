use tracing::info;

use crate::{AppError, AppResult, Server, db::ChannelId};

use super::MAX_CHANNEL_NAME_LEN;

impl Server {
    pub async fn channels_create(
        &self,
        token: &str,
        name: &str,
        is_public: bool,
    ) -> AppResult<ChannelId> {
        let caller = self.caller(token).await?;
        if name.chars().count() > MAX_CHANNEL_NAME_LEN {
            return Err(AppError::input("Channel name must be at most 20 characters"));
        }

        let channel_id = self
            .channels
            .write()
            .await
            .create(name.to_owned(), is_public, caller.u_id);
        info!("u/{} created channel {channel_id} {name:?}", caller.u_id);
        Ok(channel_id)
    }
}
