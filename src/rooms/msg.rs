use futures_util::FutureExt;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::{
    AppError, AppResult, Server,
    auth::UserId,
    db::{ChannelHandle, ChannelId, Message, MessageId},
};

use super::{Action, MAX_MESSAGE_LEN, permit};

impl Server {
    /// Posts as the caller, then hands anything starting with `/` to the bot.
    pub async fn message_send(&self, token: &str, channel_id: ChannelId, text: &str) -> AppResult<MessageId> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::input("Message must be at most 1000 characters"));
        }

        let message_id = {
            let mut channel = channel.lock().await;
            permit(&caller, &channel, Action::View)?;
            self.append(&mut channel.messages, caller.u_id, text)
        };

        if text.starts_with('/') {
            self.parse_command(token, channel_id, text).await;
        }
        Ok(message_id)
    }

    /// Deletes the newest `count` messages. Errors are returned as-is; only
    /// the `/prune` bot command turns them into chat replies.
    pub async fn message_prune(&self, token: &str, channel_id: ChannelId, count: usize) -> AppResult<()> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        let pruned = {
            let mut channel = channel.lock().await;
            permit(&caller, &channel, Action::Moderate)?;
            if count > channel.messages.len() {
                return Err(AppError::input(
                    "Attempted to prune more messages than there are messages in the channel",
                ));
            }
            channel.prune(count)
        };

        let mut removals = self.removals.lock().await;
        for message in &pruned {
            if let Some(handle) = removals.remove(&message.message_id) {
                handle.cancel();
            }
        }
        info!("u/{} pruned {count} messages from channel {channel_id}", caller.u_id);
        Ok(())
    }

    pub(crate) async fn post(&self, channel: &ChannelHandle, u_id: UserId, text: &str) -> MessageId {
        let mut channel = channel.lock().await;
        self.append(&mut channel.messages, u_id, text)
    }

    /// Takes `message_id` back out of `channel` once the configured delay has
    /// passed, unless something else removed it first.
    pub(crate) async fn remove_later(&self, channel: &ChannelHandle, message_id: MessageId) {
        let channel = channel.clone();
        let removals = self.removals.clone();
        let task = async move {
            removals.lock().await.remove(&message_id);
            let mut channel = channel.lock().await;
            if channel.remove_message(message_id) {
                debug!("removed temporary message {message_id} from channel {}", channel.channel_id);
            }
        };

        // the task takes this lock first, so it cannot run before its handle is stored
        let mut removals = self.removals.lock().await;
        let handle = self
            .scheduler
            .schedule(self.config.temp_message_delay, task.boxed());
        removals.insert(message_id, handle);
    }

    fn append(&self, messages: &mut Vec<Message>, u_id: UserId, text: &str) -> MessageId {
        let message_id = self.next_message_id();
        messages.push(Message {
            message_id,
            u_id,
            message: text.to_owned(),
            time_created: OffsetDateTime::now_utc(),
        });
        message_id
    }
}
