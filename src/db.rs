use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::auth::UserId;

pub type ChannelId = u32;
pub type MessageId = u64;

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message_id: MessageId,
    pub u_id: UserId,
    pub message: String,
    #[serde(with = "time::serde::timestamp")]
    pub time_created: OffsetDateTime,
}

#[derive(Debug)]
pub struct Channel {
    pub channel_id: ChannelId,
    pub name: String,
    pub is_public: bool,
    pub owner_members: BTreeSet<UserId>,
    pub all_members: BTreeSet<UserId>,
    /// Oldest first.
    pub messages: Vec<Message>,
}

impl Channel {
    fn new(channel_id: ChannelId, name: String, is_public: bool, creator: UserId) -> Self {
        Self {
            channel_id,
            name,
            is_public,
            owner_members: BTreeSet::from([creator]),
            all_members: BTreeSet::from([creator]),
            messages: Vec::new(),
        }
    }

    pub fn is_member(&self, u_id: UserId) -> bool {
        self.all_members.contains(&u_id)
    }

    pub fn is_owner(&self, u_id: UserId) -> bool {
        self.owner_members.contains(&u_id)
    }

    /// False if the message is already gone.
    pub fn remove_message(&mut self, message_id: MessageId) -> bool {
        let Some(pos) = self.messages.iter().position(|m| m.message_id == message_id) else {
            return false;
        };
        self.messages.remove(pos);
        true
    }

    pub fn prune(&mut self, count: usize) -> Vec<Message> {
        let keep = self.messages.len().saturating_sub(count);
        self.messages.split_off(keep)
    }
}

pub type ChannelHandle = Arc<Mutex<Channel>>;

#[derive(Debug, Default)]
pub struct Channels {
    next_id: ChannelId,
    channels: BTreeMap<ChannelId, ChannelHandle>,
}

impl Channels {
    pub(crate) fn create(&mut self, name: String, is_public: bool, creator: UserId) -> ChannelId {
        let channel_id = self.next_id;
        self.next_id += 1;
        self.channels.insert(
            channel_id,
            Arc::new(Mutex::new(Channel::new(channel_id, name, is_public, creator))),
        );
        channel_id
    }

    pub fn get(&self, channel_id: ChannelId) -> Option<ChannelHandle> {
        self.channels.get(&channel_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
