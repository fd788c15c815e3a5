pub mod appresult;
pub mod auth;
pub mod bot;
pub mod config;
pub mod db;
pub mod profiles;
pub mod res;
pub mod rooms;
pub mod sched;
pub mod session;
pub mod validate;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::{Mutex, RwLock};
use tracing::info;

pub use appresult::{AppError, AppResult};
pub use auth::{AuthResponse, PermissionId, User, UserId};
pub use config::Config;
pub use db::{ChannelId, Message, MessageId};
pub use rooms::Action;
pub use sched::{ManualScheduler, Scheduler, TaskHandle, TokioScheduler};

use auth::Directory;
use bot::hangman::Hangman;
use db::Channels;
use session::Sessions;

/// Temporary bot replies that are still waiting to be taken down.
pub(crate) type Removals = Arc<Mutex<HashMap<MessageId, TaskHandle>>>;

/// One chat server's worth of state.
///
/// Locks are always taken in field order (`bot`, `users`, `sessions`,
/// `channels`, a single channel, `hangman`, `removals`) and none is held
/// while awaiting one that comes earlier.
pub struct Server {
    config: Config,
    bot: Mutex<Option<UserId>>,
    users: RwLock<Directory>,
    sessions: RwLock<Sessions>,
    channels: RwLock<Channels>,
    hangman: Mutex<Hangman>,
    removals: Removals,
    scheduler: Arc<dyn Scheduler>,
    next_message_id: AtomicU64,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self::with_scheduler(config, Arc::new(TokioScheduler))
    }

    pub fn with_scheduler(config: Config, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            config,
            bot: Mutex::new(None),
            users: RwLock::default(),
            sessions: RwLock::default(),
            channels: RwLock::default(),
            hangman: Mutex::default(),
            removals: Removals::default(),
            scheduler,
            next_message_id: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn clear(&self) {
        let mut bot = self.bot.lock().await;
        let mut users = self.users.write().await;
        let mut sessions = self.sessions.write().await;
        let mut channels = self.channels.write().await;
        let mut hangman = self.hangman.lock().await;
        let mut removals = self.removals.lock().await;

        for (_, handle) in removals.drain() {
            handle.cancel();
        }
        *bot = None;
        *users = Directory::default();
        *sessions = Sessions::default();
        *channels = Channels::default();
        *hangman = Hangman::default();
        info!("cleared");
    }

    /// Message ids keep counting across [`Server::clear`].
    pub(crate) fn next_message_id(&self) -> MessageId {
        self.next_message_id.fetch_add(1, Ordering::Relaxed)
    }
}
