//! The in-channel chatbot.
//!
//! Anything posted that starts with `/` goes through [`Server::parse_command`].
//! Commands never fail the request that carried them: an error becomes a
//! `Failed to <action>: <reason>` reply from the bot account.

pub mod hangman;
mod fun;

use anyhow::anyhow;
use rand::seq::IndexedRandom;
use tracing::{debug, info, warn};

use crate::{
    AppError, AppResult, Server,
    auth::{NewUser, UserId},
    db::{ChannelHandle, ChannelId},
    res,
    rooms::{Action, permit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    Help,
    Time,
    Flip,
    HangmanStart,
    Kick(&'a str),
    Prune(&'a str),
    Guess(&'a str),
    Choose(&'a str),
    Dice(&'a str),
}

impl<'a> Command<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        Some(match text {
            "/help" => Self::Help,
            "/time" => Self::Time,
            "/flip" => Self::Flip,
            "/hangman start" => Self::HangmanStart,
            _ => {
                if let Some(args) = text.strip_prefix("/kick") {
                    Self::Kick(args)
                } else if let Some(args) = text.strip_prefix("/prune") {
                    Self::Prune(args)
                } else if let Some(args) = text.strip_prefix("/guess") {
                    Self::Guess(args)
                } else if let Some(args) = text.strip_prefix("/choose") {
                    Self::Choose(args)
                } else if let Some(args) = text.strip_prefix("/dice") {
                    Self::Dice(args)
                } else {
                    return None;
                }
            }
        })
    }

    /// Fills the blank in "Failed to ___".
    fn action(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Time => "tell the time",
            Self::Flip => "flip a coin",
            Self::HangmanStart => "start hangman",
            Self::Kick(_) => "kick",
            Self::Prune(_) => "prune",
            Self::Guess(_) => "register guess",
            Self::Choose(_) => "choose",
            Self::Dice(_) => "roll dice",
        }
    }
}

struct Reply {
    text: String,
    /// Taken down again after the configured delay.
    temporary: bool,
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self { text, temporary: false }
    }
}

impl Server {
    /// Runs a bot command found in `text`. Unknown commands are ignored, and
    /// so is anyone who could not have posted in the channel themselves.
    pub async fn parse_command(&self, token: &str, channel_id: ChannelId, text: &str) {
        let Some(command) = Command::parse(text) else {
            return;
        };
        let channel = match self.viewable(token, channel_id).await {
            Ok(channel) => channel,
            Err(e) => {
                warn!("bot command {text:?} refused for channel {channel_id}: {e}");
                return;
            }
        };
        debug!("bot command {command:?} in channel {channel_id}");

        let replies = match self.run_command(token, channel_id, command).await {
            Ok(replies) => replies,
            Err(e) => vec![format!("Failed to {}: {e}", command.action()).into()],
        };
        for reply in replies {
            self.bot_say(&channel, reply).await;
        }
    }

    async fn viewable(&self, token: &str, channel_id: ChannelId) -> AppResult<ChannelHandle> {
        let (caller, channel) = self.authorize(token, channel_id).await?;
        permit(&caller, &*channel.lock().await, Action::View)?;
        Ok(channel)
    }

    async fn run_command(
        &self,
        token: &str,
        channel_id: ChannelId,
        command: Command<'_>,
    ) -> AppResult<Vec<Reply>> {
        Ok(match command {
            Command::Help => vec![res::help_text().to_owned().into()],
            Command::Time => vec![fun::time_now()?.into()],
            Command::Flip => vec![fun::flip().into()],
            Command::Choose(args) => vec![fun::choose(args)?.into()],
            Command::Dice(args) => vec![fun::dice(args).into()],
            Command::HangmanStart => self.hangman_start().await?,
            Command::Guess(args) => vec![self.hangman_guess(token, args).await?.into()],
            Command::Kick(args) => vec![self.kick_by_handle(token, channel_id, args).await?.into()],
            Command::Prune(args) => {
                let text = self.prune_command(token, channel_id, args).await?;
                vec![Reply { text, temporary: true }]
            }
        })
    }

    async fn hangman_start(&self) -> AppResult<Vec<Reply>> {
        let mut hangman = self.hangman.lock().await;
        if let Some(game) = hangman.game() {
            return Ok(vec![
                "Hangman game already in progress!".to_owned().into(),
                game.status().into(),
            ]);
        }

        let word = self
            .config
            .words
            .choose(&mut rand::rng())
            .ok_or_else(|| anyhow!("hangman word list is empty"))?;
        info!("hangman started");
        Ok(vec![hangman.start(word).into()])
    }

    async fn hangman_guess(&self, token: &str, args: &str) -> AppResult<String> {
        let handle = self.handle_of(token).await?;
        let outcome = self.hangman.lock().await.guess(args)?;
        Ok(match outcome {
            hangman::Outcome::Won { word } => {
                format!("Congratulations {handle} on guessing the word {word}!")
            }
            hangman::Outcome::Lost { word } => format!("Unlucky, the word was {word}!"),
            hangman::Outcome::Continue { status } => status,
        })
    }

    async fn kick_by_handle(&self, token: &str, channel_id: ChannelId, args: &str) -> AppResult<String> {
        let kicker = self.handle_of(token).await?;
        let handle = args.strip_prefix(' ').unwrap_or(args);
        let Some(target) = self.user_with_handle(handle).await else {
            return Err(AppError::input("Please provide a valid user handle!"));
        };

        self.channel_kick(token, channel_id, target.u_id).await?;
        Ok(format!("⚽️ {} has been kicked by {kicker}!", target.handle))
    }

    async fn prune_command(&self, token: &str, channel_id: ChannelId, args: &str) -> AppResult<String> {
        let pruner = self.handle_of(token).await?;
        let count: usize = args
            .trim()
            .parse()
            .map_err(|_| AppError::input(format!("{:?} is not a number of messages", args.trim())))?;

        self.message_prune(token, channel_id, count).await?;
        Ok(format!("{count} messages have been successfully pruned by {pruner}"))
    }

    async fn handle_of(&self, token: &str) -> AppResult<String> {
        self.user_with_token(token)
            .await
            .map(|user| user.handle)
            .ok_or_else(|| AppError::access("Invalid token"))
    }

    /// The bot account is created the first time it has something to say.
    pub async fn bot_id(&self) -> AppResult<UserId> {
        let mut bot = self.bot.lock().await;
        if let Some(u_id) = *bot {
            return Ok(u_id);
        }

        let identity = &self.config.bot;
        let mut users = self.users.write().await;
        let user = users.insert(NewUser {
            email: identity.email.clone(),
            password_hash: None,
            name_first: identity.name_first.clone(),
            name_last: identity.name_last.clone(),
            profile_img_url: Some(identity.profile_img_url.clone()),
        })?;
        info!("bot is u/{} @{}", user.u_id, user.handle);
        *bot = Some(user.u_id);
        Ok(user.u_id)
    }

    async fn bot_say(&self, channel: &ChannelHandle, reply: Reply) {
        let u_id = match self.bot_id().await {
            Ok(u_id) => u_id,
            Err(e) => {
                warn!("bot account unavailable, dropping reply: {e}");
                return;
            }
        };

        let message_id = self.post(channel, u_id, &reply.text).await;
        if reply.temporary {
            self.remove_later(channel, message_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_commands_need_exact_text() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/help me"), None);
        assert_eq!(Command::parse("/hangman start"), Some(Command::HangmanStart));
        assert_eq!(Command::parse("/hangman"), None);
    }

    #[test]
    fn prefix_commands_keep_their_arguments() {
        assert_eq!(Command::parse("/kick naughty_user"), Some(Command::Kick(" naughty_user")));
        assert_eq!(Command::parse("/prune 5x"), Some(Command::Prune(" 5x")));
        assert_eq!(Command::parse("/guess"), Some(Command::Guess("")));
        assert_eq!(Command::parse("/dice"), Some(Command::Dice("")));
        assert_eq!(Command::parse("hello /help"), None);
        assert_eq!(Command::parse("/standup 5"), None);
    }
}
