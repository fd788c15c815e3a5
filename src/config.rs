use std::{str::FromStr, time::Duration};

use anyhow::{Context, anyhow};

use crate::include_res;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// How long a temporary bot reply stays in the channel.
    pub temp_message_delay: Duration,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub words: Vec<String>,
    pub bot: BotIdentity,
}

#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub profile_img_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            temp_message_delay: Duration::from_secs(5),
            hash_memory_kib: argon2::Params::DEFAULT_M_COST,
            hash_iterations: argon2::Params::DEFAULT_T_COST,
            words: parse_words(include_res!(str, "/words.txt")),
            bot: BotIdentity::default(),
        }
    }
}

impl Default for BotIdentity {
    fn default() -> Self {
        Self {
            email: "flockbot@gmail.com".to_owned(),
            name_first: "Flockr".to_owned(),
            name_last: "Bot".to_owned(),
            profile_img_url: "https://nuvro.com/wp-content/uploads/2018/11/Flock-Logo-1.png".to_owned(),
        }
    }
}

impl BotIdentity {
    /// The bot's address is reserved even before the bot account exists.
    pub fn owns(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

impl Config {
    /// Defaults overridden by `FLOCKR_*` variables, `.env` included.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::default();

        if let Ok(level) = dotenv::var("FLOCKR_LOG") {
            config.log_level = level;
        }
        if let Some(secs) = parse_var::<u64>("FLOCKR_TEMP_MESSAGE_DELAY_SECS")? {
            config.temp_message_delay = Duration::from_secs(secs);
        }
        if let Some(kib) = parse_var("FLOCKR_HASH_MEMORY_KIB")? {
            config.hash_memory_kib = kib;
        }
        if let Some(iterations) = parse_var("FLOCKR_HASH_ITERATIONS")? {
            config.hash_iterations = iterations;
        }
        if let Ok(path) = dotenv::var("FLOCKR_WORDS_FILE") {
            let words = std::fs::read_to_string(&path)
                .with_context(|| format!("reading FLOCKR_WORDS_FILE {path}"))?;
            config.words = parse_words(&words);
        }

        if config.words.is_empty() {
            return Err(anyhow!("hangman word list is empty"));
        }

        Ok(config)
    }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Ok(raw) = dotenv::var(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .with_context(|| format!("invalid {key}: {raw:?}"))
}

/// One word per line; anything that is not purely alphabetic is skipped.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
        .collect()
}
