//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default guild (TU20).
fn default_guild_id() -> u64 {
    230737273350520834
}

/// Default welcome channel (#bot-testing).
fn default_welcome_channel_id() -> u64 {
    736741911150198835
}

/// Default greetings, one of which is picked for each new member.
fn default_welcome_messages() -> Vec<String> {
    ["Hello there!", "Whats poppin", "Wagwan", "Hi", "AHOY", "Welcome", "Greetings", "Howdy"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default command prefix.
fn default_command_prefix() -> char {
    '-'
}

/// Configuration for the bot.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Discord bot token (`DISCORD_TOKEN`).
    #[serde(default)]
    pub discord_token: String,
    /// The guild this bot serves (`GUILD_ID`).
    #[serde(default = "default_guild_id")]
    pub guild_id: u64,
    /// Channel that receives welcome messages (`WELCOME_CHANNEL_ID`).
    #[serde(default = "default_welcome_channel_id")]
    pub welcome_channel_id: u64,
    /// Greeting templates; the new member's mention is appended to the chosen one.
    /// Must not be empty.
    #[serde(default = "default_welcome_messages")]
    pub welcome_messages: Vec<String>,
    /// Leading character that marks a message as a command (`COMMAND_PREFIX`).
    #[serde(default = "default_command_prefix")]
    pub command_prefix: char,
    /// Reply to failing commands with the raw error and trace (`SHOW_STACK_TRACE`).
    ///
    /// This exposes internals to anyone in the channel, so it is off unless set.
    #[serde(default)]
    pub show_stack_trace: bool,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            guild_id: default_guild_id(),
            welcome_channel_id: default_welcome_channel_id(),
            welcome_messages: default_welcome_messages(),
            command_prefix: default_command_prefix(),
            show_stack_trace: false,
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg.add_source(config::Environment::with_prefix("TU20_BOT").prefix_separator("_"));

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.discord_token.is_empty() {
            return Err(anyhow::anyhow!("A Discord token must be provided (`TU20_BOT_DISCORD_TOKEN`)."));
        }

        result.validate()?;

        Ok(result)
    }

    /// Checks the invariants the handlers rely on.
    pub fn validate(&self) -> Res<()> {
        if self.welcome_messages.is_empty() {
            return Err(anyhow::anyhow!("At least one welcome message must be configured."));
        }

        if self.command_prefix.is_whitespace() {
            return Err(anyhow::anyhow!("The command prefix must not be whitespace."));
        }

        Ok(())
    }
}
