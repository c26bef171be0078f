//! Runtime services and shared state for the bot.

use crate::{
    base::{config::Config, event_log::EventLog},
    service::{chat::ChatClient, command::CommandClient, random::RandomClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration, the membership event log, and the
/// service clients. It is designed to be trivially cloneable, allowing it to
/// be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// Joins and leaves observed since startup.
    pub logs: EventLog,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The command service instance.
    pub commands: CommandClient,
    /// The random source for greetings.
    pub random: RandomClient,
}

impl Runtime {
    /// Create a new runtime with the built-in commands, a thread-local random
    /// source and an empty event log.
    pub fn new(config: Config, chat: ChatClient) -> Self {
        Self {
            config,
            logs: EventLog::new(),
            chat,
            commands: CommandClient::builtin(),
            random: RandomClient::thread(),
        }
    }
}
