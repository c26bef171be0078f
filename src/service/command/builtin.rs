//! Commands shipped with the bot.

use std::ops::RangeInclusive;

use async_trait::async_trait;

use super::{Command, CommandContext, CommandError, CommandResult};

/// Liveness check.
pub struct Ping;

#[async_trait]
impl Command for Ping {
    fn name(&self) -> &str {
        "ping"
    }

    fn summary(&self) -> &str {
        "Checks that the bot is alive."
    }

    fn parameters(&self) -> RangeInclusive<usize> {
        0..=0
    }

    async fn run(&self, context: &CommandContext, _args: &[&str]) -> CommandResult {
        context.reply("Pong!").await
    }
}

/// Lists commands, or describes one.
pub struct Help {
    catalog: Vec<(String, String)>,
}

impl Help {
    pub const NAME: &'static str = "help";
    pub const SUMMARY: &'static str = "Lists the available commands, or describes one.";

    pub fn new(catalog: Vec<(String, String)>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Command for Help {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn summary(&self) -> &str {
        Self::SUMMARY
    }

    fn parameters(&self) -> RangeInclusive<usize> {
        0..=1
    }

    async fn run(&self, context: &CommandContext, args: &[&str]) -> CommandResult {
        let prefix = context.services.config.command_prefix;

        let text = match args.first() {
            None => self
                .catalog
                .iter()
                .map(|(name, summary)| format!("`{prefix}{name}` {summary}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Some(wanted) => {
                let (name, summary) = self
                    .catalog
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| CommandError::ObjectNotFound(format!("There is no command named `{wanted}`.")))?;

                format!("`{prefix}{name}` {summary}")
            }
        };

        context.reply(&text).await
    }
}
