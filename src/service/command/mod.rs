//! Prefix command subsystem.
//!
//! The message handler hands a `CommandContext` and the offset just past the
//! prefix to a `GenericCommandService`, and gets back a `CommandResult` it can
//! turn into a reply. `CommandService` is the registry-backed implementation.

pub mod builtin;

use std::{backtrace::BacktraceStatus, ops::Deref, ops::RangeInclusive, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{base::types::ChatMessage, runtime::Runtime};

// Types.

/// Why a command invocation did not succeed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No command matches the name after the prefix.
    #[error("Unknown command.")]
    UnknownCommand,
    /// The command exists but was given the wrong number of arguments.
    #[error("The input text has {actual} parameters, but `{command}` accepts {expected}.")]
    BadArgCount { command: String, expected: String, actual: usize },
    /// An argument named something that does not exist.
    #[error("{0}")]
    ObjectNotFound(String),
    /// The command itself failed while running.
    #[error("{0}")]
    Exception(#[from] anyhow::Error),
}

impl CommandError {
    /// Cause chain and, when one was captured, the backtrace of an `Exception`.
    pub fn trace(&self) -> Option<String> {
        let CommandError::Exception(error) = self else {
            return None;
        };

        let mut lines: Vec<String> = error.chain().skip(1).map(|cause| format!("Caused by: {cause}")).collect();

        let backtrace = error.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            lines.push(backtrace.to_string());
        }

        if lines.is_empty() {
            lines.push("No trace was captured.".to_string());
        }

        Some(lines.join("\n"))
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Everything a command can see about its invocation.
///
/// `services` doubles as the service registry: commands reach the chat client,
/// configuration and event log through it.
#[derive(Clone)]
pub struct CommandContext {
    pub message: ChatMessage,
    pub services: Runtime,
}

impl CommandContext {
    pub fn new(message: ChatMessage, services: Runtime) -> Self {
        Self { message, services }
    }

    /// Replies in the channel the command came from.
    pub async fn reply(&self, text: &str) -> CommandResult {
        self.services.chat.send_message(self.message.channel_id, text).await?;
        Ok(())
    }
}

// Traits.

/// Generic command execution trait.
#[async_trait]
pub trait GenericCommandService: Send + Sync + 'static {
    /// Parse the message content starting at `arg_pos` and run the matching command.
    async fn execute(&self, context: &CommandContext, arg_pos: usize) -> CommandResult;
}

/// A single named command.
#[async_trait]
pub trait Command: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// One line shown by `help`.
    fn summary(&self) -> &str;

    /// How many whitespace-separated arguments the command accepts.
    fn parameters(&self) -> RangeInclusive<usize>;

    async fn run(&self, context: &CommandContext, args: &[&str]) -> CommandResult;
}

// Structs.

/// Command service for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct CommandClient {
    inner: Arc<dyn GenericCommandService>,
}

impl Deref for CommandClient {
    type Target = dyn GenericCommandService;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl CommandClient {
    pub fn new(inner: Arc<dyn GenericCommandService>) -> Self {
        Self { inner }
    }

    /// The registry with the built-in commands.
    pub fn builtin() -> Self {
        Self::new(Arc::new(CommandService::with_builtins()))
    }
}

/// Registry of commands, looked up by case-insensitive name.
#[derive(Clone, Default)]
pub struct CommandService {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandService {
    /// An empty registry; every invocation is an unknown command.
    pub fn new() -> Self {
        Self::default()
    }

    /// `ping` and `help`.
    pub fn with_builtins() -> Self {
        let service = Self::new().with(builtin::Ping);

        let mut catalog = service.catalog();
        catalog.push((builtin::Help::NAME.to_string(), builtin::Help::SUMMARY.to_string()));
        catalog.sort();

        service.with(builtin::Help::new(catalog))
    }

    /// Registers a command. Lookup returns the first command registered under a name.
    pub fn with(mut self, command: impl Command) -> Self {
        self.commands.push(Arc::new(command));
        self
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// `(name, summary)` of every registered command, in registration order.
    pub fn catalog(&self) -> Vec<(String, String)> {
        self.commands.iter().map(|c| (c.name().to_string(), c.summary().to_string())).collect()
    }
}

#[async_trait]
impl GenericCommandService for CommandService {
    #[instrument(skip_all)]
    async fn execute(&self, context: &CommandContext, arg_pos: usize) -> CommandResult {
        let input = context.message.content.get(arg_pos..).ok_or(CommandError::UnknownCommand)?;

        let mut tokens = input.split_whitespace();
        let name = tokens.next().ok_or(CommandError::UnknownCommand)?;
        let command = self.find(name).ok_or(CommandError::UnknownCommand)?;

        let args: Vec<&str> = tokens.collect();
        let parameters = command.parameters();

        if !parameters.contains(&args.len()) {
            return Err(CommandError::BadArgCount {
                command: command.name().to_string(),
                expected: describe(&parameters),
                actual: args.len(),
            });
        }

        debug!("Running command `{}` with {} argument(s).", command.name(), args.len());

        command.run(context, &args).await
    }
}

fn describe(parameters: &RangeInclusive<usize>) -> String {
    if parameters.start() == parameters.end() {
        parameters.start().to_string()
    } else {
        format!("{} to {}", parameters.start(), parameters.end())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use anyhow::Context;
    use mockall::mock;

    use super::*;
    use crate::{
        base::{
            config::Config,
            event_log::EventLog,
            types::{MessageKind, Void},
        },
        service::{
            chat::{ChatClient, GenericChatClient},
            random::{GenericRandom, RandomClient},
        },
    };

    mock! {
        pub Chat {}

        #[async_trait]
        impl GenericChatClient for Chat {
            async fn resolve_message_channel(&self, channel_id: u64) -> Void;
            async fn send_message(&self, channel_id: u64, text: &str) -> Void;
        }
    }

    struct First;

    impl GenericRandom for First {
        fn pick_index(&self, _len: usize) -> usize {
            0
        }
    }

    pub(crate) fn runtime_with(chat: MockChat, commands: CommandService) -> Runtime {
        Runtime {
            config: Config::default(),
            logs: EventLog::new(),
            chat: ChatClient::new(Arc::new(chat)),
            commands: CommandClient::new(Arc::new(commands)),
            random: RandomClient::new(Arc::new(First)),
        }
    }

    pub(crate) fn message(content: &str) -> ChatMessage {
        ChatMessage {
            id: 10,
            channel_id: 20,
            guild_id: Some(30),
            author_id: 40,
            author_name: "dave".to_string(),
            content: content.to_string(),
            kind: MessageKind::User,
        }
    }

    struct Echo;

    #[async_trait]
    impl Command for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn summary(&self) -> &str {
            "Repeats its arguments."
        }

        fn parameters(&self) -> RangeInclusive<usize> {
            1..=3
        }

        async fn run(&self, context: &CommandContext, args: &[&str]) -> CommandResult {
            context.reply(&args.join(" ")).await
        }
    }

    struct Explode;

    #[async_trait]
    impl Command for Explode {
        fn name(&self) -> &str {
            "explode"
        }

        fn summary(&self) -> &str {
            "Always fails."
        }

        fn parameters(&self) -> RangeInclusive<usize> {
            0..=0
        }

        async fn run(&self, _context: &CommandContext, _args: &[&str]) -> CommandResult {
            Err::<(), _>(anyhow::anyhow!("disk on fire")).context("could not explode")?;
            Ok(())
        }
    }

    async fn execute(service: CommandService, chat: MockChat, content: &str) -> CommandResult {
        let runtime = runtime_with(chat, service.clone());
        let context = CommandContext::new(message(content), runtime);
        service.execute(&context, 1).await
    }

    #[tokio::test]
    async fn empty_registry_reports_unknown_command() {
        let result = execute(CommandService::new(), MockChat::new(), "-nonexistentcmd").await;

        assert!(matches!(result, Err(CommandError::UnknownCommand)));
    }

    #[tokio::test]
    async fn bare_prefix_is_unknown_command() {
        let result = execute(CommandService::new().with(Echo), MockChat::new(), "-").await;

        assert!(matches!(result, Err(CommandError::UnknownCommand)));
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive_and_passes_arguments() {
        let mut chat = MockChat::new();
        chat.expect_send_message().withf(|channel_id, text| *channel_id == 20 && text == "a b").times(1).returning(|_, _| Ok(()));

        let result = execute(CommandService::new().with(Echo), chat, "-ECHO a   b").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wrong_argument_count_is_reported() {
        let result = execute(CommandService::new().with(Echo), MockChat::new(), "-echo").await;

        match result {
            Err(CommandError::BadArgCount { command, expected, actual }) => {
                assert_eq!(command, "echo");
                assert_eq!(expected, "1 to 3");
                assert_eq!(actual, 0);
            }
            _ => panic!("expected a bad argument count"),
        }
    }

    #[tokio::test]
    async fn failing_command_is_an_exception_with_a_trace() {
        let result = execute(CommandService::new().with(Explode), MockChat::new(), "-explode").await;

        let error = result.unwrap_err();
        assert!(matches!(error, CommandError::Exception(_)));
        assert_eq!(error.to_string(), "could not explode");
        assert!(error.trace().unwrap().contains("Caused by: disk on fire"));
    }

    #[tokio::test]
    async fn send_failures_inside_commands_become_exceptions() {
        let mut chat = MockChat::new();
        chat.expect_send_message().returning(|_, _| Err(anyhow::anyhow!("network down")));

        let result = execute(CommandService::new().with(Echo), chat, "-echo hi").await;

        assert!(matches!(result, Err(CommandError::Exception(e)) if e.to_string() == "network down"));
    }

    #[test]
    fn only_exceptions_have_traces() {
        assert!(CommandError::UnknownCommand.trace().is_none());
        assert!(CommandError::ObjectNotFound("x".to_string()).trace().is_none());
        assert!(CommandError::from(anyhow::anyhow!("x")).trace().is_some());
    }

    #[test]
    fn catalog_lists_builtins_in_registration_order() {
        let names: Vec<String> = CommandService::with_builtins().catalog().into_iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["ping".to_string(), "help".to_string()]);
        assert!(CommandService::with_builtins().find("HELP").is_some());
    }
}
