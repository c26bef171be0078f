//! Routes prefixed chat messages into the command subsystem.

use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, instrument};

use crate::{
    base::{
        replies,
        types::{ChatMessage, MessageKind, Void},
    },
    runtime::Runtime,
    service::command::{CommandContext, CommandError},
};

/// Handles a message received in any channel the bot can see.
///
/// Spawns a new task; the returned handle completes once the command (and any
/// error reply) has finished.
#[instrument(skip_all)]
pub fn handle_message(message: ChatMessage, runtime: Runtime) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Process the event.
        let result = handle_message_internal(message, &runtime).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    })
}

#[instrument(skip_all)]
async fn handle_message_internal(message: ChatMessage, runtime: &Runtime) -> Void {
    if message.kind != MessageKind::User {
        return Ok(());
    }

    let Some(arg_pos) = message.char_prefix(runtime.config.command_prefix) else {
        return Ok(());
    };

    let channel_id = message.channel_id;
    let context = CommandContext::new(message, runtime.clone());

    let Err(error) = runtime.commands.execute(&context, arg_pos).await else {
        return Ok(());
    };

    debug!("Command failed: {}", error);

    if let Some(reply) = error_reply(&error, runtime.config.show_stack_trace) {
        runtime.chat.send_message(channel_id, &reply).await?;
    }

    Ok(())
}

/// The reply for a failed command, or `None` when the failure stays silent.
pub fn error_reply(error: &CommandError, show_stack_trace: bool) -> Option<String> {
    match error {
        CommandError::UnknownCommand => None,
        CommandError::Exception(_) if show_stack_trace => Some(replies::exception(&error.to_string(), &error.trace().unwrap_or_default())),
        _ => Some(replies::generic_error(&error.to_string())),
    }
}
