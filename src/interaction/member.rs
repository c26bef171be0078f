//! Membership changes: log every join and leave, greet every join.

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::{
    base::{
        replies,
        types::{LogEntry, LogEvent, MemberEvent},
    },
    prelude::*,
    runtime::Runtime,
};

/// Records a member leaving the guild.
#[instrument(skip_all)]
pub fn handle_member_left(member: MemberEvent, runtime: Runtime) -> JoinHandle<()> {
    tokio::spawn(
        async move {
            runtime.logs.append(LogEntry::now(LogEvent::UserLeave, &member));

            info!("User {} ({}) left.", member.username, member.user_id);
        }
        .in_current_span(),
    )
}

/// Records a member joining the guild and posts a welcome message.
///
/// Spawns a new task; the returned handle completes once the greeting has
/// been sent or has failed.
#[instrument(skip_all)]
pub fn handle_member_joined(member: MemberEvent, runtime: Runtime) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Process the event.
        let result = handle_member_joined_internal(member, &runtime).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    })
}

#[instrument(skip_all)]
async fn handle_member_joined_internal(member: MemberEvent, runtime: &Runtime) -> Void {
    // The entry is kept even if the greeting fails below.
    runtime.logs.append(LogEntry::now(LogEvent::UserJoin, &member));

    info!("User {} ({}) joined.", member.username, member.user_id);

    let channel_id = runtime.config.welcome_channel_id;
    runtime.chat.resolve_message_channel(channel_id).await?;

    let greetings = &runtime.config.welcome_messages;
    if greetings.is_empty() {
        return Err(anyhow!("No welcome messages are configured."));
    }

    let index = runtime.random.pick_index(greetings.len());
    let template = greetings
        .get(index)
        .ok_or_else(|| anyhow!("Picked welcome message {} of {}.", index, greetings.len()))?;

    runtime.chat.send_message(channel_id, &replies::welcome(template, member.user_id)).await?;

    Ok(())
}
