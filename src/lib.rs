//! Library root for `tu20-bot`.
//!
//! tu20-bot is a small Discord community bot designed to:
//! - Greet new members of its guild with a randomly chosen welcome message
//! - Keep an in-memory log of members joining and leaving
//! - Route `-`-prefixed messages to a command subsystem, replying when a command fails
//!
//! The bot integrates with Discord through serenity. The gateway publishes
//! events onto a channel, and a dispatch loop hands each one to its handler.
//! Handlers reach the outside world only through service traits, so every one
//! of them can be driven against mocks.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use interaction::dispatch::Dispatcher;
use runtime::Runtime;
use service::chat::{ChatClient, discord};
use tokio::sync::mpsc;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the bot:
/// - Builds the serenity client and its gateway event handler
/// - Creates the runtime context with the chat client, commands and event log
/// - Starts the dispatch loop and runs the gateway until it stops or Ctrl-C arrives
pub async fn start(config: Config) -> Void {
    info!("Starting tu20-bot ...");

    // Connect the gateway to the dispatcher.
    let (events, receiver) = mpsc::unbounded_channel();
    let mut client = discord::connect(&config, events).await?;

    // Initialize the runtime.
    let runtime = Runtime::new(config, ChatClient::discord(client.http.clone()));

    // Start the dispatch loop.
    tokio::spawn(Dispatcher::new(runtime).run(receiver));

    // Run the gateway.
    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        result = client.start() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down ...");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}
