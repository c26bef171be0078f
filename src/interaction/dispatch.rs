//! Dispatch loop between the gateway and the event handlers.

use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle};
use tracing::{info, instrument};

use crate::{base::types::BotEvent, runtime::Runtime};

use super::{log::handle_log, member, message::handle_message};

/// Routes each `BotEvent` to its handler.
///
/// Every event runs as its own task, so a slow send for one member never holds
/// up another event.
#[derive(Clone)]
pub struct Dispatcher {
    runtime: Runtime,
}

impl Dispatcher {
    pub fn new(runtime: Runtime) -> Self {
        Self { runtime }
    }

    /// Spawns the handler for one event.
    pub fn dispatch(&self, event: BotEvent) -> JoinHandle<()> {
        let runtime = self.runtime.clone();

        match event {
            BotEvent::Log(message) => handle_log(message),
            BotEvent::MemberLeft(event) => member::handle_member_left(event, runtime),
            BotEvent::MemberJoined(event) => member::handle_member_joined(event, runtime),
            BotEvent::MessageReceived(message) => handle_message(message, runtime),
        }
    }

    /// Consumes events until every sender has been dropped.
    #[instrument(name = "Dispatcher::run", skip_all)]
    pub async fn run(self, mut events: UnboundedReceiver<BotEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event);
        }

        info!("Event stream closed; dispatcher stopping.");
    }
}
