pub mod discord;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the outbound operations the bot performs against the
/// chat platform. Implementing this trait allows the handlers to be driven
/// against a mock in tests.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Check that a channel exists and can hold text messages.
    ///
    /// Fails if the id does not resolve, or resolves to a channel kind that
    /// cannot receive messages (categories, forums, ...).
    async fn resolve_message_channel(&self, channel_id: u64) -> Void;

    /// Send a plain text message to a channel.
    async fn send_message(&self, channel_id: u64, text: &str) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
