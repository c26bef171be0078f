//! Discord integration via serenity.
//!
//! Two halves live here:
//! - `DiscordChatClient`, the outbound side, implementing `GenericChatClient` over serenity's HTTP client.
//! - `GatewayHandler`, the inbound side, converting gateway events into `BotEvent`s for the dispatcher.

use std::{num::NonZeroU16, sync::Arc};

use async_trait::async_trait;
use serenity::all::{
    Channel, ChannelId, ChannelType, Client, Context, EventHandler, GatewayIntents, GuildId, Http, Member, Message, MessageType, Ready, ResumedEvent, User,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

use crate::base::{
    config::Config,
    types::{BotEvent, ChatMessage, MemberEvent, MessageKind, Res, Void},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the discord implementation.

impl ChatClient {
    /// Creates a Discord chat client on top of a serenity HTTP client.
    pub fn discord(http: Arc<Http>) -> Self {
        Self::new(Arc::new(DiscordChatClient { http }))
    }
}

// Outbound.

/// Discord client implementation.
struct DiscordChatClient {
    http: Arc<Http>,
}

#[async_trait]
impl GenericChatClient for DiscordChatClient {
    #[instrument(skip(self))]
    async fn resolve_message_channel(&self, channel_id: u64) -> Void {
        let channel = to_channel_id(channel_id)?.to_channel(self.http.as_ref()).await?;

        match channel {
            Channel::Private(_) => Ok(()),
            Channel::Guild(guild_channel) if holds_messages(guild_channel.kind) => Ok(()),
            _ => Err(anyhow::anyhow!("Channel `{}` cannot hold messages.", channel_id)),
        }
    }

    #[instrument(skip(self, text))]
    async fn send_message(&self, channel_id: u64, text: &str) -> Void {
        to_channel_id(channel_id)?
            .say(&self.http, text)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}

/// serenity ids panic on zero.
fn to_channel_id(channel_id: u64) -> Res<ChannelId> {
    if channel_id == 0 {
        return Err(anyhow::anyhow!("Channel id `0` is not a valid channel."));
    }

    Ok(ChannelId::new(channel_id))
}

fn holds_messages(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::Text
            | ChannelType::News
            | ChannelType::NewsThread
            | ChannelType::PublicThread
            | ChannelType::PrivateThread
            | ChannelType::Voice
            | ChannelType::Stage
    )
}

// Inbound.

/// Builds the serenity client, wired to publish events on `events`.
#[instrument(name = "discord::connect", skip_all)]
pub async fn connect(config: &Config, events: UnboundedSender<BotEvent>) -> Res<Client> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents and must be
    // enabled in the Discord Developer Portal.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = GatewayHandler::new(config.guild_id, events);

    let client = Client::builder(&config.discord_token, intents).event_handler(handler).await?;

    info!("Discord client built for guild {}.", config.guild_id);

    Ok(client)
}

/// serenity event handler that forwards gateway events to the dispatcher.
pub struct GatewayHandler {
    guild_id: u64,
    events: UnboundedSender<BotEvent>,
}

impl GatewayHandler {
    pub fn new(guild_id: u64, events: UnboundedSender<BotEvent>) -> Self {
        Self { guild_id, events }
    }

    fn publish(&self, event: BotEvent) {
        if self.events.send(event).is_err() {
            warn!("Dispatcher has shut down; dropping event.");
        }
    }

    /// Member events are only forwarded for the configured guild.
    fn publish_member_event(&self, guild_id: GuildId, event: BotEvent) {
        if guild_id.get() != self.guild_id {
            debug!("Ignoring member event from guild {}.", guild_id);
            return;
        }

        self.publish(event);
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.publish(BotEvent::Log(format!("{} is connected to Discord!", ready.user.name)));
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        self.publish(BotEvent::Log("Gateway session resumed.".to_string()));
    }

    async fn guild_member_addition(&self, _ctx: Context, new_member: Member) {
        self.publish_member_event(new_member.guild_id, BotEvent::MemberJoined(MemberEvent::from(&new_member.user)));
    }

    async fn guild_member_removal(&self, _ctx: Context, guild_id: GuildId, user: User, _member_data_if_available: Option<Member>) {
        self.publish_member_event(guild_id, BotEvent::MemberLeft(MemberEvent::from(&user)));
    }

    async fn message(&self, _ctx: Context, new_message: Message) {
        self.publish(BotEvent::MessageReceived(ChatMessage::from(&new_message)));
    }
}

// Conversions.

impl From<&User> for MemberEvent {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.get(),
            username: user.name.clone(),
            discriminator: user.discriminator.map(NonZeroU16::get).unwrap_or(0),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.get(),
            channel_id: message.channel_id.get(),
            guild_id: message.guild_id.map(|g| g.get()),
            author_id: message.author.id.get(),
            author_name: message.author.name.clone(),
            content: message.content.clone(),
            kind: message_kind(message.kind),
        }
    }
}

fn message_kind(kind: MessageType) -> MessageKind {
    match kind {
        MessageType::Regular | MessageType::InlineReply | MessageType::ChatInputCommand | MessageType::ContextMenuCommand => MessageKind::User,
        _ => MessageKind::System,
    }
}
