//! Discord-backed collaborators for the request flow.

use std::collections::HashSet;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use herald_utils::embed::DEFAULT_EMBED_COLOR;
use herald_utils::formatting::neutralize_mentions;
use herald_utils::permissions::{ADMIN_PERMISSIONS, grants};

use super::notification::message_link;
use super::ports::{
    AdminDirectory, AdminMember, ChatInfo, ChatKind, DeliveryOutcome, MessageRef, MessageSender,
    RequestEvent, TriggerKind, UserRef,
};

const MEMBER_PAGE_SIZE: u64 = 1000;
const NOTIFICATION_TITLE: &str = "Admin Request";

/// Discord JSON error codes meaning the recipient cannot be messaged.
const CANNOT_MESSAGE_USER: isize = 50007;
const MISSING_PERMISSIONS: isize = 50013;
const UNKNOWN_USER: isize = 10013;

pub struct DiscordAdminDirectory<'a> {
    http: &'a serenity::Http,
}

impl<'a> DiscordAdminDirectory<'a> {
    pub fn new(http: &'a serenity::Http) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AdminDirectory for DiscordAdminDirectory<'_> {
    async fn list_admins(&self, chat_id: u64) -> anyhow::Result<Vec<AdminMember>> {
        let guild_id = serenity::GuildId::new(chat_id);
        let guild = guild_id.to_partial_guild(self.http).await?;

        let admin_roles: HashSet<serenity::RoleId> = guild
            .roles
            .values()
            .filter(|role| grants(role.permissions, ADMIN_PERMISSIONS))
            .map(|role| role.id)
            .collect();
        let everyone_role_id = serenity::RoleId::new(chat_id);
        let everyone_is_admin = admin_roles.contains(&everyone_role_id);

        let mut admins = Vec::new();
        let mut after: Option<serenity::UserId> = None;

        loop {
            let page = guild_id
                .members(self.http, Some(MEMBER_PAGE_SIZE), after)
                .await?;

            admins.extend(
                page.iter()
                    .filter(|member| {
                        everyone_is_admin
                            || member.user.id == guild.owner_id
                            || member.roles.iter().any(|role| admin_roles.contains(role))
                    })
                    .map(|member| AdminMember {
                        user_id: member.user.id.get(),
                        is_bot: member.user.bot,
                    }),
            );

            if (page.len() as u64) < MEMBER_PAGE_SIZE {
                break;
            }
            after = page.last().map(|member| member.user.id);
        }

        Ok(admins)
    }
}

pub struct DiscordMessageSender<'a> {
    http: &'a serenity::Http,
    link_base: &'a str,
}

impl<'a> DiscordMessageSender<'a> {
    pub fn new(http: &'a serenity::Http, link_base: &'a str) -> Self {
        Self { http, link_base }
    }

    async fn send_dm(&self, user_id: u64, message: serenity::CreateMessage) -> DeliveryOutcome {
        let channel = match serenity::UserId::new(user_id)
            .create_dm_channel(self.http)
            .await
        {
            Ok(channel) => channel,
            Err(source) => return classify_delivery_error(&source, user_id),
        };

        match channel.send_message(self.http, message).await {
            Ok(_) => DeliveryOutcome::Delivered,
            Err(source) => classify_delivery_error(&source, user_id),
        }
    }
}

#[async_trait]
impl MessageSender for DiscordMessageSender<'_> {
    async fn send_direct(&self, user_id: u64, text: &str, formatted: bool) -> DeliveryOutcome {
        let message = if formatted {
            serenity::CreateMessage::new().embed(
                serenity::CreateEmbed::new()
                    .title(NOTIFICATION_TITLE)
                    .color(DEFAULT_EMBED_COLOR)
                    .description(text),
            )
        } else {
            serenity::CreateMessage::new()
                .content(text)
                .allowed_mentions(serenity::CreateAllowedMentions::new())
        };

        self.send_dm(user_id, message).await
    }

    /// Re-posts the message content with a jump link back to the original.
    async fn forward_message(&self, message: &MessageRef, to_user_id: u64) -> DeliveryOutcome {
        let embed = forwarded_message_embed(message, self.link_base);
        self.send_dm(to_user_id, serenity::CreateMessage::new().embed(embed))
            .await
    }

    async fn reply(&self, to: &MessageRef, text: &str) -> DeliveryOutcome {
        let reply = serenity::CreateMessage::new()
            .content(text)
            .reference_message((
                serenity::ChannelId::new(to.channel_id),
                serenity::MessageId::new(to.message_id),
            ))
            .allowed_mentions(serenity::CreateAllowedMentions::new());

        match serenity::ChannelId::new(to.channel_id)
            .send_message(self.http, reply)
            .await
        {
            Ok(_) => DeliveryOutcome::Delivered,
            Err(source) => classify_delivery_error(&source, to.author.id),
        }
    }
}

fn forwarded_message_embed(message: &MessageRef, link_base: &str) -> serenity::CreateEmbed {
    let link = message_link(
        link_base,
        &format!("{}/{}", message.chat_id, message.channel_id),
        message.message_id,
    );

    let mut description = if message.content.trim().is_empty() {
        "*No text content.*".to_owned()
    } else {
        neutralize_mentions(&message.content)
    };

    for url in &message.attachment_urls {
        description.push('\n');
        description.push_str(url);
    }

    serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .author(serenity::CreateEmbedAuthor::new(format!(
            "Forwarded from {}",
            message.author.display_name
        )))
        .description(description)
        .field("Original", format!("[Jump to message]({link})"), false)
}

/// Split delivery failures into recipients we cannot reach and everything else.
pub fn classify_delivery_error(source: &serenity::Error, recipient_id: u64) -> DeliveryOutcome {
    if is_unreachable_recipient(source) {
        debug!(recipient_id, "request recipient unreachable");
        DeliveryOutcome::Unreachable
    } else {
        warn!(?source, recipient_id, "request delivery rejected");
        DeliveryOutcome::Rejected
    }
}

fn is_unreachable_recipient(source: &serenity::Error) -> bool {
    match source {
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) => {
            classify_response(response.status_code.as_u16(), response.error.code)
                == DeliveryOutcome::Unreachable
        }
        _ => false,
    }
}

fn classify_response(status: u16, code: isize) -> DeliveryOutcome {
    if status == 403 || matches!(code, CANNOT_MESSAGE_USER | MISSING_PERMISSIONS | UNKNOWN_USER) {
        DeliveryOutcome::Unreachable
    } else {
        DeliveryOutcome::Rejected
    }
}

pub fn user_ref(user: &serenity::User) -> UserRef {
    UserRef {
        id: user.id.get(),
        display_name: user
            .global_name
            .clone()
            .unwrap_or_else(|| user.name.clone()),
    }
}

pub fn message_ref(guild_id: serenity::GuildId, message: &serenity::Message) -> MessageRef {
    MessageRef {
        chat_id: guild_id.get(),
        channel_id: message.channel_id.get(),
        message_id: message.id.get(),
        author: user_ref(&message.author),
        content: message.content.clone(),
        attachment_urls: message
            .attachments
            .iter()
            .map(|attachment| attachment.url.clone())
            .collect(),
    }
}

/// A guild counts as channel-style when it is publicly reachable.
pub fn chat_info(
    guild: &serenity::PartialGuild,
    channel_id: serenity::ChannelId,
) -> ChatInfo {
    let public = guild.vanity_url_code.is_some()
        || guild.features.iter().any(|feature| feature == "DISCOVERABLE");

    if public {
        ChatInfo {
            id: guild.id.get(),
            title: guild.name.clone(),
            handle: Some(format!("{}/{}", guild.id.get(), channel_id.get())),
            kind: ChatKind::Channel,
        }
    } else {
        ChatInfo {
            id: guild.id.get(),
            title: guild.name.clone(),
            handle: None,
            kind: ChatKind::Group,
        }
    }
}

/// Build a request from a guild message. Returns `None` outside guilds.
pub async fn request_event_from_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    trigger: TriggerKind,
    has_reason: bool,
) -> anyhow::Result<Option<RequestEvent>> {
    let Some(guild_id) = message.guild_id else {
        return Ok(None);
    };

    let guild = guild_id.to_partial_guild(&ctx.http).await?;

    Ok(Some(RequestEvent {
        trigger,
        reporter: user_ref(&message.author),
        chat: chat_info(&guild, message.channel_id),
        message: message_ref(guild_id, message),
        replied_to: message
            .referenced_message
            .as_deref()
            .map(|replied| message_ref(guild_id, replied)),
        bot_user_id: ctx.cache.current_user().id.get(),
        has_reason,
    }))
}
