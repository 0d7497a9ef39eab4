use tracing::{debug, info, warn};

use herald_core::RequestPolicy;

use super::notification::{Notification, acknowledgement, build_notification};
use super::ports::{
    AdminDirectory, DeliveryOutcome, MessageRef, MessageSender, RequestEvent, SettingsStore,
};

pub const SELF_REQUEST_REPLY: &str = "Uh yeah, sure.";
pub const BOT_REQUEST_REPLY: &str = "Nice try.";
pub const IMMUNE_REQUEST_REPLY: &str = "Uh? You're requesting a whitelisted user?";

/// Per-event tally of the admin fan-out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FanOutSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub unreachable: usize,
    pub rejected: usize,
}

impl FanOutSummary {
    fn record(&mut self, outcome: DeliveryOutcome) {
        self.attempted += 1;
        match outcome {
            DeliveryOutcome::Delivered => self.delivered += 1,
            DeliveryOutcome::Unreachable => self.unreachable += 1,
            DeliveryOutcome::Rejected => self.rejected += 1,
        }
    }
}

/// Validates a request and relays it to every opted-in admin of the chat.
pub struct RequestHandler<'a> {
    pub store: &'a dyn SettingsStore,
    pub admins: &'a dyn AdminDirectory,
    pub sender: &'a dyn MessageSender,
    pub policy: &'a RequestPolicy,
}

impl RequestHandler<'_> {
    /// Returns the notification text, or an empty string when the request was not sent.
    pub async fn handle(&self, event: &RequestEvent) -> anyhow::Result<String> {
        let Some(flagged) = event.replied_to.as_ref() else {
            return Ok(String::new());
        };

        if !self.store.chat_flag(event.chat.id).await? {
            return Ok(String::new());
        }

        let target = &flagged.author;

        if event.reporter.id == target.id {
            self.reject(event, SELF_REQUEST_REPLY).await;
            return Ok(String::new());
        }

        if target.id == event.bot_user_id {
            self.reject(event, BOT_REQUEST_REPLY).await;
            return Ok(String::new());
        }

        if self.policy.is_immune(target.id) {
            self.reject(event, IMMUNE_REQUEST_REPLY).await;
            return Ok(String::new());
        }

        let notification =
            build_notification(&event.chat, &event.reporter, flagged, &self.policy.link_base);

        let summary = self.fan_out(event, flagged, &notification).await?;

        let ack = self
            .sender
            .reply(&event.message, &acknowledgement(&event.reporter, target))
            .await;
        if !ack.is_delivered() {
            debug!(
                ?ack,
                chat_id = event.chat.id,
                "request acknowledgement not delivered"
            );
        }

        info!(
            chat_id = event.chat.id,
            reporter_id = event.reporter.id,
            target_id = target.id,
            trigger = event.trigger.as_str(),
            attempted = summary.attempted,
            delivered = summary.delivered,
            unreachable = summary.unreachable,
            rejected = summary.rejected,
            "request relayed to admins"
        );

        Ok(notification.text)
    }

    async fn reject(&self, event: &RequestEvent, text: &str) {
        let outcome = self.sender.reply(&event.message, text).await;
        debug!(
            ?outcome,
            chat_id = event.chat.id,
            reporter_id = event.reporter.id,
            "request rejected"
        );
    }

    async fn fan_out(
        &self,
        event: &RequestEvent,
        flagged: &MessageRef,
        notification: &Notification,
    ) -> anyhow::Result<FanOutSummary> {
        let admins = self.admins.list_admins(event.chat.id).await?;
        let mut summary = FanOutSummary::default();

        for admin in admins {
            // Bots cannot receive DMs.
            if admin.is_bot {
                continue;
            }

            if !self.store.user_flag(admin.user_id).await? {
                continue;
            }

            let outcome = self
                .sender
                .send_direct(admin.user_id, &notification.text, true)
                .await;
            summary.record(outcome);

            if !outcome.is_delivered() {
                continue;
            }

            if notification.forward_original {
                let forwarded = self.sender.forward_message(flagged, admin.user_id).await;
                if !forwarded.is_delivered() {
                    warn!(
                        ?forwarded,
                        admin_id = admin.user_id,
                        "failed to forward requested message"
                    );
                    continue;
                }

                if event.has_reason {
                    let forwarded = self
                        .sender
                        .forward_message(&event.message, admin.user_id)
                        .await;
                    if !forwarded.is_delivered() {
                        warn!(
                            ?forwarded,
                            admin_id = admin.user_id,
                            "failed to forward request reason"
                        );
                    }
                }
            }
        }

        Ok(summary)
    }
}
