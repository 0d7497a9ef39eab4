use herald_utils::formatting::{escape_markdown, format_user_label};

use super::ports::{ChatInfo, MessageRef, UserRef};

/// What gets DM'd to each opted-in admin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    /// Plain notifications carry no link, so the flagged message is forwarded instead.
    pub forward_original: bool,
}

pub fn message_link(link_base: &str, handle: &str, message_id: u64) -> String {
    format!(
        "{}/{}/{}",
        link_base.trim_end_matches('/'),
        handle.trim_matches('/'),
        message_id
    )
}

pub fn build_notification(
    chat: &ChatInfo,
    reporter: &UserRef,
    flagged: &MessageRef,
    link_base: &str,
) -> Notification {
    let title = escape_markdown(&chat.title);

    match chat.link_handle() {
        Some(handle) => {
            let link = message_link(link_base, handle, flagged.message_id);
            let text = format!(
                "**{}:**\n\
                 **Requested user:** {}\n\
                 **Requested by:** {}\n\
                 **Link:** [click here]({})",
                title,
                format_user_label(&flagged.author.display_name, flagged.author.id),
                format_user_label(&reporter.display_name, reporter.id),
                link,
            );

            Notification {
                text,
                forward_original: false,
            }
        }
        None => Notification {
            text: format!(
                "{} is calling for admins in \"{}\"!",
                format_user_label(&reporter.display_name, reporter.id),
                title
            ),
            forward_original: true,
        },
    }
}

/// Public reply in the chat once a request goes out.
pub fn acknowledgement(reporter: &UserRef, target: &UserRef) -> String {
    format!(
        "**{}** requested **{}** to the admins!",
        escape_markdown(&reporter.display_name),
        escape_markdown(&target.display_name)
    )
}

#[cfg(test)]
mod tests {
    use super::{acknowledgement, build_notification, message_link};
    use crate::escalation::ports::{ChatInfo, ChatKind, MessageRef, UserRef};

    fn user(id: u64, name: &str) -> UserRef {
        UserRef {
            id,
            display_name: name.to_owned(),
        }
    }

    fn flagged(message_id: u64) -> MessageRef {
        MessageRef {
            chat_id: 1,
            channel_id: 2,
            message_id,
            author: user(20, "spammer"),
            content: "buy now".to_owned(),
            attachment_urls: Vec::new(),
        }
    }

    #[test]
    fn links_join_without_double_slashes() {
        assert_eq!(message_link("https://t.me/", "mychat", 42), "https://t.me/mychat/42");
        assert_eq!(
            message_link("https://discord.com/channels", "1/2", 3),
            "https://discord.com/channels/1/2/3"
        );
    }

    #[test]
    fn channel_chats_get_a_rich_linked_notification() {
        let chat = ChatInfo {
            id: 1,
            title: "My Chat".to_owned(),
            handle: Some("mychat".to_owned()),
            kind: ChatKind::Channel,
        };

        let notification =
            build_notification(&chat, &user(10, "reporter"), &flagged(42), "https://t.me");

        assert!(!notification.forward_original);
        assert!(notification.text.starts_with("**My Chat:**"));
        assert!(notification.text.contains("**Requested user:** **spammer** (`20`)"));
        assert!(notification.text.contains("**Requested by:** **reporter** (`10`)"));
        assert!(notification.text.contains("(https://t.me/mychat/42)"));
    }

    #[test]
    fn groups_get_a_plain_notification_and_forwarding() {
        let chat = ChatInfo {
            id: 1,
            title: "Friends".to_owned(),
            handle: None,
            kind: ChatKind::Group,
        };

        let notification =
            build_notification(&chat, &user(10, "reporter"), &flagged(42), "https://t.me");

        assert!(notification.forward_original);
        assert_eq!(
            notification.text,
            "**reporter** (`10`) is calling for admins in \"Friends\"!"
        );
        assert!(!notification.text.contains("https://"));
    }

    #[test]
    fn handle_is_ignored_outside_channel_chats() {
        let chat = ChatInfo {
            id: 1,
            title: "Friends".to_owned(),
            handle: Some("friends".to_owned()),
            kind: ChatKind::Group,
        };

        let notification =
            build_notification(&chat, &user(10, "reporter"), &flagged(42), "https://t.me");
        assert!(notification.forward_original);
    }

    #[test]
    fn acknowledgement_names_both_users() {
        assert_eq!(
            acknowledgement(&user(1, "a_b"), &user(2, "c")),
            "**a\\_b** requested **c** to the admins!"
        );
    }
}
