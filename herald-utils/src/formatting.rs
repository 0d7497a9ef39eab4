/// Escape Discord markdown control characters so user-provided names render verbatim.
pub fn escape_markdown(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '*' | '_' | '`' | '~' | '|' | '>' | '[' | ']' | '(' | ')' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Break `@` so forwarded text cannot ping `@everyone` or roles.
pub fn neutralize_mentions(raw: &str) -> String {
    raw.replace('@', "@\u{200B}")
}

/// Render a user as `**Name** (`id`)`.
pub fn format_user_label(display_name: &str, user_id: u64) -> String {
    format!("**{}** (`{}`)", escape_markdown(display_name), user_id)
}

/// Render a flag the way settings replies show it, as a literal `true`/`false` code span.
pub fn format_flag(value: bool) -> String {
    format!("`{value}`")
}

/// Convert a command category key to its display form ("requests" -> "Requests").
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        display_category, escape_markdown, format_flag, format_user_label, neutralize_mentions,
    };

    #[test]
    fn escapes_markdown_characters() {
        assert_eq!(escape_markdown("plain"), "plain");
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("a_b`c"), "a\\_b\\`c");
        assert_eq!(escape_markdown("[x](y)"), "\\[x\\]\\(y\\)");
    }

    #[test]
    fn mentions_are_broken_up() {
        assert_eq!(neutralize_mentions("@everyone"), "@\u{200B}everyone");
        assert_eq!(neutralize_mentions("no pings"), "no pings");
    }

    #[test]
    fn user_labels_include_escaped_name_and_id() {
        assert_eq!(format_user_label("alice", 7), "**alice** (`7`)");
        assert_eq!(format_user_label("a*b", 8), "**a\\*b** (`8`)");
    }

    #[test]
    fn flags_render_as_literals() {
        assert_eq!(format_flag(true), "`true`");
        assert_eq!(format_flag(false), "`false`");
    }

    #[test]
    fn categories_are_capitalized() {
        assert_eq!(display_category("requests"), "Requests");
        assert_eq!(display_category(""), "");
    }
}
