/// Parse an on/off style toggle. Anything unrecognised yields `None`.
pub fn parse_toggle(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Parse a channel mention (`<#123>`) or a raw channel id.
pub fn parse_channel_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id);
    }

    if raw.starts_with("<#") && raw.ends_with('>') {
        return raw
            .trim_start_matches("<#")
            .trim_end_matches('>')
            .parse::<u64>()
            .ok();
    }

    None
}

/// Parse a comma or whitespace separated list of ids, skipping invalid entries.
pub fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.parse::<u64>().ok())
        .collect()
}

/// True when the message carries text beyond its first token (e.g. a reason after `!request`).
pub fn has_trailing_text(content: &str) -> bool {
    content.split_whitespace().nth(1).is_some()
}
