use regex::Regex;

const ADMIN_MENTION_PATTERN: &str = r"(?i)^\s*@admins?\b";

/// Matches messages that open with `@admin` or `@admins`.
///
/// The keyword must lead the message, so prefixed commands and ordinary
/// sentences mentioning it never escalate.
#[derive(Clone, Debug)]
pub struct AdminMentionTrigger {
    pattern: Regex,
}

impl AdminMentionTrigger {
    pub fn new() -> anyhow::Result<Self> {
        let pattern = Regex::new(ADMIN_MENTION_PATTERN)
            .map_err(|e| anyhow::anyhow!("invalid admin mention pattern: {e}"))?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

#[cfg(test)]
mod tests {
    use super::AdminMentionTrigger;

    #[test]
    fn matches_leading_keyword_case_insensitively() {
        let trigger = AdminMentionTrigger::new().unwrap();
        assert!(trigger.matches("@admin"));
        assert!(trigger.matches("@ADMINS this is spam"));
        assert!(trigger.matches("  @Admin!"));
    }

    #[test]
    fn ignores_mid_sentence_mentions() {
        let trigger = AdminMentionTrigger::new().unwrap();
        assert!(!trigger.matches("hey @admins this is spam"));
        assert!(!trigger.matches("I emailed the @administrator yesterday"));
    }

    #[test]
    fn ignores_longer_words_and_commands() {
        let trigger = AdminMentionTrigger::new().unwrap();
        assert!(!trigger.matches("@administrator"));
        assert!(!trigger.matches("@adminship"));
        assert!(!trigger.matches("admin please"));
        assert!(!trigger.matches("@adm"));
        assert!(!trigger.matches("!request @admin"));
    }
}
