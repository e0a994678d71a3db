use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a bot action as reported on the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Chat,
    Command,
    Timeout,
    Ban,
    Raid,
    Redeem,
    System,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Chat => "chat",
            EventKind::Command => "command",
            EventKind::Timeout => "timeout",
            EventKind::Ban => "ban",
            EventKind::Raid => "raid",
            EventKind::Redeem => "redeem",
            EventKind::System => "system",
        }
    }
}

/// One record on the JSON-lines feed. Producers may omit `detail` and
/// `timestamp`; a missing timestamp defaults to the time of receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotEvent {
    pub channel: String,
    pub kind: EventKind,
    pub actor: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl BotEvent {
    pub fn format_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    pub fn summary(&self) -> String {
        if self.detail.is_empty() {
            format!("{} {}", self.kind.as_str(), self.actor)
        } else {
            format!("{} {}: {}", self.kind.as_str(), self.actor, self.detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_record() {
        let line = r##"{"channel":"#demo","kind":"timeout","actor":"mod_bot","detail":"spam (600s)","timestamp":"2026-08-01T12:30:00Z"}"##;
        let event: BotEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.channel, "#demo");
        assert_eq!(event.kind, EventKind::Timeout);
        assert_eq!(event.actor, "mod_bot");
        assert_eq!(event.detail, "spam (600s)");
        assert_eq!(event.format_time(), "12:30:00");
    }

    #[test]
    fn missing_timestamp_defaults_to_receipt_time() {
        let before = Utc::now();
        let line = r##"{"channel":"#demo","kind":"chat","actor":"viewer42"}"##;
        let event: BotEvent = serde_json::from_str(line).unwrap();
        assert!(event.timestamp >= before);
        assert!(event.detail.is_empty());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let line = r##"{"channel":"#demo","kind":"teleport","actor":"x"}"##;
        assert!(serde_json::from_str::<BotEvent>(line).is_err());
    }

    #[test]
    fn summary_omits_empty_detail() {
        let line = r##"{"channel":"#demo","kind":"raid","actor":"friendly_streamer"}"##;
        let event: BotEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.summary(), "raid friendly_streamer");
    }
}
