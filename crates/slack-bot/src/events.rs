//! Slack Events API envelope types.

use serde::Deserialize;

/// Outer envelope of an Events API request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Endpoint ownership handshake sent when the request URL is configured.
    UrlVerification { challenge: String },

    /// A subscribed workspace event.
    EventCallback { event: InnerEvent },

    /// Any envelope type this bot does not act on (e.g. `app_rate_limited`).
    #[serde(other)]
    Other,
}

/// Event carried inside an `event_callback` envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InnerEvent {
    Message(MessageEvent),

    #[serde(other)]
    Other,
}

/// A channel message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageEvent {
    pub channel: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub user: Option<String>,

    /// Set when the message was posted by a bot, including this one.
    #[serde(default)]
    pub bot_id: Option<String>,

    /// Set for edits, joins, deletions and other non-plain messages.
    #[serde(default)]
    pub subtype: Option<String>,

    #[serde(default)]
    pub ts: Option<String>,
}

/// What the webhook should do with a parsed envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Answer the handshake by echoing the challenge.
    Challenge(String),

    /// Route the message text to the command router.
    Message(MessageEvent),

    /// Acknowledge without acting.
    Ignore,
}

impl Envelope {
    pub fn dispatch(self) -> Dispatch {
        match self {
            Envelope::UrlVerification { challenge } => Dispatch::Challenge(challenge),
            Envelope::EventCallback {
                event: InnerEvent::Message(message),
            } if message.bot_id.is_none() && message.subtype.is_none() => {
                Dispatch::Message(message)
            }
            Envelope::EventCallback { .. } | Envelope::Other => Dispatch::Ignore,
        }
    }
}

/// Decode a raw request body into an envelope.
pub fn parse(body: &[u8]) -> Result<Envelope, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_verification() {
        let body = br#"{"type":"url_verification","token":"t","challenge":"abc123"}"#;
        let envelope = parse(body).unwrap();

        assert_eq!(envelope.dispatch(), Dispatch::Challenge("abc123".into()));
    }

    #[test]
    fn test_message_callback() {
        let body = br#"{
            "type": "event_callback",
            "team_id": "T1",
            "event": {
                "type": "message",
                "channel": "C123",
                "user": "U1",
                "text": "image cat",
                "ts": "1700000000.000100"
            }
        }"#;

        match parse(body).unwrap().dispatch() {
            Dispatch::Message(message) => {
                assert_eq!(message.channel, "C123");
                assert_eq!(message.text, "image cat");
                assert_eq!(message.user.as_deref(), Some("U1"));
            }
            other => panic!("unexpected dispatch: {:?}", other),
        }
    }

    #[test]
    fn test_message_without_text_defaults_to_empty() {
        let body = br#"{"type":"event_callback","event":{"type":"message","channel":"C1"}}"#;

        match parse(body).unwrap().dispatch() {
            Dispatch::Message(message) => assert!(message.text.is_empty()),
            other => panic!("unexpected dispatch: {:?}", other),
        }
    }

    #[test]
    fn test_bot_and_subtype_messages_ignored() {
        let from_bot = br#"{
            "type": "event_callback",
            "event": {"type": "message", "channel": "C1", "text": "world", "bot_id": "B1"}
        }"#;
        let edited = br#"{
            "type": "event_callback",
            "event": {"type": "message", "channel": "C1", "subtype": "message_changed"}
        }"#;

        assert_eq!(parse(from_bot).unwrap().dispatch(), Dispatch::Ignore);
        assert_eq!(parse(edited).unwrap().dispatch(), Dispatch::Ignore);
    }

    #[test]
    fn test_other_inner_event_ignored() {
        let body = br#"{
            "type": "event_callback",
            "event": {"type": "reaction_added", "reaction": "+1"}
        }"#;

        let envelope = parse(body).unwrap();
        assert_eq!(
            envelope,
            Envelope::EventCallback {
                event: InnerEvent::Other
            }
        );
        assert_eq!(envelope.dispatch(), Dispatch::Ignore);
    }

    #[test]
    fn test_unknown_envelope_type_ignored() {
        let body = br#"{"type":"app_rate_limited","minute_rate_limited":1}"#;
        let envelope = parse(body).unwrap();
        assert_eq!(envelope, Envelope::Other);
        assert_eq!(envelope.dispatch(), Dispatch::Ignore);
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        let payloads: [&[u8]; 6] = [
            b"not json",
            b"",
            br#"{"challenge":"abc"}"#,
            br#"{"type":"url_verification"}"#,
            br#"{"type":"event_callback"}"#,
            br#"{"type":"event_callback","event":{"type":"message"}}"#,
        ];

        for payload in payloads {
            let text = String::from_utf8_lossy(payload);
            assert!(parse(payload).is_err(), "accepted {}", text);
        }
    }
}
