use lazy_static::lazy_static;
use regex::Regex;

/// Words that mark an utterance as a request to dispatch the draft.
pub const SEND_KEYWORDS: [&str; 6] = ["send", "share", "mail", "forward", "deliver", "dispatch"];

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Confirmation(Confirmation),
    AttachmentRequest,
    SendIntent { recipient: Option<String> },
    Drafting,
}

/// Classifies an utterance. Checks run in priority order: a pending
/// confirmation swallows every utterance, then attachments, then send intent,
/// and anything else is a drafting instruction.
pub fn classify(user_input: &str, awaiting_confirmation: bool) -> Intent {
    if awaiting_confirmation {
        return Intent::Confirmation(parse_confirmation(user_input));
    }
    if is_attachment_request(user_input) {
        return Intent::AttachmentRequest;
    }
    if detect_send_intent(user_input) {
        return Intent::SendIntent {
            recipient: extract_email_address(user_input),
        };
    }
    Intent::Drafting
}

pub fn parse_confirmation(user_input: &str) -> Confirmation {
    match user_input.trim().to_lowercase().as_str() {
        "yes" | "y" => Confirmation::Confirmed,
        "no" | "n" | "cancel" => Confirmation::Cancelled,
        _ => Confirmation::Invalid,
    }
}

pub fn is_attachment_request(user_input: &str) -> bool {
    let lower = user_input.to_lowercase();
    lower.contains("attachment") || lower.contains("attach")
}

pub fn detect_send_intent(user_input: &str) -> bool {
    let lower = user_input.to_lowercase();
    SEND_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// First thing in the text that looks like an address.
pub fn extract_email_address(user_input: &str) -> Option<String> {
    EMAIL_PATTERN.find(user_input).map(|m| m.as_str().to_string())
}
