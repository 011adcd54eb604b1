use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::attachment::Attachment;

/// Marker the drafting model is told to put before the subject line.
pub const SUBJECT_MARKER: &str = "Subject:";
/// Subject used when the model response carries no usable subject line.
pub const PLACEHOLDER_SUBJECT: &str = "Email from AI Assistant";

/// Subject and body recovered from a drafting response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    pub subject: String,
    pub body: String,
}

impl ParsedEmail {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        ParsedEmail {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Splits generated text into subject and body.
    ///
    /// The first `Subject:` marker wins. Text after it is trimmed; the first line
    /// becomes the subject and the rest the body. Without a marker, or without a
    /// line break after it, the placeholder subject is used and everything
    /// available becomes the body. An empty body is returned as-is.
    pub fn parse(raw: &str) -> Self {
        let Some(pos) = raw.find(SUBJECT_MARKER) else {
            return ParsedEmail::new(PLACEHOLDER_SUBJECT, raw);
        };

        let subject_and_body = raw[pos + SUBJECT_MARKER.len()..].trim();
        match subject_and_body.split_once('\n') {
            Some((subject, body)) => ParsedEmail::new(subject.trim(), body.trim()),
            None => ParsedEmail::new(PLACEHOLDER_SUBJECT, subject_and_body),
        }
    }

    /// Both halves are present; required before a send can be confirmed.
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Chat rendering of a fresh draft.
    pub fn format_reply(&self) -> String {
        format!("**Subject:** {}\n\n{}\n\n", self.subject, self.body)
    }
}

/// A fully resolved message ready for the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

impl fmt::Display for OutgoingEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Email:")?;
        writeln!(f, "  To: {}", self.recipient)?;
        writeln!(f, "  Subject: {}", self.subject)?;
        writeln!(f, "  Attachments: {}", self.attachments.len())?;
        Ok(())
    }
}
