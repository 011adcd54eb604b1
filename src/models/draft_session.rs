use std::mem;
use serde::Serialize;
use crate::models::assistant_error::AssistantError;
use crate::models::attachment::Attachment;
use crate::models::conversation::ConversationTurn;
use crate::models::email::{OutgoingEmail, ParsedEmail};

/// Where a session stands with respect to its draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DraftState {
    #[default]
    Idle,
    Drafted {
        draft: ParsedEmail,
    },
    /// Only entered with a complete draft and a non-empty recipient.
    AwaitingConfirmation {
        draft: ParsedEmail,
        recipient: String,
    },
}

/// Per-conversation state. One instance per interaction context, dropped when
/// the context ends.
#[derive(Debug, Clone, Default)]
pub struct DraftSession {
    turns: Vec<ConversationTurn>,
    state: DraftState,
    recipient: Option<String>,
    attachments: Vec<Attachment>,
}

/// Serializable view of a session for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub state: DraftState,
    pub recipient: Option<String>,
    pub attachments: Vec<String>,
    pub turns: Vec<ConversationTurn>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// The current working draft, if any.
    pub fn draft(&self) -> Option<&ParsedEmail> {
        match &self.state {
            DraftState::Idle => None,
            DraftState::Drafted { draft } | DraftState::AwaitingConfirmation { draft, .. } => Some(draft),
        }
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.state, DraftState::AwaitingConfirmation { .. })
    }

    pub fn record_user(&mut self, text: &str) {
        self.turns.push(ConversationTurn::user(text));
    }

    pub fn record_assistant(&mut self, text: &str) {
        self.turns.push(ConversationTurn::assistant(text));
    }

    /// Replaces the working draft. Any pending confirmation is dropped, since it
    /// referred to the previous text.
    pub fn apply_draft(&mut self, draft: ParsedEmail) {
        self.state = DraftState::Drafted { draft };
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = Some(recipient.into());
    }

    /// Adds uploaded files, replacing any earlier file with the same name.
    /// Returns how many were received.
    pub fn add_attachments(&mut self, uploads: Vec<Attachment>) -> usize {
        let count = uploads.len();
        for upload in uploads {
            self.attachments.retain(|existing| existing.filename != upload.filename);
            self.attachments.push(upload);
        }
        count
    }

    /// Moves a complete draft into the confirmation state.
    ///
    /// Fails with `MissingRecipient` when no address is known and with
    /// `MissingDraft` when there is nothing complete to send; the state is left
    /// untouched in both cases.
    pub fn request_confirmation(&mut self) -> Result<(ParsedEmail, String), AssistantError> {
        let recipient = match self.recipient.as_deref() {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => return Err(AssistantError::MissingRecipient),
        };
        let draft = match self.draft() {
            Some(draft) if draft.is_complete() => draft.clone(),
            _ => return Err(AssistantError::MissingDraft),
        };

        self.state = DraftState::AwaitingConfirmation {
            draft: draft.clone(),
            recipient: recipient.clone(),
        };
        Ok((draft, recipient))
    }

    /// Resolves a confirmed send: returns the message to dispatch, puts the
    /// session back to Idle and releases the attachments. `None` when nothing
    /// was awaiting confirmation.
    pub fn take_pending_send(&mut self) -> Option<OutgoingEmail> {
        if !self.is_awaiting_confirmation() {
            return None;
        }
        let attachments = mem::take(&mut self.attachments);
        match mem::take(&mut self.state) {
            DraftState::AwaitingConfirmation { draft, recipient } => Some(OutgoingEmail {
                recipient,
                subject: draft.subject,
                body: draft.body,
                attachments,
            }),
            _ => None,
        }
    }

    /// Drops a pending confirmation without sending. Returns whether one existed.
    pub fn cancel_confirmation(&mut self) -> bool {
        if !self.is_awaiting_confirmation() {
            return false;
        }
        self.state = DraftState::Idle;
        self.attachments.clear();
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            recipient: self.recipient.clone(),
            attachments: self.attachments.iter().map(|a| a.filename.clone()).collect(),
            turns: self.turns.clone(),
        }
    }
}
