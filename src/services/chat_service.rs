use log::{info, warn};
use serde::Serialize;
use crate::models::assistant_error::AssistantError;
use crate::models::attachment::Attachment;
use crate::models::draft_session::DraftSession;
use crate::models::email::ParsedEmail;
use crate::services::email_service::MailDispatcher;
use crate::services::intent_service::{self, Confirmation, Intent};
use crate::services::llm_service::DraftGenerator;
use crate::services::prompt_service;

/// What kind of answer a turn produced, so the UI can react (e.g. open an
/// upload picker on `AttachmentsRequested`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Drafted,
    ConfirmationPrompt,
    Sent,
    Cancelled,
    AttachmentsAdded,
    AttachmentsRequested,
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    #[serde(rename = "response")]
    pub message: String,
    pub kind: ReplyKind,
}

impl ChatReply {
    fn new(kind: ReplyKind, message: impl Into<String>) -> Self {
        ChatReply {
            message: message.into(),
            kind,
        }
    }
}

/// Applies one user turn to the session and returns the assistant's answer.
///
/// `uploads` are the files delivered alongside this utterance. Outside an
/// attachment request they are still stored before the turn runs, except while
/// a send awaits confirmation, where they are left out; either way the reply
/// says what happened to them. Collaborator failures are turned into replies,
/// so the session can always continue.
pub async fn process_chat(
    user_input: &str,
    uploads: Vec<Attachment>,
    session: &mut DraftSession,
    drafter: &dyn DraftGenerator,
    mailer: &dyn MailDispatcher,
) -> ChatReply {
    session.record_user(user_input);

    let intent = intent_service::classify(user_input, session.is_awaiting_confirmation());
    info!("Intent classification: {:?}", intent);

    let (uploads, upload_note) = match &intent {
        Intent::AttachmentRequest => (uploads, None),
        _ if uploads.is_empty() => (uploads, None),
        Intent::Confirmation(_) => {
            warn!("Ignoring {} upload(s) sent during a pending confirmation", uploads.len());
            let note = format!(
                "📎 {} file(s) were not attached because a send is awaiting confirmation.",
                uploads.len()
            );
            (Vec::new(), Some(note))
        }
        _ => {
            let count = session.add_attachments(uploads);
            info!("Stored {} attachment(s) sent with the message", count);
            (Vec::new(), Some(format!("📎 {} attachment(s) added.", count)))
        }
    };

    let mut reply = match intent {
        Intent::Confirmation(answer) => handle_confirmation(answer, session, mailer).await,
        Intent::AttachmentRequest => handle_attachments(uploads, session),
        Intent::SendIntent { recipient } => handle_send_intent(recipient, session),
        Intent::Drafting => handle_drafting(session, drafter).await,
    };
    if let Some(note) = upload_note {
        reply.message = format!("{}\n\n{}", reply.message, note);
    }
    reply
}

async fn handle_confirmation(
    answer: Confirmation,
    session: &mut DraftSession,
    mailer: &dyn MailDispatcher,
) -> ChatReply {
    match answer {
        Confirmation::Confirmed => {
            let Some(email) = session.take_pending_send() else {
                return ChatReply::new(ReplyKind::Notice, AssistantError::MissingDraft.to_string());
            };
            info!("Dispatching {}", email);
            let reply = match mailer.send(&email).await {
                Ok(()) => ChatReply::new(
                    ReplyKind::Sent,
                    format!("✅ Email successfully sent to {}", email.recipient),
                ),
                Err(e) => {
                    warn!("Failed to send email to {}: {}", email.recipient, e);
                    ChatReply::new(ReplyKind::Error, AssistantError::DispatchFailure(e.to_string()).to_string())
                }
            };
            respond(session, reply)
        }
        Confirmation::Cancelled => {
            session.cancel_confirmation();
            respond(session, ChatReply::new(ReplyKind::Cancelled, "❎ Email sending cancelled."))
        }
        // re-prompt only; not part of the conversation
        Confirmation::Invalid => ChatReply::new(ReplyKind::Notice, AssistantError::InvalidConfirmation.to_string()),
    }
}

fn handle_attachments(uploads: Vec<Attachment>, session: &mut DraftSession) -> ChatReply {
    if uploads.is_empty() {
        return ChatReply::new(ReplyKind::AttachmentsRequested, "No attachments selected yet.");
    }
    let count = session.add_attachments(uploads);
    info!("Stored {} attachment(s); {} pending", count, session.attachments().len());
    respond(
        session,
        ChatReply::new(
            ReplyKind::AttachmentsAdded,
            format!("📎 {} attachment(s) added. Ready to send or continue editing?", count),
        ),
    )
}

fn handle_send_intent(recipient: Option<String>, session: &mut DraftSession) -> ChatReply {
    if let Some(address) = recipient {
        info!("Recipient set to {}", address);
        session.set_recipient(address);
    }

    let reply = match session.request_confirmation() {
        Ok((draft, recipient)) => ChatReply::new(
            ReplyKind::ConfirmationPrompt,
            confirmation_prompt(&draft, &recipient, session.attachments().len()),
        ),
        Err(e) => ChatReply::new(ReplyKind::Notice, e.to_string()),
    };
    respond(session, reply)
}

async fn handle_drafting(session: &mut DraftSession, drafter: &dyn DraftGenerator) -> ChatReply {
    let prompt = prompt_service::build_drafting_prompt(session.turns());
    let reply = match drafter.generate(&prompt).await {
        Ok(raw) => {
            let draft = ParsedEmail::parse(&raw);
            let reply = ChatReply::new(ReplyKind::Drafted, draft.format_reply());
            session.apply_draft(draft);
            reply
        }
        Err(e) => {
            warn!("Draft generation failed: {}", e);
            ChatReply::new(ReplyKind::Error, AssistantError::GenerationFailure(e.to_string()).to_string())
        }
    };
    respond(session, reply)
}

fn confirmation_prompt(draft: &ParsedEmail, recipient: &str, attachment_count: usize) -> String {
    let mut prompt = format!(
        "### ✉️ Confirm Before Sending\n**To:** {}\n\n**Subject:** {}\n\n{}\n\n",
        recipient, draft.subject, draft.body
    );
    if attachment_count > 0 {
        prompt.push_str(&format!("📎 {} attachment(s) will be included.\n\n", attachment_count));
    }
    prompt.push_str("Would you like me to send this? (yes/no)");
    prompt
}

fn respond(session: &mut DraftSession, reply: ChatReply) -> ChatReply {
    session.record_assistant(&reply.message);
    reply
}
