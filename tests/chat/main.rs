#[path = "../common/mod.rs"]
mod common;

use common::{RecordingMailer, StubDrafter};
use draft_mail_agent::models::attachment::Attachment;
use draft_mail_agent::models::draft_session::{DraftSession, DraftState};
use draft_mail_agent::models::email::ParsedEmail;
use draft_mail_agent::services::chat_service::{process_chat, ReplyKind};

const LEAVE_DRAFT: &str = "Subject: Leave request for tomorrow\nDear Boss,\n\nI would like to take a day off tomorrow.\n\nBest regards";

#[tokio::test]
async fn test_draft_send_confirm_scenario() {
    let drafter = StubDrafter::returning(LEAVE_DRAFT);
    let mailer = RecordingMailer::new();
    let mut session = DraftSession::new();

    let reply = process_chat("Write a leave request for tomorrow", vec![], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::Drafted);
    let draft = session.draft().cloned().expect("draft after drafting turn");
    assert_eq!(draft.subject, "Leave request for tomorrow");
    assert!(!draft.body.is_empty());

    let reply = process_chat("attach the handover notes", vec![Attachment::new("handover.txt", b"notes".to_vec())], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::AttachmentsAdded);

    let reply = process_chat("send it to boss@co.com", vec![], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::ConfirmationPrompt);
    assert_eq!(
        session.state(),
        &DraftState::AwaitingConfirmation { draft: draft.clone(), recipient: "boss@co.com".to_string() }
    );

    let reply = process_chat("yes", vec![], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::Sent);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1, "dispatch must happen exactly once");
    assert_eq!(sent[0].recipient, "boss@co.com");
    assert_eq!(sent[0].subject, draft.subject);
    assert_eq!(sent[0].body, draft.body);
    assert_eq!(sent[0].attachments, vec![Attachment::new("handover.txt", b"notes".to_vec())]);
    assert_eq!(session.state(), &DraftState::Idle);
    assert!(session.attachments().is_empty());
    assert_eq!(drafter.calls(), 1);
}

#[tokio::test]
async fn test_refinement_sees_previous_draft() {
    let drafter = StubDrafter::returning(LEAVE_DRAFT);
    let mailer = RecordingMailer::new();
    let mut session = DraftSession::new();

    process_chat("Write a leave request for tomorrow", vec![], &mut session, &drafter, &mailer).await;
    process_chat("Make it more formal", vec![], &mut session, &drafter, &mailer).await;

    let prompts = drafter.prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 2);
    let second = &prompts[1];
    let first_user = second.find("User: Write a leave request for tomorrow").unwrap();
    let previous_draft = second.find("AI: **Subject:** Leave request for tomorrow").unwrap();
    let refinement = second.find("User: Make it more formal").unwrap();
    assert!(first_user < previous_draft && previous_draft < refinement);
    assert!(matches!(session.state(), DraftState::Drafted { .. }));
}

#[tokio::test]
async fn test_drafting_is_deterministic_with_identical_context() {
    let drafter = StubDrafter::returning(LEAVE_DRAFT);
    let mailer = RecordingMailer::new();

    let mut first = DraftSession::new();
    let mut second = DraftSession::new();
    process_chat("Write a leave request for tomorrow", vec![], &mut first, &drafter, &mailer).await;
    process_chat("Write a leave request for tomorrow", vec![], &mut second, &drafter, &mailer).await;

    assert_eq!(first.draft(), second.draft());
    let prompts = drafter.prompts.lock().unwrap().clone();
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn test_recipient_is_remembered_between_sends() {
    let drafter = StubDrafter::returning(LEAVE_DRAFT);
    let mailer = RecordingMailer::new();
    let mut session = DraftSession::new();

    process_chat("Write a leave request for tomorrow", vec![], &mut session, &drafter, &mailer).await;
    process_chat("send it to boss@co.com", vec![], &mut session, &drafter, &mailer).await;
    let reply = process_chat("no", vec![], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::Cancelled);
    assert!(mailer.sent().is_empty());

    process_chat("Redo the leave request", vec![], &mut session, &drafter, &mailer).await;
    let reply = process_chat("ok, dispatch it", vec![], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::ConfirmationPrompt);
    assert!(reply.message.contains("boss@co.com"));
}

#[tokio::test]
async fn test_failed_generation_is_not_fatal() {
    let drafter = StubDrafter::failing();
    let mailer = RecordingMailer::new();
    let mut session = DraftSession::new();
    session.apply_draft(ParsedEmail::new("Kept", "Earlier body"));

    let reply = process_chat("Rewrite it", vec![], &mut session, &drafter, &mailer).await;

    assert_eq!(reply.kind, ReplyKind::Error);
    assert!(reply.message.starts_with("Error generating email: "));
    assert!(reply.message.contains("quota exceeded"));
    assert_eq!(session.draft(), Some(&ParsedEmail::new("Kept", "Earlier body")));
}

#[tokio::test]
async fn test_failed_dispatch_returns_to_idle() {
    let drafter = StubDrafter::returning(LEAVE_DRAFT);
    let mailer = RecordingMailer::failing();
    let mut session = DraftSession::new();

    process_chat("Write a leave request for tomorrow", vec![], &mut session, &drafter, &mailer).await;
    process_chat("attach this", vec![Attachment::new("a.pdf", vec![1])], &mut session, &drafter, &mailer).await;
    process_chat("send to boss@co.com", vec![], &mut session, &drafter, &mailer).await;
    let reply = process_chat("Y", vec![], &mut session, &drafter, &mailer).await;

    assert_eq!(reply.kind, ReplyKind::Error);
    assert!(reply.message.starts_with("❌ Failed to send email:"));
    assert_eq!(mailer.sent().len(), 1);
    assert_eq!(session.state(), &DraftState::Idle);
    assert!(session.attachments().is_empty());

    // the user can keep chatting
    let reply = process_chat("Write a shorter version", vec![], &mut session, &drafter, &mailer).await;
    assert_eq!(reply.kind, ReplyKind::Drafted);
}

#[tokio::test]
async fn test_send_intent_without_address_or_recipient() {
    let drafter = StubDrafter::returning(LEAVE_DRAFT);
    let mailer = RecordingMailer::new();
    let mut session = DraftSession::new();
    process_chat("Write a leave request for tomorrow", vec![], &mut session, &drafter, &mailer).await;
    let before = session.state().clone();

    let reply = process_chat("please send this", vec![], &mut session, &drafter, &mailer).await;

    assert_eq!(reply.kind, ReplyKind::Notice);
    assert!(reply.message.contains("recipient"));
    assert_eq!(session.state(), &before);
}
