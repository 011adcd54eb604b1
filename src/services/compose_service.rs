use log::{info, warn};
use crate::models::assistant_error::AssistantError;
use crate::models::email::{OutgoingEmail, ParsedEmail};
use crate::services::email_service::MailDispatcher;
use crate::services::llm_service::DraftGenerator;
use crate::services::prompt_service;

/// One-shot drafting for the form flow; no session involved.
pub async fn compose_email(request: &str, drafter: &dyn DraftGenerator) -> Result<ParsedEmail, AssistantError> {
    let prompt = prompt_service::build_compose_prompt(request);
    match drafter.generate(&prompt).await {
        Ok(raw) => Ok(ParsedEmail::parse(&raw)),
        Err(e) => {
            warn!("Form draft generation failed: {}", e);
            Err(AssistantError::GenerationFailure(e.to_string()))
        }
    }
}

/// Sends a user-edited email straight away.
pub async fn send_email(email: OutgoingEmail, mailer: &dyn MailDispatcher) -> Result<String, AssistantError> {
    if email.recipient.trim().is_empty() {
        return Err(AssistantError::MissingRecipient);
    }
    if email.subject.trim().is_empty() || email.body.trim().is_empty() {
        return Err(AssistantError::MissingDraft);
    }

    info!("Dispatching form {}", email);
    mailer
        .send(&email)
        .await
        .map(|()| format!("✅ Email successfully sent to {}", email.recipient))
        .map_err(|e| AssistantError::DispatchFailure(e.to_string()))
}
