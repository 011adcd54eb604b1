/// Failures a chat turn can run into. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    #[error("Error generating email: {0}")]
    GenerationFailure(String),

    #[error("❌ Failed to send email: {0}")]
    DispatchFailure(String),

    #[error("Please provide the recipient’s email address.")]
    MissingRecipient,

    #[error("⚠️ Please generate an email first. What should I write?")]
    MissingDraft,

    #[error("Please type 'yes' to send or 'no' to cancel.")]
    InvalidConfirmation,
}
