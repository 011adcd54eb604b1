#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use draft_mail_agent::models::email::OutgoingEmail;
use draft_mail_agent::services::email_service::{DispatchError, MailDispatcher};
use draft_mail_agent::services::llm_service::{DraftGenerator, GenerationError};

/// Returns the same text for every prompt and remembers what it was asked.
pub struct StubDrafter {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubDrafter {
    pub fn returning(reply: &str) -> Self {
        StubDrafter {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        StubDrafter {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl DraftGenerator for StubDrafter {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(GenerationError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            }),
        }
    }
}

/// Records every dispatched message instead of talking SMTP.
#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    delay: Option<Duration>,
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        RecordingMailer {
            fail: true,
            ..Self::default()
        }
    }

    /// Takes `delay` to deliver each message, like a slow relay.
    pub fn slow(delay: Duration) -> Self {
        RecordingMailer {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DispatchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            let err = "relay refused".parse::<lettre::Address>().unwrap_err();
            return Err(DispatchError::Address(err));
        }
        Ok(())
    }
}
