use async_trait::async_trait;
use lettre::message::header::{ContentType, ContentTypeErr};
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;
use crate::config::SmtpConfig;
use crate::models::email::OutgoingEmail;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("Invalid content type: {0}")]
    ContentType(#[from] ContentTypeErr),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Anything that can deliver a finished message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DispatchError>;
}

/// STARTTLS submission through a single relay with password auth.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, DispatchError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            .port(config.port)
            .credentials(creds)
            .authentication(vec![Mechanism::Plain, Mechanism::Login])
            .timeout(Some(config.timeout))
            .build();

        Ok(SmtpMailer {
            transport,
            from: config.sender.parse::<Mailbox>()?,
        })
    }
}

#[async_trait]
impl MailDispatcher for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DispatchError> {
        let message = build_message(&self.from, email)?;
        self.transport.send(message).await?;
        info!("Email sent to {} with {} attachment(s)", email.recipient, email.attachments.len());
        Ok(())
    }
}

/// Plain text when there is nothing attached, multipart/mixed otherwise.
pub fn build_message(from: &Mailbox, email: &OutgoingEmail) -> Result<Message, DispatchError> {
    let to = email.recipient.trim().parse::<Mailbox>()?;
    let builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(email.subject.clone());

    if email.attachments.is_empty() {
        return Ok(builder
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?);
    }

    let octet_stream = ContentType::parse("application/octet-stream")?;
    let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));
    for attachment in &email.attachments {
        parts = parts.singlepart(
            MimeAttachment::new(attachment.filename.clone())
                .body(attachment.data.clone(), octet_stream.clone()),
        );
    }
    Ok(builder.multipart(parts)?)
}
