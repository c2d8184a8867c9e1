//! # SMTP mailer
//!
//! Sends the motion notification, with the captured media attached, from the
//! configured Gmail account to itself over STARTTLS submission.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::errors::RelayError;
use crate::{config, consts};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(app_config: &config::AppConfig) -> anyhow::Result<Self> {
        let sender = app_config
            .sender_email
            .parse::<Mailbox>()
            .map_err(|_| RelayError::InvalidSecret("SENDER_EMAIL".into()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(consts::SMTP_HOST)
            .context("Failed to configure SMTP transport")?
            .port(consts::SMTP_PORT)
            .credentials(Credentials::new(
                app_config.sender_email.clone(),
                app_config.sender_auth.clone(),
            ))
            .authentication(vec![Mechanism::Login])
            .build();

        Ok(Self { transport, sender })
    }
}

/// Builds the notification email: plain text body plus the media file as a
/// base64 `application/octet-stream` attachment, sent to `sender` itself.
pub fn build_notification_email(
    sender: &Mailbox,
    attachment_name: &str,
    attachment: Vec<u8>,
) -> anyhow::Result<Message> {
    let content_type = ContentType::parse(consts::ATTACHMENT_CONTENT_TYPE)
        .context("Invalid attachment content type")?;
    let body = Body::new_with_encoding(attachment, ContentTransferEncoding::Base64)
        .map_err(|_| anyhow!("Failed to base64 encode attachment {}", attachment_name))?;

    let message = Message::builder()
        .from(sender.clone())
        .to(sender.clone())
        .subject(consts::EMAIL_SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(consts::NOTIFICATION_BODY.to_string()))
                .singlepart(Attachment::new(attachment_name.to_string()).body(body, content_type)),
        )
        .context("Failed to build notification email")?;

    Ok(message)
}

#[async_trait]
impl crate::services::Mailer for SmtpMailer {
    async fn send_notification(
        &self,
        attachment_name: &str,
        attachment: Vec<u8>,
    ) -> anyhow::Result<()> {
        let message = build_notification_email(&self.sender, attachment_name, attachment)?;

        self.transport
            .send(message)
            .await
            .with_context(|| format!("Failed to send email via {}", consts::SMTP_HOST))?;

        Ok(())
    }
}
