pub mod mail;
pub mod sms;
pub mod storage;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Emails the notification with `attachment` named `attachment_name`.
    async fn send_notification(
        &self,
        attachment_name: &str,
        attachment: Vec<u8>,
    ) -> anyhow::Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, destination: &str, body: Vec<u8>) -> anyhow::Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a text message and returns the provider's message id.
    async fn send_sms(&self, body: &str) -> anyhow::Result<String>;
}

pub type ImplMailer = Box<dyn Mailer>;
pub type ImplUploader = Box<dyn Uploader>;
pub type ImplNotifier = Box<dyn Notifier>;
