//! Runs the notification steps for one media file, in order:
//! email -> upload -> SMS -> delete.
//!
//! Steps are never retried. The first failure stops the run and the media
//! file is left on disk.

use derive_more::Display;
use log::{debug, error, info};

use crate::errors::{DispatchStep, RelayError};
use crate::models::media::MediaFile;
use crate::services::{self, ImplMailer, ImplNotifier, ImplUploader};
use crate::{config, consts};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Start,
    EmailSent,
    Uploaded,
    SmsSent,
    FileDeleted,
    Failed,
}

impl DispatchState {
    /// State reached once `step` succeeds.
    fn after(step: DispatchStep) -> Self {
        match step {
            DispatchStep::Email => DispatchState::EmailSent,
            DispatchStep::Upload => DispatchState::Uploaded,
            DispatchStep::Sms => DispatchState::SmsSent,
            DispatchStep::Delete => DispatchState::FileDeleted,
        }
    }
}

pub struct NotificationDispatcher {
    mailer: ImplMailer,
    uploader: ImplUploader,
    notifier: ImplNotifier,
}

impl NotificationDispatcher {
    pub fn new(mailer: ImplMailer, uploader: ImplUploader, notifier: ImplNotifier) -> Self {
        Self {
            mailer,
            uploader,
            notifier,
        }
    }

    /// Wires the production services: Gmail SMTP, Dropbox and Twilio.
    pub fn from_config(app_config: &config::AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(services::mail::SmtpMailer::new(app_config)?),
            Box::new(services::storage::DropboxUploader::new(app_config)),
            Box::new(services::sms::TwilioNotifier::new(app_config)),
        ))
    }

    pub async fn dispatch(&self, media: &MediaFile) -> Result<DispatchState, RelayError> {
        let mut state = DispatchState::Start;

        for step in [
            DispatchStep::Email,
            DispatchStep::Upload,
            DispatchStep::Sms,
            DispatchStep::Delete,
        ] {
            if let Err(err) = self.run_step(step, media).await {
                match step {
                    DispatchStep::Delete => error!(
                        "{step} step failed in state {state}, notifications were sent but {} was not removed",
                        media.path().display()
                    ),
                    _ => error!(
                        "{step} step failed in state {state}, media kept at {}",
                        media.path().display()
                    ),
                }
                debug!("{state} -> {}", DispatchState::Failed);
                return Err(err);
            }

            let next = DispatchState::after(step);
            debug!("{state} -> {next}");
            state = next;
        }

        Ok(state)
    }

    async fn run_step(&self, step: DispatchStep, media: &MediaFile) -> Result<(), RelayError> {
        match step {
            DispatchStep::Email => {
                let attachment = media.read().await?;
                self.mailer
                    .send_notification(media.file_name(), attachment)
                    .await
                    .map_err(|err| RelayError::transport(step, err))?;

                info!("Notification email sent.");
            }
            DispatchStep::Upload => {
                let body = media.read().await?;
                let destination = media.destination_in(consts::DROPBOX_PUBLIC_FOLDER);
                self.uploader
                    .upload(&destination, body)
                    .await
                    .map_err(|err| RelayError::transport(step, err))?;

                info!(
                    "Uploaded image from {} to Dropbox at {}",
                    media.path().display(),
                    destination
                );
            }
            DispatchStep::Sms => {
                self.notifier
                    .send_sms(consts::NOTIFICATION_BODY)
                    .await
                    .map_err(|err| RelayError::transport(step, err))?;

                info!("Notification text sent");
            }
            DispatchStep::Delete => {
                media.delete().await?;

                debug!("Removed {}", media.path().display());
            }
        }

        Ok(())
    }
}
