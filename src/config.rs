//! Secrets required by the notification services.
//!
//! Every field maps to the upper-case environment variable of the same name
//! (`dropbox_access_token` -> `DROPBOX_ACCESS_TOKEN`). The config is read once
//! per invocation and handed to the service constructors. Values are never
//! logged.

use envconfig::Envconfig;

use crate::errors::RelayError;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// 🔒 SENSITIVE: Dropbox API access token
    pub dropbox_access_token: String,

    /// Gmail address used both as sender and recipient
    pub sender_email: String,

    /// 🔒 SENSITIVE: Gmail app password for `sender_email`
    pub sender_auth: String,

    /// Twilio account SID
    pub twilio_sid: String,

    /// 🔒 SENSITIVE: Twilio auth token
    pub twilio_auth_token: String,

    /// Phone number receiving the SMS alert
    pub twilio_destination: String,

    /// Twilio phone number the SMS is sent from
    pub twilio_source: String,
}

impl AppConfig {
    /// Reads the secrets from the process environment.
    pub fn load() -> Result<Self, RelayError> {
        Ok(Self::init_from_env()?)
    }
}
