//! # Twilio SMS client

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use crate::{config, consts};

/// Message resource returned by Twilio after creation
#[derive(Debug, Deserialize)]
pub struct TwilioMessageResponse {
    pub sid: String,
    pub status: Option<String>,
}

pub struct TwilioNotifier {
    client: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    destination: String,
    source: String,
}

impl TwilioNotifier {
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self::with_base_url(app_config, consts::TWILIO_API_URL)
    }

    pub fn with_base_url(app_config: &config::AppConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            account_sid: app_config.twilio_sid.clone(),
            auth_token: app_config.twilio_auth_token.clone(),
            destination: app_config.twilio_destination.clone(),
            source: app_config.twilio_source.clone(),
        }
    }

    fn messages_endpoint(&self) -> String {
        format!(
            "{base}/2010-04-01/Accounts/{sid}/Messages.json",
            base = self.base_url.trim_end_matches('/'),
            sid = self.account_sid
        )
    }
}

#[async_trait]
impl crate::services::Notifier for TwilioNotifier {
    async fn send_sms(&self, body: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(self.messages_endpoint())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .header("accept", "application/json")
            .form(&[
                ("To", self.destination.as_str()),
                ("From", self.source.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .context("Failed to send request to Twilio API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("Twilio API returned error status {}: {}", status, body);
        }

        let message: TwilioMessageResponse = response
            .json()
            .await
            .context("Failed to parse Twilio API response")?;

        log::debug!(
            "Twilio message {} is {}",
            message.sid,
            message.status.as_deref().unwrap_or("unknown")
        );

        Ok(message.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;
    use crate::services::Notifier;
    use base64::{Engine, engine::general_purpose::STANDARD};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_sms_creates_message() {
        let server = MockServer::start().await;
        let basic = format!("Basic {}", STANDARD.encode("AC123:twilio-token"));

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(header("Authorization", basic.as_str()))
            .and(body_string_contains("To=%2B15550001111"))
            .and(body_string_contains("From=%2B15550002222"))
            .and(body_string_contains("Body=Motion+detected+by+Raspberry+Pi"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "SM0123456789",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = TwilioNotifier::with_base_url(&test_config(), server.uri());

        let sid = notifier.send_sms(consts::NOTIFICATION_BODY).await.unwrap();

        assert_eq!(sid, "SM0123456789");
    }

    #[tokio::test]
    async fn test_send_sms_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": 20003,
                "message": "Authenticate"
            })))
            .mount(&server)
            .await;

        let notifier = TwilioNotifier::with_base_url(&test_config(), server.uri());

        let err = notifier
            .send_sms(consts::NOTIFICATION_BODY)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Authenticate"));
    }
}
