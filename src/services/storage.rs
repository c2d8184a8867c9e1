//! # Dropbox storage client
//!
//! Uploads media files in a single request to the Dropbox content API.
//! Files bigger than the API's single-request limit (150 MB) are rejected by
//! Dropbox and surface as an error.

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{config, consts};

/// Arguments of `files/upload`, sent in the `Dropbox-API-Arg` header
#[derive(Serialize)]
struct UploadArg<'a> {
    path: &'a str,
    /// `add` fails on naming collisions instead of overwriting
    mode: &'a str,
    autorename: bool,
    mute: bool,
}

/// Subset of the file metadata returned after an upload
#[derive(Debug, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub path_display: Option<String>,
}

pub struct DropboxUploader {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl DropboxUploader {
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self::with_base_url(
            &app_config.dropbox_access_token,
            consts::DROPBOX_CONTENT_API_URL,
        )
    }

    pub fn with_base_url(access_token: &str, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.to_string(),
        }
    }

    fn upload_endpoint(&self) -> String {
        format!("{}/2/files/upload", self.base_url.trim_end_matches('/'))
    }
}

/// Serializes the upload arguments for an HTTP header.
///
/// Dropbox requires 0x7F and every character above it to be escaped as `\uXXXX`.
fn api_arg_header(destination: &str) -> anyhow::Result<String> {
    let json = serde_json::to_string(&UploadArg {
        path: destination,
        mode: "add",
        autorename: false,
        mute: false,
    })?;

    let mut header = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && c != '\u{7f}' {
            header.push(c);
            continue;
        }
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
            header.push_str(&format!("\\u{unit:04x}"));
        }
    }

    Ok(header)
}

#[async_trait]
impl crate::services::Uploader for DropboxUploader {
    async fn upload(&self, destination: &str, body: Vec<u8>) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.upload_endpoint())
            .bearer_auth(&self.access_token)
            .header("Dropbox-API-Arg", api_arg_header(destination)?)
            .header("Content-Type", consts::ATTACHMENT_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .context("Failed to send request to Dropbox API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("Dropbox API returned error status {}: {}", status, body);
        }

        let uploaded: UploadedFile = response
            .json()
            .await
            .context("Failed to parse Dropbox upload response")?;

        log::debug!(
            "Dropbox stored file {} at {}",
            uploaded.id,
            uploaded.path_display.as_deref().unwrap_or(destination)
        );

        Ok(())
    }
}
