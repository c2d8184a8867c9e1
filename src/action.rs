use clap::{CommandFactory, Parser};
use log::info;

use crate::{config, dispatcher, errors::RelayError, models::media::MediaFile};

/// Executes whenever motion is detected to upload the media
/// files and notify the homeowner.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    /// Path to motion captured media file.
    #[arg(short = 'f', value_name = "FILE_PATH")]
    pub file_path: Option<String>,
}

impl AppArgs {
    /// Media path given with `-f`, ignoring an empty value.
    pub fn media_path(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .filter(|file_path| !file_path.trim().is_empty())
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let Some(file_path) = self.media_path() else {
            println!("[!] Please specify a media file path.");
            Self::command().print_help()?;
            return Ok(());
        };

        let media = MediaFile::new(file_path)?;

        notify(&media, config::AppConfig::load()).await
    }
}

/// Dispatches the notifications for `media` once the secrets are available.
///
/// A config error stops the run before any service is built.
async fn notify(
    media: &MediaFile,
    app_config: Result<config::AppConfig, RelayError>,
) -> anyhow::Result<()> {
    info!("Motion file recorded to {}", media.path().display());

    let app_config = app_config?;
    let dispatcher = dispatcher::NotificationDispatcher::from_config(&app_config)?;

    dispatcher.dispatch(media).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_env;
    use envconfig::Envconfig;

    #[test]
    fn test_args_with_file_path() {
        let args = AppArgs::try_parse_from(["motion-relay", "-f", "/tmp/cam/snap1.jpg"]).unwrap();

        assert_eq!(args.media_path(), Some("/tmp/cam/snap1.jpg"));
    }

    #[test]
    fn test_args_without_file_path() {
        let args = AppArgs::try_parse_from(["motion-relay"]).unwrap();
        assert_eq!(args.media_path(), None);

        let args = AppArgs::try_parse_from(["motion-relay", "-f", ""]).unwrap();
        assert_eq!(args.media_path(), None);
    }

    #[test]
    fn test_args_reject_unknown_flags() {
        assert!(AppArgs::try_parse_from(["motion-relay", "--file", "snap1.jpg"]).is_err());
    }

    #[tokio::test]
    async fn test_run_without_file_path_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap1.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let args = AppArgs::try_parse_from(["motion-relay"]).unwrap();

        assert!(args.run().await.is_ok());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_missing_secret_keeps_media_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap1.jpg");
        std::fs::write(&path, b"jpeg").unwrap();
        let media = MediaFile::new(&path).unwrap();

        for name in ["DROPBOX_ACCESS_TOKEN", "SENDER_EMAIL", "TWILIO_SOURCE"] {
            let mut env = test_env();
            env.remove(name);
            let app_config = config::AppConfig::init_from_hashmap(&env).map_err(RelayError::from);

            let err = notify(&media, app_config).await.unwrap_err();

            assert_eq!(
                err.downcast_ref::<RelayError>(),
                Some(&RelayError::MissingSecret(name.to_string()))
            );
            assert!(path.exists());
        }
    }
}
