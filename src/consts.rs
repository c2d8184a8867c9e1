pub const NOTIFICATION_BODY: &str = "Motion detected by Raspberry Pi";
pub const EMAIL_SUBJECT: &str = "Motion Detected by Raspberry Pi";
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;

pub const DROPBOX_CONTENT_API_URL: &str = "https://content.dropboxapi.com";
pub const DROPBOX_PUBLIC_FOLDER: &str = "/Public/";

pub const TWILIO_API_URL: &str = "https://api.twilio.com";
