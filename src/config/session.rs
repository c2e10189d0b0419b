use std::time::Duration;

use lettre::transport::smtp::authentication::Mechanism;

pub const OFFICE365_SMTP_HOST: &str = "smtp.office365.com";
pub const SUBMISSION_PORT: u16 = 587;
const COMMAND_TIMEOUT_SECS: u64 = 60;

/// Fixed SMTP parameters for the session. Not user-configurable.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub starttls_required: bool,
    pub mechanisms: Vec<Mechanism>,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn office365() -> Self {
        Self {
            host: OFFICE365_SMTP_HOST.to_string(),
            port: SUBMISSION_PORT,
            starttls_required: true,
            mechanisms: vec![Mechanism::Xoauth2],
            timeout: Duration::from_secs(COMMAND_TIMEOUT_SECS),
        }
    }

    /// Session settings as `key=value` pairs for the startup listing.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("mail.smtp.host", self.host.clone()),
            ("mail.smtp.port", self.port.to_string()),
            ("mail.smtp.auth", "true".to_string()),
            ("mail.smtp.auth.mechanisms", mechanism_names(&self.mechanisms)),
            ("mail.smtp.starttls.enable", "true".to_string()),
            (
                "mail.smtp.starttls.required",
                self.starttls_required.to_string(),
            ),
        ]
    }
}

fn mechanism_names(mechanisms: &[Mechanism]) -> String {
    mechanisms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
