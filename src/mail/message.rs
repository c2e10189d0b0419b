use lettre::Message;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use tracing::warn;

use crate::error::AppResult;

use super::session::SentMessage;

pub const TEST_SUBJECT: &str = "SMTP OAuth Mail Test";
pub const TEST_BODY: &str = "Test Message Content";

/// The optional test message. Only built when both addresses are known.
#[derive(Debug, Clone)]
pub struct MailTask {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub body: String,
}

impl MailTask {
    pub fn new(from: Mailbox, to: Mailbox) -> Self {
        Self {
            from,
            to,
            subject: TEST_SUBJECT.to_string(),
            body: TEST_BODY.to_string(),
        }
    }

    /// Parses `--sendAs`/`--recipient`. Returns `None` unless both are present.
    pub fn from_addresses(send_as: Option<&str>, recipient: Option<&str>) -> AppResult<Option<Self>> {
        match (send_as, recipient) {
            (Some(from), Some(to)) => Ok(Some(Self::new(
                from.trim().parse()?,
                to.trim().parse()?,
            ))),
            (Some(_), None) => {
                warn!("--sendAs given without --recipient; no test message will be sent");
                Ok(None)
            }
            (None, Some(_)) => {
                warn!("--recipient given without --sendAs; no test message will be sent");
                Ok(None)
            }
            (None, None) => Ok(None),
        }
    }

    pub fn build_message(&self) -> AppResult<Message> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())?;
        Ok(message)
    }

    pub fn summary(&self) -> SentMessage {
        SentMessage {
            from: self.from.to_string(),
            to: self.to.to_string(),
            subject: self.subject.clone(),
        }
    }
}
