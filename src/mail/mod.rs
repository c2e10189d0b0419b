pub mod message;
pub mod session;
pub mod transport;

pub use message::{MailTask, TEST_BODY, TEST_SUBJECT};
pub use session::{SentMessage, SessionReport, run_session};
pub use transport::{Connector, MailTransport, SmtpConnection, SmtpConnector};
