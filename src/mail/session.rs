use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::AccessToken;
use crate::config::SessionConfig;
use crate::error::AppResult;
use crate::output::Output;

use super::message::MailTask;
use super::transport::{Connector, MailTransport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub authenticated: bool,
    pub message: Option<SentMessage>,
}

/// Authenticates against the SMTP server and optionally sends the test message.
///
/// Once connected, the transport is closed on every path. A close failure
/// is only logged; it never replaces the session's own outcome.
pub async fn run_session<C: Connector>(
    connector: &C,
    config: SessionConfig,
    user: &str,
    token: &AccessToken,
    task: Option<&MailTask>,
    output: &Output,
) -> AppResult<SessionReport> {
    let mut transport = connector.connect(&config, user, token).await?;
    let delivered = deliver(&mut transport, task, output).await;
    if let Err(err) = transport.close().await {
        warn!(error = %err, "SMTP connection did not close cleanly");
    }

    let message = delivered?;

    Ok(SessionReport {
        host: config.host,
        port: config.port,
        user: user.to_string(),
        authenticated: true,
        message,
    })
}

async fn deliver<T: MailTransport>(
    transport: &mut T,
    task: Option<&MailTask>,
    output: &Output,
) -> AppResult<Option<SentMessage>> {
    output.line("Successfully connected to SMTP server with OAuth2")?;

    let Some(task) = task else {
        debug!("no test message requested");
        return Ok(None);
    };

    let message = task.build_message()?;
    transport.send(&message).await?;

    let sent = task.summary();
    output.line(&format!("Test message from {} sent to {}", sent.from, sent.to))?;
    Ok(Some(sent))
}
