use lettre::Message;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::transport::smtp::client::{AsyncSmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use tracing::{debug, info};

use crate::auth::AccessToken;
use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};

/// Opens an authenticated mail transport.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Transport: MailTransport;

    /// Connects, upgrades the channel as the config demands, and
    /// authenticates `user` with `token` in the password slot.
    async fn connect(
        &self,
        config: &SessionConfig,
        user: &str,
        token: &AccessToken,
    ) -> AppResult<Self::Transport>;
}

/// An authenticated session that can submit messages.
#[allow(async_fn_in_trait)]
pub trait MailTransport {
    async fn send(&mut self, message: &Message) -> AppResult<()>;

    async fn close(self) -> AppResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct SmtpConnector {
    hello_name: ClientId,
}

impl Connector for SmtpConnector {
    type Transport = SmtpConnection;

    async fn connect(
        &self,
        config: &SessionConfig,
        user: &str,
        token: &AccessToken,
    ) -> AppResult<SmtpConnection> {
        debug!(host = %config.host, port = config.port, "opening SMTP connection");
        let mut connection = AsyncSmtpConnection::connect_tokio1(
            (config.host.as_str(), config.port),
            Some(config.timeout),
            &self.hello_name,
            None,
            None,
        )
        .await?;
        debug!(server = ?connection.server_info(), "SMTP greeting received");

        if let Err(err) = establish(&mut connection, config, &self.hello_name, user, token).await
        {
            connection.abort().await;
            return Err(err);
        }

        Ok(SmtpConnection { connection })
    }
}

async fn establish(
    connection: &mut AsyncSmtpConnection,
    config: &SessionConfig,
    hello_name: &ClientId,
    user: &str,
    token: &AccessToken,
) -> AppResult<()> {
    if connection.can_starttls() {
        let tls = TlsParameters::new(config.host.clone())?;
        connection.starttls(tls, hello_name).await?;
        debug!("connection upgraded with STARTTLS");
    } else if config.starttls_required && !connection.is_encrypted() {
        return Err(AppError::Mail(format!(
            "{} does not offer STARTTLS and it is required",
            config.host
        )));
    }

    let credentials = SmtpCredentials::new(user.to_string(), token.secret().to_string());
    let response = connection.auth(&config.mechanisms, &credentials).await?;
    info!(user, code = %response.code(), "SMTP authentication accepted");
    Ok(())
}

/// A live, authenticated lettre connection.
pub struct SmtpConnection {
    connection: AsyncSmtpConnection,
}

impl MailTransport for SmtpConnection {
    async fn send(&mut self, message: &Message) -> AppResult<()> {
        let response = self
            .connection
            .send(message.envelope(), &message.formatted())
            .await?;
        debug!(code = %response.code(), "message accepted for delivery");
        Ok(())
    }

    async fn close(mut self) -> AppResult<()> {
        if self.connection.has_broken() {
            self.connection.abort().await;
            return Ok(());
        }

        self.connection.quit().await?;
        debug!("SMTP connection closed");
        Ok(())
    }
}
