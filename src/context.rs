use crate::cli::Cli;
use crate::config::{Credentials, SessionConfig};
use crate::error::{AppError, AppResult};
use crate::mail::MailTask;
use crate::output::Output;

#[derive(Debug)]
pub struct AppContext {
    pub credentials: Credentials,
    pub mailbox_user: String,
    pub mail_task: Option<MailTask>,
    pub session: SessionConfig,
    pub output: Output,
}

impl AppContext {
    /// Validates everything the run needs before any network call.
    pub fn bootstrap(cli: Cli) -> AppResult<Self> {
        let Cli {
            client_id,
            client_secret,
            tenant,
            email,
            send_as,
            recipient,
            json,
            verbose: _,
        } = cli;

        let mailbox_user = email.trim().to_string();
        if mailbox_user.is_empty() {
            return Err(AppError::InvalidInput(
                "--email must not be blank".to_string(),
            ));
        }

        let mail_task = MailTask::from_addresses(send_as.as_deref(), recipient.as_deref())?;

        Ok(Self {
            credentials: Credentials::new(client_id, client_secret, tenant.trim()),
            mailbox_user,
            mail_task,
            session: SessionConfig::office365(),
            output: Output::new(json),
        })
    }
}
