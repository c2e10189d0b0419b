use crate::auth::{self, TokenClient};
use crate::cli::Cli;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::logging;
use crate::mail::{self, Connector, SessionReport, SmtpConnector};

pub async fn run(cli: Cli) -> AppResult<()> {
    logging::init(cli.verbose);

    let ctx = AppContext::bootstrap(cli)?;
    let report = execute(&ctx, &TokenClient::new(), &SmtpConnector::default()).await?;

    let text = match &report.message {
        Some(_) => format!("OAuth2 SMTP check passed for {} (test message sent)", report.user),
        None => format!("OAuth2 SMTP check passed for {}", report.user),
    };
    ctx.output.emit(&text, &report)
}

/// Token acquisition followed by the SMTP session. A token failure ends
/// the run before any SMTP connection is attempted.
pub async fn execute<C: Connector>(
    ctx: &AppContext,
    tokens: &TokenClient,
    connector: &C,
) -> AppResult<SessionReport> {
    ctx.output
        .line(&format!("Trying to access mailbox for {}", ctx.mailbox_user))?;

    let token = tokens.acquire_token(&ctx.credentials).await?;
    auth::claims::inspect(&token);

    ctx.output.line("Trying to access SMTP mailbox with properties")?;
    for (key, value) in ctx.session.properties() {
        ctx.output.line(&format!("{key}={value}"))?;
    }

    mail::run_session(
        connector,
        ctx.session.clone(),
        &ctx.mailbox_user,
        &token,
        ctx.mail_task.as_ref(),
        &ctx.output,
    )
    .await
}
