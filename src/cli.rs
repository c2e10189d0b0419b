use std::ffi::OsString;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser};

/// Two-letter short form of `--sendAs`; clap only knows single-character shorts.
const SEND_AS_SHORT: &str = "-sa";

#[derive(Debug, Parser)]
#[command(
    name = "smtp-oauth",
    version,
    about = "Verify OAuth2 (XOAUTH2) authentication against Office 365 SMTP"
)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "clientid",
        value_parser = NonEmptyStringValueParser::new(),
        help = "OAuth2 client id"
    )]
    pub client_id: String,
    #[arg(
        short = 's',
        long = "clientSecret",
        visible_alias = "client-secret",
        value_parser = NonEmptyStringValueParser::new(),
        help = "OAuth2 client secret"
    )]
    pub client_secret: String,
    #[arg(
        short = 't',
        long = "tenant",
        value_parser = NonEmptyStringValueParser::new(),
        help = "Directory (tenant) id"
    )]
    pub tenant: String,
    #[arg(
        short = 'e',
        long = "email",
        value_parser = NonEmptyStringValueParser::new(),
        help = "Mailbox user to authenticate as"
    )]
    pub email: String,
    #[arg(
        long = "sendAs",
        visible_alias = "send-as",
        value_name = "ADDRESS",
        help = "From address for the test message (short form: -sa)"
    )]
    pub send_as: Option<String>,
    #[arg(
        short = 'r',
        long = "recipient",
        value_name = "ADDRESS",
        help = "To address for the test message"
    )]
    pub recipient: Option<String>,
    #[arg(long, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, action = ArgAction::Count, help = "Verbose logging (repeat for SMTP trace)")]
    pub verbose: u8,
}

/// Rewrites the `-sa` short form into `--sendAs` so clap can parse it.
///
/// Handles both `-sa value` and `-sa=value`. Anything after a bare `--` is
/// left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }

            let rewritten = match arg.to_str() {
                Some(SEND_AS_SHORT) => Some(OsString::from("--sendAs")),
                Some(value) => value
                    .strip_prefix("-sa=")
                    .map(|address| OsString::from(format!("--sendAs={address}"))),
                None => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}
