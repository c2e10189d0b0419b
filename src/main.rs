use clap::Parser;
use clap::error::ErrorKind;
use smtp_oauth::cli::{self, Cli};
use smtp_oauth::error::EXIT_INVALID_INPUT;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("Wrong arguments.\n{}", err.render());
            std::process::exit(EXIT_INVALID_INPUT);
        }
    };

    if let Err(err) = smtp_oauth::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
