use tracing_subscriber::EnvFilter;

/// Maps `-v` repetitions to a filter. Level 2 adds lettre's SMTP trace.
pub fn filter_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,smtp_oauth=info",
        2 => "warn,smtp_oauth=debug,lettre=debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let filter = EnvFilter::new(filter_directive(verbose));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .try_init();
}
