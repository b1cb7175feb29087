use tracing_subscriber::EnvFilter;

pub fn setup_logger() {
    tracing_subscriber::fmt()
        // .with_file(true)
        // .with_line_number(true)
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_env_filter(base_filter())
        .init();
}

/// Logger for the TUI binary: events go to stderr so the dashboard owns
/// stdout.
pub fn setup_stderr_logger() {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_env_filter(base_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn base_filter() -> EnvFilter {
    EnvFilter::new("debug")
        .add_directive("hyper=info".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap())
        .add_directive("teloxide=info".parse().unwrap())
}
