use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser as _;
use posts_cli::{Args, Config, UreqTransport};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posts=warn,posts_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(Args::parse());
    let transport = UreqTransport::new(config.timeout);

    let mut stdout = std::io::stdout().lock();
    match posts_cli::run(&config, &transport, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            tracing::warn!(?failure, "run aborted");
            let _ = writeln!(stdout, "{failure}");
            ExitCode::FAILURE
        }
    }
}
