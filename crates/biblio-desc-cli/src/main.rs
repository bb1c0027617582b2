use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biblio_desc=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match biblio_desc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("biblio-desc error: {err:#}");
            process::exit(1);
        }
    }
}
