use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use claimmeta::{run, Cli, Config};

fn main() {
    // Initialize tracing on stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_args();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: CLAIMMETA_CURRENCIES (default: BTC:crypto,LBC:crypto,USD:fiat)");
            eprintln!("Optional: CLAIMMETA_ENCODING (default: hex)");
            std::process::exit(1);
        }
    };

    tracing::debug!(
        currencies = config.currencies.len(),
        encoding = ?config.encoding,
        "configuration loaded"
    );

    match run(&cli.command, &config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
