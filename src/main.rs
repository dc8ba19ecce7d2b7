use clap::Parser;
use clap::error::ErrorKind;
use employees::cli::{Action, Cli, MENU};
use employees::cli_handlers;
use employees::config::{SETTINGS_FILE, Settings};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(_) => {
            // A token clap reads as an unknown flag is still just an unknown action
            let token = std::env::args().nth(1).unwrap_or_default();
            println!("{}\n\n{MENU}", Action::unknown(&token));
            return;
        }
    };

    let Some(token) = cli.action else {
        println!("{MENU}");
        return;
    };

    let action = match Action::try_from(token.as_str()) {
        Ok(action) => action,
        Err(e) => {
            println!("{e}\n\n{MENU}");
            return;
        }
    };

    let settings = match Settings::load(SETTINGS_FILE) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "cannot load settings");
            println!("Could not load {SETTINGS_FILE}.");
            return;
        }
    };

    init_tracing(&settings.logging.level);
    cli_handlers::run(action, &cli.args, settings).await;
}
