use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use passvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `passvault get` output stays pipeable.
    let filter = EnvFilter::try_from_env("PASSVAULT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("passvault=debug")
        } else {
            EnvFilter::new("passvault=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Some(Commands::Add {
            ref account,
            ref password,
        }) => passvault::cli::commands::add::execute(&cli, account, password.as_deref()),
        Some(Commands::Get { ref account }) => passvault::cli::commands::get::execute(&cli, account),
        Some(Commands::List) => passvault::cli::commands::list::execute(&cli),
        Some(Commands::Delete { ref account, force }) => {
            passvault::cli::commands::delete::execute(&cli, account, force)
        }
        Some(Commands::Completions { shell }) => {
            passvault::cli::commands::completions::execute(shell)
        }
        Some(Commands::Menu) | None => passvault::cli::commands::menu::execute(&cli),
    };

    if let Err(e) = result {
        if passvault::cli::report_error(&e) {
            std::process::exit(1);
        }
    }
}
