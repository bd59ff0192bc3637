use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::commands::confirm_on_stdin;
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.with_samples)?.print(),

        Command::Add(add_args) => {
            let config = Config::load(home)?;
            commands::add(&config, add_args.clone())?.print()
        }

        Command::Edit(edit_args) => {
            let config = Config::load(home)?;
            commands::edit(&config, edit_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home)?;
            commands::delete(&config, delete_args.clone(), confirm_on_stdin)?.print()
        }

        Command::DeleteAll(delete_all_args) => {
            let config = Config::load(home)?;
            commands::delete_all(&config, delete_all_args.clone(), confirm_on_stdin)?.print()
        }

        Command::List(list_args) => {
            let config = Config::load(home)?;
            commands::list(&config, list_args.clone())?.print()
        }

        Command::Summary => {
            let config = Config::load(home)?;
            commands::summary(&config)?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the binary and library only.
            EnvFilter::new(format!(
                "{}={level},expense_tracker={level}",
                env!("CARGO_CRATE_NAME"),
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
