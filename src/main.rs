//! Photos CLI application entry point
//!
//! Each invocation is one session against the data file: load it, seed the
//! stock user on first run, run one command as the acting user and save the
//! whole user graph again if the command changed anything.
//!
//! # Usage
//!
//! ```bash
//! # Choose who you are (admin manages accounts)
//! photos login admin
//! photos user add alice
//! photos login alice
//!
//! # Build albums
//! photos album create trip
//! photos photo add trip ~/Pictures/paris/*.jpg
//! photos photo caption ~/Pictures/paris/eiffel.jpg "Eiffel tower at dusk"
//!
//! # Tag and search
//! photos tag add ~/Pictures/paris/eiffel.jpg location=paris
//! photos search -t location=paris -t people=bob --any --save-as "paris and bob"
//! photos search --from 2024-05-01 --to 2024-06-01
//!
//! # Look at it
//! photos slideshow trip --open
//! ```
//!
//! # Configuration
//!
//! On first run, photos will prompt for initial setup. Configuration is stored in
//! the user's config directory (`~/.config/photos/config.toml` on Linux).
//! Set `PHOTOS_LOG=debug` to see what happens under the hood.

use clap::CommandFactory;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use photos::{
    Result, bootstrap,
    cli::{Cli, Commands},
    commands::{self, account},
    config::PhotosConfig,
    model::UserList,
    session::Session,
};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("PHOTOS_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Commands that only touch the configuration, never the data file
fn run_standalone(config: &mut PhotosConfig, command: &Commands, quiet: bool) -> Result<()> {
    match command {
        Commands::Config { command } => commands::config(config, command, quiet),
        Commands::Logout => account::logout(config, quiet),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Run a command that needs a session
fn dispatch(users: &mut UserList, session: &Session, command: &Commands, quiet: bool) -> Result<()> {
    match command {
        Commands::User { command } => commands::user(users, session, command, quiet),
        Commands::Album { command } => commands::album(users, session, command, quiet),
        Commands::Photo { command } => commands::photo(users, session, command, quiet),
        Commands::Tag { command } => commands::tag(users, session, command, quiet),
        Commands::Tagtype { command } => commands::tagtype(users, session, command, quiet),
        Commands::Search { .. } => match command.get_search_params() {
            Some(params) => commands::search(users, session, &params, quiet),
            None => Ok(()),
        },
        Commands::Slideshow { album, open } => commands::slideshow(users, session, album, *open, quiet),
        Commands::Login { .. }
        | Commands::Logout
        | Commands::Whoami
        | Commands::Config { .. }
        | Commands::Completions { .. } => Ok(()),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let mut config = PhotosConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    if cli.command.is_standalone() {
        return run_standalone(&mut config, &cli.command, quiet);
    }

    let store = config.store(cli.data.as_deref())?;
    let mut users = store.load_or_default();
    let stock_photos = config.stock_photo_paths()?;
    if bootstrap::ensure_stock_user(&mut users, &stock_photos)?.is_seeded() {
        store.save(&users)?;
    }

    match &cli.command {
        Commands::Login { name } => account::login(&users, &mut config, name, quiet),
        Commands::Whoami => {
            let session = if cli.user.is_some() || config.current_user.is_some() {
                Some(account::resolve_session(&users, cli.user.as_deref(), &config)?)
            } else {
                None
            };
            account::whoami(session.as_ref(), quiet);
            Ok(())
        }
        command => {
            let session = account::resolve_session(&users, cli.user.as_deref(), &config)?;
            tracing::debug!(user = %session.name(), "session started");
            dispatch(&mut users, &session, command, quiet)?;
            if command.mutates() {
                store.save(&users)?;
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
