//! CLI entry and dispatch.

use anyhow::{Context, Result};
use campusride_core::{config, logging};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "campusride")]
#[command(version)]
#[command(about = "Drive the CampusRide sign-in flow from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the startup sequence up to the Welcome screen
    Boot,

    /// Sign in with an existing account
    Login {
        /// Email address or username
        #[arg(long, value_name = "NAME")]
        identifier: Option<String>,
        /// Email address (email tab)
        #[arg(long)]
        email: Option<String>,
        /// Phone number (phone tab)
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init();

    // The controller is single-threaded.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let load_config = || config::Config::load().context("load config");

    match cli.command {
        Commands::Boot => commands::boot::run(&load_config()?).await,
        Commands::Login {
            identifier,
            email,
            phone,
            password,
        } => {
            let account = match (identifier, email, phone) {
                (Some(name), None, None) => commands::login::Account::Identifier(name),
                (None, Some(email), None) => commands::login::Account::Email(email),
                (None, None, Some(phone)) => commands::login::Account::Phone(phone),
                _ => anyhow::bail!("Please specify exactly one of --identifier, --email or --phone"),
            };
            commands::login::run(&load_config()?, account, password.unwrap_or_default()).await
        }
        Commands::Signup {
            username,
            email,
            password,
        } => {
            let profile = commands::signup::Profile {
                username,
                email,
                password,
            };
            commands::signup::run(&load_config()?, profile).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
