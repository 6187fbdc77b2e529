//! # Userdesk Server
//!
//! Administrative backend for a table of user accounts.
//!
//! ## Overview
//!
//! - **Actions**: a single tagged endpoint that creates accounts and
//!   overwrites one field at a time (password, block flag, renewal date,
//!   referral count, IP)
//! - **Listing**: every account without its password
//! - **Front-end**: a bundled admin page served at `/`
//!
//! ## Architecture
//!
//! The server is built on Axum and uses PostgreSQL (via SQLx) as the only
//! store. Configuration comes from CLI flags, environment variables, and an
//! optional `.env` file.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use userdesk_core::database::UserAccountsRepository;

use userdesk_server::{
    AppState,
    infra::{
        config::{Config, ServeArgs},
        startup::{connect_database, init_tracing},
    },
    public_ip::{IPIFY_URL, fetch_public_ip},
    routes::create_app,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "userdesk-server")]
#[command(about = "Administrative HTTP backend for user accounts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
    /// Print this host's public IP address and exit
    PublicIp,
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Connect to the database, run a ping, and exit
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    init_tracing();
    if env_file_loaded {
        info!("loaded .env file");
    }

    let config = Config::from_args(&cli.serve);

    match cli.command {
        Some(Command::Db(DbCommand::Ping)) => run_db_ping(&config).await,
        Some(Command::PublicIp) => run_public_ip().await,
        None => run_server(config).await,
    }
}

async fn run_db_ping(config: &Config) -> anyhow::Result<()> {
    let database = connect_database(config).await?;
    database.ping().await.context("database ping failed")?;
    info!("Database ping succeeded");
    Ok(())
}

async fn run_public_ip() -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let ip = fetch_public_ip(&client, IPIFY_URL)
        .await
        .context("failed to obtain public IP")?;
    println!("{ip}");
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let database = connect_database(&config).await?;

    let store: Arc<dyn UserAccountsRepository> = Arc::new(database.user_accounts());
    let state = AppState::new(store, Arc::new(config));
    if let Some(dir) = &state.config().static_dir {
        info!(static_dir = %dir.display(), "serving static files");
    }
    let router = create_app(state);

    info!("Starting userdesk server (HTTP) on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_ping_accepts_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "userdesk-server",
            "db",
            "ping",
            "--database-url",
            "postgres://userdesk@localhost/userdesk",
            "--db-max-connections",
            "2",
        ])
        .expect("flags accepted after subcommand");

        assert!(matches!(cli.command, Some(Command::Db(DbCommand::Ping))));
        assert_eq!(
            cli.serve.database_url.as_deref(),
            Some("postgres://userdesk@localhost/userdesk")
        );
        assert_eq!(cli.serve.db_max_connections, Some(2));
    }

    #[test]
    fn flags_without_subcommand_still_serve() {
        let cli = Cli::try_parse_from(["userdesk-server", "--port", "9090"])
            .expect("serve flags accepted");

        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(9090));
    }
}
