use std::path::PathBuf;

use clap::Args as ClapArgs;

/// Flags shared by `serve` and the subcommands; they are accepted before or
/// after the subcommand name. Every flag falls back
/// to an environment variable, which may itself come from a `.env` file.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub database_url: Option<String>,

    /// Server port
    #[arg(short, long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Server host
    #[arg(long, env = "HOST", global = true)]
    pub host: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", global = true)]
    pub db_max_connections: Option<u32>,

    /// Directory served for paths no route matches
    #[arg(long, env = "STATIC_DIR", global = true)]
    pub static_dir: Option<PathBuf>,

    /// Comma-separated list of allowed CORS origins (defaults to any)
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        global = true
    )]
    pub cors_allowed_origins: Vec<String>,
}
