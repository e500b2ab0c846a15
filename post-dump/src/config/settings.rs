//! Settings read from the environment and the command line.
use std::env;

use post_dump_generator::config::DEFAULT_TABLE_PREFIX;
use url::Url;

use crate::cli::DumpArgs;
use crate::errors::DumpError;

/// Default size of the connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 2;

/// Resolved connection and naming settings for one dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub table_prefix: String,
    pub database_name: String,
    pub max_connections: u32,
}

/// Database name taken from the path of a connection URL.
fn database_from_url(database_url: &str) -> Result<String, DumpError> {
    let url = Url::parse(database_url)
        .map_err(|e| DumpError::config(format!("Invalid DATABASE_URL: {}", e)))?;
    Ok(url.path().trim_start_matches('/').to_string())
}

impl Settings {
    /// Reads the settings, command-line values taking precedence.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: Source connection URL (required)
    /// - `TABLE_PREFIX`: Table prefix (default: wp_)
    /// - `DB_NAME`: Name recorded in the script header (default: the URL path)
    /// - `DB_MAX_CONNECTIONS`: Pool size (default: 2)
    pub fn from_env(args: &DumpArgs) -> Result<Self, DumpError> {
        let database_url = args
            .database_url
            .clone()
            .or_else(|| env::var("DATABASE_URL").ok())
            .ok_or_else(|| DumpError::config("DATABASE_URL is not set"))?;

        let table_prefix = args
            .table_prefix
            .clone()
            .or_else(|| env::var("TABLE_PREFIX").ok())
            .unwrap_or_else(|| DEFAULT_TABLE_PREFIX.to_string());

        let database_name = match args.db_name.clone().or_else(|| env::var("DB_NAME").ok()) {
            Some(name) => name,
            None => database_from_url(&database_url)?,
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            database_url,
            table_prefix,
            database_name,
            max_connections,
        })
    }
}
