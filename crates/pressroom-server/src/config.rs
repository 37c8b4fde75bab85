use std::time::Duration;

use crate::error::Result;
pub use clap::Parser;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
pub struct AuthorsServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3001,
        env = "AUTHORS_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,

    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "AUTHORS_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "AUTHORS_DATABASE_URL",
        default_value = "sqlite://authors.db",
        help = "Database URL, e.g. sqlite://authors.db"
    )]
    pub database_url: String,

    #[arg(
        long,
        env = "AUTHORS_DEFAULT_PAGE_SIZE",
        default_value = "10",
        help = "Default page size"
    )]
    pub default_page_size: u32,

    #[arg(
        long,
        env = "AUTHORS_MAX_PAGE_SIZE",
        default_value = "100",
        help = "Maximum page size, larger requested limits are clamped"
    )]
    pub max_page_size: u32,

    #[arg(long, env = "AUTHORS_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl AuthorsServerConfig {
    pub fn load() -> Result<Self> {
        AuthorsServerConfig::try_parse().map_err(|e| e.into())
    }
}

#[derive(Debug, Clone, clap::Parser)]
pub struct PublicationsServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3002,
        env = "PUBLICATIONS_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,

    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "PUBLICATIONS_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "PUBLICATIONS_DATABASE_URL",
        default_value = "sqlite://publications.db",
        help = "Database URL, e.g. sqlite://publications.db"
    )]
    pub database_url: String,

    #[arg(
        long,
        env = "PUBLICATIONS_AUTHORS_URL",
        default_value = "http://localhost:3001",
        help = "Base URL of the authors service, used to validate author ids"
    )]
    pub authors_url: Url,

    #[arg(
        long,
        env = "PUBLICATIONS_AUTHORS_TIMEOUT",
        default_value = "30s",
        help = "Timeout for author lookups in human friendly format (e.g. 30s, 1m)",
        value_parser = humantime::parse_duration
    )]
    pub authors_timeout: Duration,

    #[arg(
        long,
        env = "PUBLICATIONS_DEFAULT_PAGE_SIZE",
        default_value = "10",
        help = "Default page size"
    )]
    pub default_page_size: u32,

    #[arg(
        long,
        env = "PUBLICATIONS_MAX_PAGE_SIZE",
        default_value = "100",
        help = "Maximum page size, larger requested limits are clamped"
    )]
    pub max_page_size: u32,

    #[arg(long, env = "PUBLICATIONS_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl PublicationsServerConfig {
    pub fn load() -> Result<Self> {
        PublicationsServerConfig::try_parse().map_err(|e| e.into())
    }
}
