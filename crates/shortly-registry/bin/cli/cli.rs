use clap::{Parser, Subcommand, ValueEnum};
use shortly_registry::config::{DEFAULT_BASE_URL, DEFAULT_STORAGE_PATH};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const BASE_URL_ENV: &str = "SHORTLY_BASE_URL";
pub const STORAGE_PATH_ENV: &str = "SHORTLY_STORAGE_PATH";
pub const LOG_FORMAT_ENV: &str = "SHORTLY_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortly", about = "Shorten URLs into a local JSON registry")]
pub struct CLI {
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[arg(long, env = STORAGE_PATH_ENV, default_value = DEFAULT_STORAGE_PATH, global = true)]
    pub storage_path: PathBuf,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text,
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Runs the demo sequence when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL, optionally under a custom code
    Shorten {
        url: String,
        custom_code: Option<String>,
    },
    /// Print the original URL without counting a click
    Expand { code: String },
    /// Print the original URL and count a click
    Visit { code: String },
    /// Print stats for one code, or for the whole registry
    Stats { code: Option<String> },
    /// List every short URL
    List,
    /// Delete a short URL
    Delete { code: String },
}
