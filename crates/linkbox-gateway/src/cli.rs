use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

pub const LISTEN_ADDR_ENV: &str = "LINKBOX_LISTEN_ADDR";
pub const DATA_FILE_ENV: &str = "LINKBOX_DATA_FILE";
pub const PUBLIC_BASE_URL_ENV: &str = "LINKBOX_PUBLIC_BASE_URL";
pub const RECOVER_CORRUPT_ENV: &str = "LINKBOX_RECOVER_CORRUPT";
pub const FALLBACK_PAGE_ENV: &str = "LINKBOX_FALLBACK_PAGE";
pub const LOG_FORMAT_ENV: &str = "LINKBOX_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_DATA_FILE: &str = "data/urls.json";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3001/s";

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
#[command(name = "linkbox", about = "URL shortener backed by a JSON file")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// JSON file holding every short link. Its directory is created if missing.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Base URL that short codes are appended to.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: Url,

    /// Start empty instead of failing when the data file is corrupt.
    #[arg(long, env = RECOVER_CORRUPT_ENV)]
    pub recover_corrupt: bool,

    /// HTML page served when a short link cannot be resolved.
    #[arg(long, env = FALLBACK_PAGE_ENV)]
    pub fallback_page: Option<PathBuf>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}
