use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scm_common::pagination::DEFAULT_PAGE_SIZE;

#[derive(Parser, Debug, Clone)]
#[command(name = "scm-catalogue", about = "Garment SCM catalogue query service")]
pub struct Cli {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "SCM_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port to listen on.
    #[arg(long, env = "SCM_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Data root: holds the metadata file and everything served under /static.
    #[arg(long, env = "SCM_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Product metadata file, relative to the data root unless absolute.
    #[arg(long, env = "SCM_METADATA_FILE", default_value = "products_metadata.json")]
    pub metadata_file: PathBuf,

    /// Page size used when a listing request omits `limit`.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub default_page_size: usize,

    /// Upper bound for `limit`; larger requests are clamped.
    #[arg(long, default_value_t = 100)]
    pub max_page_size: usize,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP service (default).
    Serve,
    /// Write tracking-page URLs and render per-product QR images into the data root.
    AssignTrackingLinks {
        /// Public origin of the storefront, e.g. http://192.168.1.20:5173
        #[arg(long)]
        frontend_url: String,
    },
}

/// Settings the service needs at runtime, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub metadata_path: PathBuf,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let max_page_size = cli.max_page_size.max(1);
        Self {
            bind_addr: format!("{}:{}", cli.host, cli.port),
            data_dir: cli.data_dir.clone(),
            metadata_path: cli.data_dir.join(&cli.metadata_file),
            default_page_size: cli.default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    /// Config rooted at `data_dir` with default file name and page sizes.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            bind_addr: "127.0.0.1:0".into(),
            metadata_path: data_dir.join("products_metadata.json"),
            data_dir,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
        }
    }
}
