//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Walk server-paginated JSON APIs page by page
#[derive(Parser, Debug)]
#[command(name = "pagechain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every page of an endpoint and print its body
    Walk(WalkArgs),

    /// Print only the page count and record count of an endpoint
    Count(WalkArgs),
}

/// Arguments shared by commands that traverse an endpoint
#[derive(clap::Args, Debug, Clone)]
pub struct WalkArgs {
    /// Endpoint URL
    pub url: String,

    /// Pagination strategy
    #[arg(short, long, default_value = "next-url")]
    pub strategy: StrategyKind,

    /// Extra query parameter (key=value), repeatable
    #[arg(short, long = "query", value_parser = parse_key_value)]
    pub query: Vec<(String, String)>,

    /// Extra header (name:value), repeatable
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Path to the records array in each body (empty = the body itself)
    #[arg(long, default_value = "")]
    pub records_path: String,

    /// Cursor query parameter
    #[arg(long, default_value = "cursor")]
    pub cursor_param: String,

    /// Path to the next cursor in each body
    #[arg(long, default_value = "next_cursor")]
    pub cursor_path: String,

    /// Offset query parameter
    #[arg(long, default_value = "offset")]
    pub offset_param: String,

    /// Limit query parameter
    #[arg(long, default_value = "limit")]
    pub limit_param: String,

    /// Records per page for offset pagination
    #[arg(long, default_value = "100")]
    pub limit: u32,

    /// Page number query parameter
    #[arg(long, default_value = "page")]
    pub page_param: String,

    /// First page number
    #[arg(long, default_value = "1")]
    pub start_page: u32,

    /// Page size query parameter for page number pagination
    #[arg(long)]
    pub page_size_param: Option<String>,

    /// Page size for page number pagination
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Path to the next URL in each body
    #[arg(long, default_value = "next")]
    pub next_path: String,

    /// Link header rel to follow
    #[arg(long, default_value = "next")]
    pub rel: String,
}

/// Pagination strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    /// Cursor taken from the body
    Cursor,
    /// Offset and limit
    Offset,
    /// Page number
    Page,
    /// RFC 5988 Link header
    Link,
    /// Next URL taken from the body
    NextUrl,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected name:value, got '{s}'"))
}
