//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, StrategyKind, WalkArgs};
use crate::error::{Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::rest::{
    count_records, CursorStrategy, LinkHeaderStrategy, NextUrlStrategy, OffsetStrategy,
    PageNumberStrategy, RestPager, Strategy,
};
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, printing to `out`
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Walk(args) => self.walk(args, out, true),
            Commands::Count(args) => self.walk(args, out, false),
        }
    }

    /// Dispatch on the chosen strategy
    fn walk<W: Write>(&self, args: &WalkArgs, out: &mut W, print_pages: bool) -> Result<()> {
        let client = Arc::new(Self::build_client(args)?);

        match args.strategy {
            StrategyKind::Cursor => {
                let strategy = CursorStrategy::new(&args.cursor_param, &args.cursor_path)
                    .records_at(&args.records_path);
                self.walk_with(client, args, strategy, out, print_pages)
            }
            StrategyKind::Offset => {
                let strategy =
                    OffsetStrategy::new(&args.offset_param, &args.limit_param, args.limit)
                        .records_at(&args.records_path);
                self.walk_with(client, args, strategy, out, print_pages)
            }
            StrategyKind::Page => {
                let mut strategy = PageNumberStrategy::new(&args.page_param, args.start_page)
                    .records_at(&args.records_path);
                if let (Some(param), Some(size)) = (&args.page_size_param, args.page_size) {
                    strategy = strategy.with_page_size(param, size);
                }
                self.walk_with(client, args, strategy, out, print_pages)
            }
            StrategyKind::Link => {
                let strategy = LinkHeaderStrategy::new(&args.rel);
                self.walk_with(client, args, strategy, out, print_pages)
            }
            StrategyKind::NextUrl => {
                let strategy = NextUrlStrategy::new(&args.next_path);
                self.walk_with(client, args, strategy, out, print_pages)
            }
        }
    }

    fn walk_with<S: Strategy + 'static, W: Write>(
        &self,
        client: Arc<HttpClient>,
        args: &WalkArgs,
        strategy: S,
        out: &mut W,
        print_pages: bool,
    ) -> Result<()> {
        let mut base = RequestConfig::new();
        for (key, value) in &args.query {
            base = base.query(key, value);
        }

        let pager = RestPager::new(client, &args.url, strategy).with_request(base);
        let max_pages = args.max_pages.unwrap_or(usize::MAX);

        let start = Instant::now();
        let mut pages = 0usize;
        let mut records = 0usize;

        for page in pager.pages().take(max_pages) {
            let page = page?;
            let body = page.response()?.payload().cloned().unwrap_or(Value::Null);
            pages += 1;
            records += count_records(&body, &args.records_path);

            if print_pages {
                self.output_page(out, pages, &body)?;
            }
        }

        info!(
            pages,
            records,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Walk complete"
        );

        if !print_pages {
            let summary = serde_json::json!({ "pages": pages, "records": records });
            writeln!(out, "{summary}")?;
        }
        Ok(())
    }

    /// Build the HTTP client from arguments
    fn build_client(args: &WalkArgs) -> Result<HttpClient> {
        let mut config = HttpClientConfig::builder().timeout(Duration::from_secs(args.timeout));
        for (name, value) in &args.headers {
            config = config.header(name, value);
        }
        HttpClient::with_config(config.build()).context("Failed to build HTTP client")
    }

    /// Output one page
    fn output_page<W: Write>(&self, out: &mut W, index: usize, body: &Value) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string(body)?)
                    .with_context(|| format!("Failed to write page {index}"))?;
            }
            OutputFormat::Pretty => {
                writeln!(out, "--- page {index} ---\n{}", serde_json::to_string_pretty(body)?)
                    .with_context(|| format!("Failed to write page {index}"))?;
            }
        }
        Ok(())
    }
}
