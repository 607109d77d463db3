mod scrape;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reviewscope")]
#[command(about = "Scrape Amazon, Flipkart and Snapdeal product reviews into CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one or more review listing URLs and export the reviews
    Scrape {
        /// Review listing URLs, scraped in the order given
        #[arg(required = true)]
        urls: Vec<String>,
        /// Pages to fetch per URL (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pages: Option<u32>,
        /// URLs to scrape at the same time
        #[arg(long)]
        concurrency: Option<usize>,
        /// Skip malformed review blocks without listing each one
        #[arg(long)]
        skip_malformed: bool,
        /// Where to write the CSV export
        #[arg(long)]
        output: Option<PathBuf>,
        /// Rows to show in the preview
        #[arg(long)]
        preview: Option<usize>,
        /// Do not write the CSV export to disk
        #[arg(long)]
        no_download: bool,
    },
    /// Show the first rows of an existing CSV export
    Preview {
        /// Export to read (defaults to the configured output path)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Rows to show
        #[arg(long)]
        rows: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = reviewscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scrape {
            urls,
            pages,
            concurrency,
            skip_malformed,
            output,
            preview,
            no_download,
        } => {
            let mut config = config;
            if let Some(pages) = pages {
                config.max_pages = pages;
            }
            if let Some(concurrency) = concurrency {
                config.max_concurrent_urls = concurrency.max(1);
            }
            if skip_malformed {
                config.report_malformed = false;
            }
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(preview) = preview {
                config.preview_rows = preview;
            }
            scrape::run_scrape(&config, &urls, !no_download).await
        }
        Commands::Preview { file, rows } => {
            let path = file.unwrap_or_else(|| config.output_path.clone());
            let rows = rows.unwrap_or(config.preview_rows);
            println!("{}", shell::preview_file(&path, rows)?);
            Ok(())
        }
    }
}
