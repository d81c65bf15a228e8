//! CLI that extracts one article and prints it as JSON.
//!
//! ```text
//! goose_extract https://example.com/story
//! curl -s https://example.com/story | goose_extract --stdin https://example.com/story
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rs_goose::{Configuration, ContentExtractor, MetaTagPublishDateExtractor};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "goose_extract", about = "Extract the article from a web page")]
struct Args {
    /// Page URL. Also used to resolve relative links when HTML is supplied.
    url: String,

    /// Read the page HTML from this file instead of fetching it.
    #[arg(long, conflicts_with = "stdin")]
    html_file: Option<PathBuf>,

    /// Read the page HTML from stdin instead of fetching it.
    #[arg(long)]
    stdin: bool,

    /// Prune only empty and negative-scored elements from the body.
    #[arg(long)]
    viewer: bool,

    /// Skip downloading candidate images.
    #[arg(long)]
    no_images: bool,

    /// Directory for temporary image files.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn read_html(args: &Args) -> io::Result<Option<String>> {
    if let Some(path) = &args.html_file {
        return fs::read_to_string(path).map(Some);
    }
    if args.stdin {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        return Ok(Some(html));
    }
    Ok(None)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let html = match read_html(&args) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to read HTML: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Configuration {
        enable_image_fetching: !args.no_images,
        publish_date_extractor: Arc::new(MetaTagPublishDateExtractor),
        ..Configuration::default()
    };
    if let Some(dir) = &args.cache_dir {
        config.cache_directory.clone_from(dir);
    }

    let extractor = match ContentExtractor::new(config) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let article = match extractor.extract(&args.url, html.as_deref(), args.viewer) {
        Ok(Some(article)) => article,
        Ok(None) => {
            eprintln!("Could not fetch {}", args.url);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = article.summary();
    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize article: {e}");
            ExitCode::FAILURE
        }
    }
}
