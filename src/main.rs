mod archiver;
mod config;
mod error;
mod fetcher;
mod gemini;
mod models;
mod parser;
mod pipeline;
mod writer;

#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use tracing::{Level, error};

use crate::config::Config;
use crate::fetcher::SearchClient;
use crate::gemini::GeminiClient;

/// AI SEO blog post creation tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The type of product to search for (e.g. "best running shoes").
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    query: String,
}

fn setup() -> Result<(Config, SearchClient, GeminiClient)> {
    let config = Config::from_env().context("Could not load configuration")?;
    let finder = SearchClient::new(&config).context("Could not create the search client")?;
    let model = GeminiClient::new(&config).context("Could not configure the Google API")?;
    Ok((config, finder, model))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let (config, finder, model) = match setup() {
        Ok(parts) => parts,
        Err(e) => {
            error!("[FATAL] {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&finder, &model, &config.output_dir, &cli.query) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
