use clap::Parser;
use log::{error, warn};
use rezept_scraper::{RecipeScraper, ScraperConfig};
use std::process::ExitCode;

/// Scrape recipe pages and print them as markdown documents
#[derive(Parser, Debug)]
#[command(name = "rezept-scraper", version, about)]
struct Cli {
    /// Recipe page URLs
    #[arg(required = true)]
    urls: Vec<String>,

    /// Print the results as a JSON array instead of markdown
    #[arg(long)]
    json: bool,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ScraperConfig::load().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {}", e);
        ScraperConfig::default()
    });
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }

    let scraper = match RecipeScraper::from_config(&config) {
        Ok(scraper) => scraper,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let results = scraper.parse_recipes(&cli.urls).await;
    let failed = results.iter().filter(|r| !r.success).count();

    if cli.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for result in &results {
            match (&result.content, &result.error) {
                (Some(content), _) => println!("{content}"),
                (None, Some(error)) => eprintln!("{}: {}", result.url, error),
                (None, None) => eprintln!("{}: no result", result.url),
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} URLs failed", failed, results.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
