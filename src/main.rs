use clap::{Args, Parser, Subcommand};
use events_feed::fallback::fallback_data;
use events_feed::format::{format_event_date, format_event_time};
use events_feed::{logging, EventsFeed, FeedConfig, FetchResult, Mode};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "events-feed")]
#[command(about = "Fetch the event catalog, falling back to sample data when the source is unavailable")]
#[command(version)]
struct Cli {
    /// TOML config file; defaults are used if it does not exist
    #[arg(long, global = true, default_value = "events-feed.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Fetch this URL directly, bypassing mode and proxy settings
    #[arg(long)]
    url: Option<String>,

    /// Override the request timeout
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and print the result as JSON
    Fetch {
        #[command(flatten)]
        source: SourceArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Run the pipeline once and print a readable schedule
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the fallback dataset
    Fallback {
        #[arg(long)]
        pretty: bool,
    },
}

fn build_config(path: &Path, source: SourceArgs) -> anyhow::Result<FeedConfig> {
    let mut config = FeedConfig::load(path)?.apply_env()?;
    if let Some(url) = source.url {
        config.mode = Mode::Production;
        config.api_url = url;
        config.cors_proxy_url = None;
    }
    if let Some(secs) = source.timeout_secs {
        config.timeout_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn print_schedule(result: &FetchResult) {
    if result.is_fallback {
        println!("Showing sample events: the event source is currently unavailable.\n");
    }
    println!("{} events", result.data.len());
    for event in result.data.events() {
        println!("\n{}", event.name);

        let start = event.start_date_time();
        let mut when = format_event_date(start);
        if let Some(time) = format_event_time(start) {
            when = format!("{}, {}", when, time);
        }
        if let Some(tz) = &event.dates.timezone {
            when = format!("{} ({})", when, tz);
        }
        println!("  {}", when);

        if let Some(venue) = event.venue() {
            let place: Vec<&str> = [&venue.city, &venue.state]
                .into_iter()
                .flatten()
                .map(|p| p.name.as_str())
                .collect();
            if place.is_empty() {
                println!("  {}", venue.name);
            } else {
                println!("  {}, {}", venue.name, place.join(" "));
            }
        }
        if let Some(kind) = &event.event_type {
            println!("  [{}]", kind);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let _log_guard = logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { source, pretty } => {
            let config = build_config(&cli.config, source)?;
            let feed = EventsFeed::new(config)?;
            let result = feed.fetch_events().await;
            info!(is_fallback = result.is_fallback, events = result.data.len(), "Fetch finished");
            println!("{}", to_json(&result, pretty)?);
        }
        Commands::List { source } => {
            let config = build_config(&cli.config, source)?;
            let feed = EventsFeed::new(config)?;
            let result = feed.fetch_events().await;
            print_schedule(&result);
        }
        Commands::Fallback { pretty } => {
            println!("{}", to_json(fallback_data(), pretty)?);
        }
    }
    Ok(())
}
