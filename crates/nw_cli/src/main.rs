use clap::Parser;
use nw_cache::CacheStore;
use nw_client::{NewsApiClient, NewsApiConfig, NewsSource};
use nw_core::{IntervalUnit, Result, SearchRequest};
use nw_search::SearchOrchestrator;
use nw_web::AppState;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    'd' => total_seconds += num * 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds += num;
                    has_unit = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword news search with time-interval grouping and offline fallback", long_about = None)]
struct Cli {
    /// NewsAPI.org API key
    #[arg(long, env = "NEWS_API_KEY", default_value = "")]
    api_key: String,
    #[arg(long, default_value = "https://newsapi.org/v2")]
    base_url: String,
    /// Upstream request timeout (e.g. 10s, 1m)
    #[arg(long, default_value = "10s")]
    timeout: HumanDuration,
    #[arg(long, default_value_t = 3)]
    retry_attempts: u32,
    /// How long cached search results stay valid (e.g. 24h, 90m)
    #[arg(long, default_value = "24h")]
    cache_ttl: HumanDuration,
    /// How often expired cache entries are swept
    #[arg(long, default_value = "1h")]
    cleanup_period: HumanDuration,
    /// Report offline mode as enabled in the health endpoint
    #[arg(long)]
    offline_enabled: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a single search and print the grouped result as JSON
    Search {
        keyword: String,
        #[arg(long, default_value_t = 12)]
        interval_value: i64,
        /// minutes, hours, days, weeks, months or years
        #[arg(long, default_value = "hours")]
        interval_unit: String,
        /// Skip the live source and answer from cache/sample data
        #[arg(long)]
        offline: bool,
    },
    /// Serve the REST API
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let client = NewsApiClient::new(NewsApiConfig {
        base_url: cli.base_url.clone(),
        api_key: cli.api_key.clone(),
        timeout: cli.timeout.0,
        retry_attempts: cli.retry_attempts,
    })?;
    let source: Arc<dyn NewsSource> = Arc::new(client);

    let ttl = chrono::Duration::from_std(cli.cache_ttl.0)
        .map_err(|e| nw_core::Error::Validation(format!("Invalid cache TTL: {}", e)))?;
    let cache = Arc::new(CacheStore::new(ttl));
    let cleanup = cache.spawn_cleanup(cli.cleanup_period.0);

    let orchestrator = Arc::new(SearchOrchestrator::new(
        source,
        cache.clone(),
        cli.offline_enabled,
    ));

    match cli.command {
        Commands::Search {
            keyword,
            interval_value,
            interval_unit,
            offline,
        } => {
            let unit = interval_unit.parse::<IntervalUnit>()?;
            let request = SearchRequest {
                keyword,
                interval_value: Some(interval_value),
                interval_unit: Some(unit),
                offline_mode: Some(offline),
            };
            let result = orchestrator.search(request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Serve { port } => {
            let app = nw_web::create_app(AppState {
                orchestrator: orchestrator.clone(),
                cache: cache.clone(),
            });
            let addr = format!("0.0.0.0:{}", port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("🗞️ Listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }

    cleanup.abort();
    Ok(())
}
