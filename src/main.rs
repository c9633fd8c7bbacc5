use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use folio_cache::api::{ApiClient, PortfolioApi, Resource};
use folio_cache::cache::{CacheLayer, KeyValueStore, MemoryStore, RequestOptions, SqliteStore};
use folio_cache::config::{Config, StoreKind};
use folio_cache::logging;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Offline-tolerant caching client for a portfolio API")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/folio-cache/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Drop every cached entry before running the command
  #[arg(long, global = true)]
  fresh: bool,

  /// Log to stderr instead of the log file
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
  /// Read a resource; prints live, cached or bundled data
  Get {
    #[arg(value_enum)]
    resource: Resource,
    /// Read a single item of a collection
    #[arg(long)]
    id: Option<u64>,
  },
  /// Read any endpoint through the cache
  Fetch { endpoint: String },
  /// Drop the cached entry for an endpoint and fetch it again
  Refresh { endpoint: String },
  /// Drop the cached entry for an endpoint
  Invalidate { endpoint: String },
  /// Remove every cached entry
  Clear,
  /// Check backend health (never cached)
  Health,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _guard = logging::init(args.verbose)?;

  // Load configuration
  let mut config = Config::load(args.config.as_deref())?;
  if args.fresh {
    config.cache.clear_on_start = true;
  }

  match config.cache.store {
    StoreKind::Sqlite => {
      let store = match &config.cache.path {
        Some(path) => SqliteStore::open_at(path)?,
        None => SqliteStore::open()?,
      };
      run(store, &config, args.command).await
    }
    StoreKind::Memory => run(MemoryStore::new(), &config, args.command).await,
  }
}

async fn run<S: KeyValueStore>(store: S, config: &Config, command: Command) -> Result<()> {
  let client = ApiClient::new(&config.api)?;
  let api = PortfolioApi::new(CacheLayer::new(
    store,
    client,
    config.cache.to_cache_config(),
  ));

  if config.cache.clear_on_start {
    api.reset_session();
  }
  info!(api = %config.api.url, ttl_ms = config.cache.ttl_ms, "ready");

  match command {
    Command::Get { resource, id } => {
      let result = match id {
        Some(id) => api.item(resource, id).await,
        None => api.get(resource).await,
      };
      info!(
        endpoint = resource.endpoint(),
        source = result.source.as_str(),
        "resolved"
      );
      print_json(&result.data)
    }
    Command::Fetch { endpoint } => {
      let data: Value = api
        .cache()
        .fetch_with_cache(&endpoint, &RequestOptions::get())
        .await
        .map_err(|e| eyre!("Failed to fetch {}: {}", endpoint, e))?;
      print_json(&data)
    }
    Command::Refresh { endpoint } => {
      api
        .cache()
        .refresh(&endpoint)
        .await
        .map_err(|e| eyre!("Failed to refresh {}: {}", endpoint, e))?;
      println!("refreshed {}", endpoint);
      Ok(())
    }
    Command::Invalidate { endpoint } => {
      api.cache().invalidate(&endpoint);
      println!("invalidated {}", endpoint);
      Ok(())
    }
    Command::Clear => {
      let removed = api.cache().clear_cache();
      println!("removed {} cached entries", removed);
      Ok(())
    }
    Command::Health => {
      let status = api
        .health()
        .await
        .map_err(|e| eyre!("Health check failed: {}", e))?;
      print_json(&status)
    }
  }
}

fn print_json(value: &Value) -> Result<()> {
  let text =
    serde_json::to_string_pretty(value).map_err(|e| eyre!("Failed to render JSON: {}", e))?;
  println!("{}", text);
  Ok(())
}
