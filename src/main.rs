mod app;
mod cache;
mod config;
mod event;
mod items;
mod remote;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postly")]
#[command(about = "A terminal UI for a remote post list")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/postly/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Posts API base url (overrides the config file)
  #[arg(short, long)]
  api_url: Option<String>,

  /// Skip the local cache entirely
  #[arg(long)]
  no_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // The terminal belongs to the TUI; diagnostics go to a log file.
  let _log_guard = init_logging()?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  // Override the endpoint if specified on the command line
  let config = if let Some(api_url) = args.api_url {
    config::Config {
      api: config::ApiConfig { base_url: api_url },
      ..config
    }
  } else {
    config
  };

  let store: Box<dyn cache::CacheStore> = if args.no_cache {
    Box::new(cache::NoopStore)
  } else {
    Box::new(cache::SqliteStore::open()?)
  };

  // Initialize and run the app
  let mut app = app::App::new(&config, store)?;
  app.run().await?;

  Ok(())
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
  use tracing_subscriber::EnvFilter;

  let log_dir = dirs::data_dir()
    .map(|d| d.join("postly"))
    .unwrap_or_else(|| PathBuf::from("."));
  std::fs::create_dir_all(&log_dir)?;

  let appender = tracing_appender::rolling::never(log_dir, "postly.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("POSTLY_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}
