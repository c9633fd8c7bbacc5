use color_eyre::{eyre::eyre, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "folio.log";

fn filter() -> EnvFilter {
  EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("folio_cache=info,folio=info"))
}

/// Install the global subscriber.
///
/// Logs go to a file in the data directory so stdout only carries JSON.
/// With `verbose` they go to stderr instead. Keep the returned guard alive
/// until exit or buffered lines are lost.
pub fn init(verbose: bool) -> Result<Option<WorkerGuard>> {
  if verbose {
    tracing_subscriber::fmt()
      .with_env_filter(filter())
      .with_writer(std::io::stderr)
      .with_target(false)
      .compact()
      .try_init()
      .map_err(|e| eyre!("Failed to install logger: {}", e))?;
    return Ok(None);
  }

  let dir = crate::config::data_dir()?;
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let file = tracing_appender::rolling::never(&dir, LOG_FILE);
  let (writer, guard) = tracing_appender::non_blocking(file);
  tracing_subscriber::fmt()
    .with_env_filter(filter())
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| eyre!("Failed to install logger: {}", e))?;

  Ok(Some(guard))
}
