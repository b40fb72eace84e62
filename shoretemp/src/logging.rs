// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use tracing::{debug, warn, Level};

pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[cfg(debug_assertions)]
pub fn setup_logging(level: Level) {
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
pub fn setup_logging(level: Level) {
  tracing_subscriber::fmt().with_max_level(level).init();
}

/// Loads `.env` if present, then installs the subscriber.
pub fn bootstrap(level: Level) {
  let dotenv = base::dotenv::load();
  setup_logging(level);

  match dotenv {
    Ok(()) => debug!("Loaded .env"),
    Err(Error::PathNotFound(path)) => debug!("No {} file, using process environment", path.display()),
    Err(e) => warn!("Ignoring .env: {}", e),
  }
}
