// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("API error: {0}")]
  ApiError(String),
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("Unexpected status {status} for {url}")]
  UnexpectedStatus {
    status: reqwest::StatusCode,
    url: String,
  },
  #[error("Failed to parse response: {0}")]
  ParseError(String),
  #[error("Regex error: {0}")]
  RegexError(#[from] regex::Error),
  #[error("Rate limit exceeded")]
  RateLimitExceeded,
  #[error("No reading for station '{0}' in report")]
  ReadingNotFound(String),
  #[error("Message too long: {len} characters (max {max})")]
  MessageTooLong { len: usize, max: usize },
  #[error("File not found: {0}")]
  PathNotFound(PathBuf),
  #[error("{0}")]
  Err(String),
}
