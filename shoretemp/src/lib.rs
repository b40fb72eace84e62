// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod bot;
pub mod chats;
pub mod commands;
pub mod logging;
pub mod messages;
pub mod oneshot;
pub mod transport;
pub mod webhook;

use anyhow::Result;
use config::AppConfig;
use std::{env, path::Path};

pub use bot::ShoreBot;
pub use transport::Transport;

/// Environment always wins over the optional TOML file.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
  match path {
    Some(path) => AppConfig::from_file(path)?.with_overrides(|key| env::var(key).ok()),
    None => AppConfig::from_env(),
  }
}
