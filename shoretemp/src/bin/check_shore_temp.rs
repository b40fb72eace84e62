// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use shore::ShoreTempService;
use shoretemp::{chats, logging, oneshot};
use std::{io, path::PathBuf, process};
use telegram::{Notifier, TelegramClient};
use tracing::{error, Level};

#[derive(Debug, Parser)]
#[clap(name = "check-shore-temp", version = clap::crate_version!())]
/// Chicago Shore (Lake Michigan) temperature -> Telegram
struct CheckShoreTemp {
  /// Print your Telegram chat ID (message your bot first, then run this)
  #[clap(long)]
  get_chat_id: bool,

  /// TOML configuration file. Environment variables override its values
  #[clap(long)]
  config: Option<PathBuf>,

  /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
  /// (case insensitive)
  #[clap(long, default_value_t = logging::DEFAULT_LOG_LEVEL)]
  log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
  let opts = CheckShoreTemp::parse();
  logging::bootstrap(opts.log_level);

  let config = shoretemp::load_config(opts.config.as_deref())?;

  if opts.get_chat_id {
    let found = print_chat_ids(&config).await;
    process::exit(if found { 0 } else { 1 });
  }

  let source = ShoreTempService::new(&config.report).context("Invalid report configuration")?;
  let notifier = Notifier::from_settings(&config.telegram)?;

  oneshot::run_once(&source, &notifier).await;
  Ok(())
}

async fn print_chat_ids(config: &AppConfig) -> bool {
  let Some(token) = config.telegram.bot_token.as_deref() else {
    error!("Set TELEGRAM_BOT_TOKEN in .env (from @BotFather)");
    return false;
  };

  let client = match TelegramClient::builder().token(token).build() {
    Ok(client) => client,
    Err(e) => {
      error!("Failed to create Telegram client: {}", e);
      return false;
    }
  };

  match chats::list_chats(&client, &mut io::stdout()).await {
    Ok(found) => found,
    Err(e) => {
      error!("Failed to call Telegram: {}", e);
      false
    }
  }
}
