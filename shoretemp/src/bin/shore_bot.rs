// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use clap::Parser;
use shore::ShoreTempService;
use shoretemp::{commands, logging, ShoreBot, Transport};
use std::{path::PathBuf, process, sync::Arc};
use telegram::TelegramClient;
use tracing::{error, info, warn, Level};

#[derive(Debug, Parser)]
#[clap(name = "shore-bot", version = clap::crate_version!())]
/// Interactive Telegram bot for the Chicago Shore water temperature.
/// Polls for updates unless RENDER_EXTERNAL_URL is set, in which case it serves a webhook
struct ShoreBotApplication {
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
  let opts = ShoreBotApplication::parse();
  logging::bootstrap(opts.log_level);

  let config = shoretemp::load_config(opts.config.as_deref())?;

  let Some(token) = config.telegram.bot_token.as_deref() else {
    error!("TELEGRAM_BOT_TOKEN is not set. Add it to your .env file (get it from @BotFather).");
    process::exit(1);
  };

  let client = TelegramClient::builder().token(token).build()?;
  let source = ShoreTempService::new(&config.report).context("Invalid report configuration")?;
  let transport = Transport::from_settings(&config.webhook)?;

  if let Err(e) = client.set_my_commands(&commands::menu()).await {
    warn!("Failed to publish command menu: {}", e);
  }

  let bot = Arc::new(ShoreBot::new(Box::new(source), Box::new(client.clone())));
  transport.run(client, bot).await?;

  info!("Bot stopped");
  Ok(())
}
