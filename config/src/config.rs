// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::*;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub report: ReportConfig,
  pub telegram: TelegramSettings,
  pub webhook: WebhookSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
  pub url: String,
  pub station_label: String,
  pub user_agent: String,
  pub timeout_secs: u64,
  pub max_retries: u32,
  pub retry_delay_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
  pub bot_token: Option<String>,
  pub chat_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
  pub external_url: Option<String>,
  pub port: u16,
  pub path: String,
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self {
      url: DEFAULT_REPORT_URL.to_string(),
      station_label: DEFAULT_STATION_LABEL.to_string(),
      user_agent: DEFAULT_USER_AGENT.to_string(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      max_retries: DEFAULT_MAX_RETRIES,
      retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
    }
  }
}

impl Default for WebhookSettings {
  fn default() -> Self {
    Self {
      external_url: None,
      port: DEFAULT_PORT,
      path: WEBHOOK_PATH.to_string(),
    }
  }
}

impl ReportConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  pub fn retry_delay(&self) -> Duration {
    Duration::from_secs(self.retry_delay_secs)
  }
}

impl AppConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    Self::default().with_overrides(lookup)
  }

  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = Self::from_toml_str(&content)?;
    tracing::debug!("Loaded configuration successfully");
    Ok(config)
  }

  pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
    let mut config: Self = toml::from_str(content).context("Invalid TOML configuration")?;
    config.telegram.bot_token = normalize(config.telegram.bot_token);
    config.webhook.external_url = normalize(config.webhook.external_url);
    config.telegram.chat_ids = config
      .telegram
      .chat_ids
      .iter()
      .filter_map(|id| normalize(Some(id.clone())))
      .collect();
    Ok(config)
  }

  /// Applies environment-style keys on top of the current values. Blank values count as unset.
  pub fn with_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| normalize(lookup(key));

    if let Some(url) = get("NOAA_OMR_URL") {
      self.report.url = url;
    }
    if let Some(label) = get("SHORE_STATION_LABEL") {
      self.report.station_label = label;
    }
    if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
      self.telegram.bot_token = Some(token);
    }
    if let Some(ids) = get("TELEGRAM_CHAT_ID") {
      self.telegram.chat_ids = split_list(&ids);
    }
    if let Some(url) = get("RENDER_EXTERNAL_URL") {
      self.webhook.external_url = Some(url);
    }
    if let Some(port) = get("PORT") {
      self.webhook.port = port
        .parse()
        .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
    }

    Ok(self)
  }
}

fn normalize(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|id| !id.is_empty())
    .map(String::from)
    .collect()
}
