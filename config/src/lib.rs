// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod config;

pub use crate::config::{AppConfig, ReportConfig, TelegramSettings, WebhookSettings};

pub mod constants {
  pub const DEFAULT_REPORT_URL: &str =
    "https://forecast.weather.gov/product.php?issuedby=lot&product=omr&site=lot";
  pub const DEFAULT_STATION_LABEL: &str = "CHICAGO SHORE";
  pub const DEFAULT_USER_AGENT: &str = "ChicagoShoreTemp/1.0 (weather check)";
  pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
  pub const DEFAULT_MAX_RETRIES: u32 = 2;
  pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
  pub const DEFAULT_PORT: u16 = 8443;
  pub const WEBHOOK_PATH: &str = "/webhook";
}
