// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::extract::ReportParser;
use async_trait::async_trait;
use config::ReportConfig;
use error::Error;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

#[async_trait]
pub trait TemperatureSource: Send + Sync {
  /// Current reading in Fahrenheit, or `None` when it could not be fetched or found.
  async fn fetch_temperature(&self) -> Option<i32>;
}

pub struct ShoreTempService {
  client: Client,
  url: Url,
  parser: ReportParser,
  max_retries: u32,
  retry_delay: Duration,
}

impl ShoreTempService {
  #[instrument(skip(config))]
  pub fn new(config: &ReportConfig) -> Result<Self, Error> {
    let url = Url::parse(&config.url).map_err(|e| {
      Error::ConfigError(format!("Invalid report URL '{}': {}", config.url, e))
    })?;

    let client = Client::builder()
      .timeout(config.timeout())
      .user_agent(config.user_agent.as_str())
      .build()
      .map_err(Error::HttpError)?;

    Ok(Self {
      client,
      url,
      parser: ReportParser::new(&config.station_label)?,
      max_retries: config.max_retries,
      retry_delay: config.retry_delay(),
    })
  }

  /// Same as [`TemperatureSource::fetch_temperature`] but keeps the reason for a missing reading.
  pub async fn read_temperature(&self) -> Result<i32, Error> {
    let html = self.fetch_report().await?;
    self.parser.parse_html(&html)
  }

  #[instrument(skip(self), fields(url = %self.url))]
  async fn fetch_report(&self) -> Result<String, Error> {
    for attempt in 0..=self.max_retries {
      match self.try_fetch_report().await {
        Ok(body) => {
          debug!("Fetched report ({} bytes)", body.len());
          return Ok(body);
        }
        Err(e) => {
          if attempt == self.max_retries {
            error!("All {} fetch attempts failed", attempt + 1);
            return Err(e);
          }
          warn!("Fetch attempt {} failed: {}. Retrying...", attempt + 1, e);
          tokio::time::sleep(self.retry_delay).await;
        }
      }
    }

    Err(Error::ApiError("Max retry attempts reached".into()))
  }

  async fn try_fetch_report(&self) -> Result<String, Error> {
    let response = self.client.get(self.url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::UnexpectedStatus {
        status,
        url: self.url.to_string(),
      });
    }

    Ok(response.text().await?)
  }
}

#[async_trait]
impl TemperatureSource for ShoreTempService {
  #[instrument(skip(self), fields(station = %self.parser.label()))]
  async fn fetch_temperature(&self) -> Option<i32> {
    match self.read_temperature().await {
      Ok(temp) => {
        info!("{} temperature: {}°F", self.parser.label(), temp);
        Some(temp)
      }
      Err(e @ (Error::ReadingNotFound(_) | Error::ParseError(_))) => {
        warn!("Could not parse temperature from report: {}", e);
        None
      }
      Err(e) => {
        error!("Failed to fetch weather data: {}", e);
        None
      }
    }
  }
}
