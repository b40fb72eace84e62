// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  builders::{MessageBuilder, TelegramClientBuilder},
  config::{TelegramConfig, POLL_GRACE_SECS},
  types::{
    BotCommand, DeleteWebhook, GetUpdates, Message, SetMyCommands, SetWebhook, TelegramResponse,
    Update,
  },
};
use error::Error;
use reqwest::Client;
use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

const ALLOWED_UPDATES: &[&str] = &["message"];

#[derive(Clone)]
pub struct TelegramClient {
  pub(crate) config: TelegramConfig,
  pub(crate) client: Client,
}

impl TelegramClient {
  pub fn builder() -> TelegramClientBuilder {
    TelegramClientBuilder::default()
  }

  pub fn message<'a>(&self) -> MessageBuilder<'a> {
    MessageBuilder::new()
  }

  #[instrument(skip(self, message), fields(chat_id = %message.chat_id))]
  pub(crate) async fn send_message(&self, message: Message<'_>) -> Result<(), Error> {
    for attempt in 0..=self.config.retry_attempts {
      match self
        .call::<_, IgnoredAny>("sendMessage", &message, None)
        .await
      {
        Ok(_) => {
          debug!("Message sent successfully");
          return Ok(());
        }
        Err(e) => {
          if attempt == self.config.retry_attempts {
            if attempt > 0 {
              error!("All retry attempts failed");
            }
            return Err(e);
          }
          warn!("Attempt {} failed: {}. Retrying...", attempt + 1, e);
          tokio::time::sleep(self.config.retry_delay).await;
        }
      }
    }

    Err(Error::ApiError("Max retry attempts reached".into()))
  }

  /// Long polls for new updates. `timeout_secs` is the server-side wait; zero returns immediately.
  #[instrument(skip(self))]
  pub async fn get_updates(
    &self,
    offset: Option<i64>,
    timeout_secs: u32,
  ) -> Result<Vec<Update>, Error> {
    let payload = GetUpdates {
      offset,
      timeout: timeout_secs,
      allowed_updates: ALLOWED_UPDATES,
    };
    let request_timeout = Duration::from_secs(u64::from(timeout_secs) + POLL_GRACE_SECS);

    self
      .call("getUpdates", &payload, Some(request_timeout))
      .await
  }

  #[instrument(skip(self))]
  pub async fn set_webhook(&self, url: &str) -> Result<(), Error> {
    let payload = SetWebhook {
      url,
      allowed_updates: ALLOWED_UPDATES,
    };
    self
      .call::<_, IgnoredAny>("setWebhook", &payload, None)
      .await
      .map(|_| ())
  }

  #[instrument(skip(self))]
  pub async fn delete_webhook(&self) -> Result<(), Error> {
    let payload = DeleteWebhook {
      drop_pending_updates: false,
    };
    self
      .call::<_, IgnoredAny>("deleteWebhook", &payload, None)
      .await
      .map(|_| ())
  }

  #[instrument(skip(self, commands), fields(count = commands.len()))]
  pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), Error> {
    self
      .call::<_, IgnoredAny>("setMyCommands", &SetMyCommands { commands }, None)
      .await
      .map(|_| ())
  }

  fn method_url(&self, method: &str) -> String {
    format!(
      "{}/bot{}/{}",
      self.config.api_base.trim_end_matches('/'),
      self.config.token,
      method
    )
  }

  async fn call<P, R>(
    &self,
    method: &str,
    payload: &P,
    timeout: Option<Duration>,
  ) -> Result<R, Error>
  where
    P: Serialize + ?Sized,
    R: DeserializeOwned,
  {
    let mut request = self.client.post(self.method_url(method)).json(payload);
    if let Some(timeout) = timeout {
      request = request.timeout(timeout);
    }

    // reqwest errors carry the request URL, which holds the bot token.
    let response = request
      .send()
      .await
      .map_err(|e| Error::HttpError(e.without_url()))?;

    let status = response.status();

    if status.as_u16() == 429 {
      return Err(Error::RateLimitExceeded);
    }

    let body = response
      .text()
      .await
      .map_err(|e| Error::HttpError(e.without_url()))?;

    let telegram_response: TelegramResponse<R> = match serde_json::from_str(&body) {
      Ok(parsed) => parsed,
      Err(_) if !status.is_success() => {
        return Err(Error::UnexpectedStatus {
          status,
          url: method.to_string(),
        })
      }
      Err(e) => {
        return Err(Error::ParseError(format!(
          "Invalid {} response: {}",
          method, e
        )))
      }
    };

    if !telegram_response.ok {
      return Err(Error::ApiError(format!(
        "{}: {}",
        status, telegram_response.description
      )));
    }

    telegram_response
      .result
      .ok_or_else(|| Error::ParseError(format!("{} returned no result", method)))
  }
}
