// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  client::TelegramClient,
  config::{TelegramConfig, MAX_MESSAGE_LENGTH},
  types::{ChatId, Message},
};
use error::Error;

#[derive(Default)]
pub struct MessageBuilder<'a> {
  pub(crate) chat_id: Option<ChatId>,
  pub(crate) text: Option<&'a str>,
  pub(crate) disable_preview: Option<bool>,
}

impl<'a> MessageBuilder<'a> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn chat_id(mut self, id: impl Into<ChatId>) -> Self {
    self.chat_id = Some(id.into());
    self
  }

  pub fn text(mut self, text: &'a str) -> Self {
    self.text = Some(text);
    self
  }

  pub fn disable_preview(mut self) -> Self {
    self.disable_preview = Some(true);
    self
  }

  pub async fn send(self, client: &TelegramClient) -> Result<(), Error> {
    let chat_id = self
      .chat_id
      .ok_or_else(|| Error::ApiError("Chat ID is required".into()))?;

    let text = self
      .text
      .ok_or_else(|| Error::ApiError("Message text is required".into()))?;

    let len = text.chars().count();
    if len > MAX_MESSAGE_LENGTH {
      return Err(Error::MessageTooLong {
        len,
        max: MAX_MESSAGE_LENGTH,
      });
    }

    let message = Message {
      chat_id: &chat_id,
      text,
      disable_web_page_preview: self.disable_preview,
    };

    client.send_message(message).await
  }
}

#[derive(Default)]
pub struct TelegramClientBuilder {
  pub(crate) config: TelegramConfig,
}

impl TelegramClientBuilder {
  pub fn token(mut self, token: impl Into<String>) -> Self {
    self.config.token = token.into();
    self
  }

  pub fn api_base(mut self, base: impl Into<String>) -> Self {
    self.config.api_base = base.into();
    self
  }

  pub fn retry_attempts(mut self, attempts: u32) -> Self {
    self.config.retry_attempts = attempts;
    self
  }

  pub fn retry_delay(mut self, delay: std::time::Duration) -> Self {
    self.config.retry_delay = delay;
    self
  }

  pub fn build(self) -> Result<TelegramClient, Error> {
    if self.config.token.trim().is_empty() {
      return Err(Error::ConfigError("Bot token cannot be empty".into()));
    }

    let client = reqwest::Client::builder()
      .timeout(self.config.timeout)
      .build()
      .map_err(Error::HttpError)?;

    Ok(TelegramClient {
      config: self.config,
      client,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_token_is_rejected() {
    let result = TelegramClient::builder().token("  ").build();
    assert!(matches!(result, Err(Error::ConfigError(_))));
  }

  #[tokio::test]
  async fn message_requires_chat_and_text() {
    let client = TelegramClient::builder().token("1:x").build().unwrap();

    let missing_chat = client.message().text("hello").send(&client).await;
    assert!(matches!(missing_chat, Err(Error::ApiError(_))));

    let missing_text = client.message().chat_id(1_i64).send(&client).await;
    assert!(matches!(missing_text, Err(Error::ApiError(_))));
  }

  #[tokio::test]
  async fn overlong_message_is_rejected_before_sending() {
    let client = TelegramClient::builder()
      .token("1:x")
      .api_base("http://127.0.0.1:1")
      .build()
      .unwrap();
    let text = "°".repeat(MAX_MESSAGE_LENGTH + 1);

    let result = client.message().chat_id(1_i64).text(&text).send(&client).await;
    assert!(matches!(
      result,
      Err(Error::MessageTooLong { len, .. }) if len == MAX_MESSAGE_LENGTH + 1
    ));
  }
}
