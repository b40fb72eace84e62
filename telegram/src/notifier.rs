// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{client::TelegramClient, types::ChatId};
use async_trait::async_trait;
use config::TelegramSettings;
use error::Error;
use tracing::{error, info, instrument, warn};

#[async_trait]
pub trait MessageSender: Send + Sync {
  async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<(), Error>;
}

#[async_trait]
impl MessageSender for TelegramClient {
  async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<(), Error> {
    self
      .message()
      .chat_id(chat_id.clone())
      .text(text)
      .disable_preview()
      .send(self)
      .await
  }
}

#[derive(Debug, Default)]
pub struct DeliveryReport {
  pub delivered: usize,
  pub failed: Vec<(ChatId, String)>,
}

impl DeliveryReport {
  pub fn attempted(&self) -> usize {
    self.delivered + self.failed.len()
  }

  pub fn is_success(&self) -> bool {
    self.delivered > 0
  }
}

/// Fans one text message out to every configured chat.
pub struct Notifier {
  sender: Option<Box<dyn MessageSender>>,
  destinations: Vec<ChatId>,
}

impl Notifier {
  pub fn new(sender: Option<Box<dyn MessageSender>>, destinations: Vec<ChatId>) -> Self {
    Self {
      sender,
      destinations,
    }
  }

  /// Builds a notifier from settings. Without a token no client is created and every send is a no-op.
  pub fn from_settings(settings: &TelegramSettings) -> Result<Self, Error> {
    let sender = match settings.bot_token.as_deref() {
      Some(token) => Some(Box::new(
        TelegramClient::builder()
          .token(token)
          .retry_attempts(0)
          .build()?,
      ) as Box<dyn MessageSender>),
      None => None,
    };

    let destinations = settings
      .chat_ids
      .iter()
      .map(|id| ChatId::from(id.as_str()))
      .collect();

    Ok(Self::new(sender, destinations))
  }

  pub fn is_configured(&self) -> bool {
    self.sender.is_some() && !self.destinations.is_empty()
  }

  pub fn destinations(&self) -> &[ChatId] {
    &self.destinations
  }

  /// Returns `true` when at least one chat received the message.
  pub async fn send(&self, text: &str) -> bool {
    self.deliver(text).await.is_success()
  }

  #[instrument(skip(self, text), fields(destinations = self.destinations.len()))]
  pub async fn deliver(&self, text: &str) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    let Some(sender) = self.sender.as_deref() else {
      warn!("Telegram not configured (TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID)");
      return report;
    };

    if self.destinations.is_empty() {
      warn!("No valid chat IDs found in TELEGRAM_CHAT_ID");
      return report;
    }

    for chat_id in &self.destinations {
      match sender.send_text(chat_id, text).await {
        Ok(()) => {
          info!("Telegram message sent to chat {}", chat_id);
          report.delivered += 1;
        }
        Err(e) => {
          error!("Failed to send Telegram to chat {}: {}", chat_id, e);
          report.failed.push((chat_id.clone(), e.to_string()));
        }
      }
    }

    report
  }
}
