// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  commands::{self, Command},
  messages,
};
use error::Error;
use shore::TemperatureSource;
use telegram::{ChatId, MessageSender, Update};
use tracing::{debug, instrument, warn};

/// Answers bot commands. Holds no per-chat state, so one instance serves every update.
pub struct ShoreBot {
  source: Box<dyn TemperatureSource>,
  replier: Box<dyn MessageSender>,
}

impl ShoreBot {
  pub fn new(source: Box<dyn TemperatureSource>, replier: Box<dyn MessageSender>) -> Self {
    Self { source, replier }
  }

  pub async fn answer(&self, command: Option<Command>) -> String {
    match command {
      Some(Command::Start) => messages::WELCOME.to_string(),
      Some(Command::Help) => messages::HELP.to_string(),
      Some(Command::Temp) => messages::temperature_reply(self.source.fetch_temperature().await),
      None => messages::FALLBACK.to_string(),
    }
  }

  #[instrument(skip(self, text))]
  pub async fn respond(&self, chat_id: &ChatId, text: &str) -> Result<(), Error> {
    let command = commands::parse(text);
    debug!("Dispatching {:?}", command);

    if command == Some(Command::Temp) {
      if let Err(e) = self.replier.send_text(chat_id, messages::FETCHING).await {
        warn!("Failed to acknowledge /temp: {}", e);
      }
    }

    let reply = self.answer(command).await;
    self.replier.send_text(chat_id, &reply).await
  }

  /// Non-text updates are ignored.
  #[instrument(skip(self, update), fields(update_id = update.update_id))]
  pub async fn handle_update(&self, update: &Update) {
    let Some(message) = update.message.as_ref() else {
      return;
    };
    let Some(text) = message.text.as_deref() else {
      return;
    };

    let chat_id = ChatId::Id(message.chat.id);
    if let Err(e) = self.respond(&chat_id, text).await {
      warn!("Failed to reply to chat {}: {}", chat_id, e);
    }
  }
}
