// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// Numeric chat id or a public `@channel` username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
  Id(i64),
  Username(String),
}

impl From<i64> for ChatId {
  fn from(id: i64) -> Self {
    ChatId::Id(id)
  }
}

impl From<&str> for ChatId {
  fn from(value: &str) -> Self {
    let value = value.trim();
    value
      .parse::<i64>()
      .map(ChatId::Id)
      .unwrap_or_else(|_| ChatId::Username(value.to_string()))
  }
}

impl FromStr for ChatId {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(ChatId::from(s))
  }
}

impl fmt::Display for ChatId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChatId::Id(id) => write!(f, "{}", id),
      ChatId::Username(name) => write!(f, "{}", name),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
  pub command: String,
  pub description: String,
}

impl BotCommand {
  pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      command: command.into(),
      description: description.into(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
  pub update_id: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
  pub message_id: i64,
  pub chat: Chat,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
  pub id: i64,
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_name: Option<String>,
}

impl Chat {
  pub fn display_name(&self) -> &str {
    self
      .title
      .as_deref()
      .or(self.username.as_deref())
      .or(self.first_name.as_deref())
      .unwrap_or("chat")
  }
}

#[derive(Deserialize)]
pub(crate) struct TelegramResponse<T> {
  pub ok: bool,
  #[serde(default)]
  pub description: String,
  pub result: Option<T>,
}

#[derive(Serialize)]
pub(crate) struct Message<'a> {
  pub chat_id: &'a ChatId,
  pub text: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub disable_web_page_preview: Option<bool>,
}

#[derive(Serialize)]
pub(crate) struct GetUpdates<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub offset: Option<i64>,
  pub timeout: u32,
  pub allowed_updates: &'a [&'a str],
}

#[derive(Serialize)]
pub(crate) struct SetWebhook<'a> {
  pub url: &'a str,
  pub allowed_updates: &'a [&'a str],
}

#[derive(Serialize)]
pub(crate) struct DeleteWebhook {
  pub drop_pending_updates: bool,
}

#[derive(Serialize)]
pub(crate) struct SetMyCommands<'a> {
  pub commands: &'a [BotCommand],
}
