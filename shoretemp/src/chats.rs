// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use std::{collections::HashSet, io::Write};
use telegram::{TelegramClient, Update};

pub const NO_CHATS_HELP: &str = "\nNo messages found. Do this:\n  \
1. Open Telegram and find your bot (the one you created with @BotFather).\n  \
2. Tap Start or send any message (e.g. 'hi').\n  \
3. Run this command again: check-shore-temp --get-chat-id\n";

pub const CHATS_FOOTER: &str = "\nPut one of these in your .env as TELEGRAM_CHAT_ID=\n\
For multiple users, use comma-separated: TELEGRAM_CHAT_ID=123456,789012";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
  pub id: i64,
  pub name: String,
}

/// Distinct chats in first-seen order.
pub fn distinct_chats(updates: &[Update]) -> Vec<ChatSummary> {
  let mut seen = HashSet::new();
  updates
    .iter()
    .filter_map(|update| update.message.as_ref())
    .filter(|message| seen.insert(message.chat.id))
    .map(|message| ChatSummary {
      id: message.chat.id,
      name: message.chat.display_name().to_string(),
    })
    .collect()
}

/// Prints every chat that has messaged the bot, or setup steps when there is none.
/// Returns whether any chat was listed.
pub async fn list_chats<W: Write>(client: &TelegramClient, out: &mut W) -> Result<bool, Error> {
  let updates = client.get_updates(None, 0).await?;
  let found = distinct_chats(&updates);

  if found.is_empty() {
    writeln!(out, "{}", NO_CHATS_HELP)?;
    return Ok(false);
  }

  for chat in &found {
    writeln!(out, "  Chat ID: {}  ({})", chat.id, chat.name)?;
  }
  writeln!(out, "{}", CHATS_FOOTER)?;
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use telegram::{Chat, IncomingMessage};

  fn update(update_id: i64, chat_id: i64, title: Option<&str>, first_name: &str) -> Update {
    Update {
      update_id,
      message: Some(IncomingMessage {
        message_id: update_id,
        chat: Chat {
          id: chat_id,
          kind: "private".into(),
          title: title.map(String::from),
          username: None,
          first_name: Some(first_name.into()),
        },
        text: Some("hi".into()),
      }),
    }
  }

  #[test]
  fn lists_each_chat_once() {
    let updates = vec![
      update(1, 100, None, "Sam"),
      update(2, -200, Some("Lake Crew"), "Alex"),
      update(3, 100, None, "Sam"),
      Update {
        update_id: 4,
        message: None,
      },
    ];

    assert_eq!(
      distinct_chats(&updates),
      vec![
        ChatSummary {
          id: 100,
          name: "Sam".into()
        },
        ChatSummary {
          id: -200,
          name: "Lake Crew".into()
        },
      ]
    );
  }

  #[test]
  fn no_updates_no_chats() {
    assert!(distinct_chats(&[]).is_empty());
  }
}
