// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{bot::ShoreBot, webhook};
use config::WebhookSettings;
use error::Error;
use std::{
  future,
  net::SocketAddr,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  time::Duration,
};
use telegram::{TelegramClient, Update};
use tokio::{
  signal::unix::{self, SignalKind},
  task::JoinSet,
};
use tracing::{error, info, warn};
use url::Url;

pub const POLL_TIMEOUT_SECS: u32 = 30;
pub const POLL_RETRY_DELAY: Duration = Duration::from_secs(2);

/// How updates reach the bot. Picked once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
  Polling,
  Webhook {
    listen: SocketAddr,
    path: String,
    public_url: Url,
  },
}

impl Transport {
  /// Webhook when a public base URL is configured, polling otherwise.
  pub fn from_settings(settings: &WebhookSettings) -> Result<Self, Error> {
    let Some(base) = settings.external_url.as_deref() else {
      return Ok(Transport::Polling);
    };

    let path = if settings.path.starts_with('/') {
      settings.path.clone()
    } else {
      format!("/{}", settings.path)
    };

    let public_url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))
      .map_err(|e| Error::ConfigError(format!("Invalid external URL '{}': {}", base, e)))?;

    Ok(Transport::Webhook {
      listen: SocketAddr::from(([0, 0, 0, 0], settings.port)),
      path,
      public_url,
    })
  }

  pub async fn run(self, client: TelegramClient, bot: Arc<ShoreBot>) -> Result<(), Error> {
    match self {
      Transport::Polling => poll(client, bot).await,
      Transport::Webhook {
        listen,
        path,
        public_url,
      } => webhook::serve(&client, bot, listen, &path, &public_url).await,
    }
  }
}

async fn poll(client: TelegramClient, bot: Arc<ShoreBot>) -> Result<(), Error> {
  client.delete_webhook().await?;
  info!("Starting in POLLING mode... (press Ctrl+C to stop)");

  let shutdown = shutdown_signal();
  tokio::pin!(shutdown);
  let in_flight = InFlight::default();
  let mut offset = None;

  loop {
    tokio::select! {
      _ = &mut shutdown => {
        in_flight.drain().await;
        info!("Polling stopped");
        return Ok(());
      }
      result = client.get_updates(offset, POLL_TIMEOUT_SECS) => {
        match result {
          Ok(updates) => {
            offset = next_offset(&updates).or(offset);
            for update in updates {
              in_flight.spawn(bot.clone(), update);
            }
          }
          Err(e) => {
            warn!("Failed to poll updates: {}", e);
            tokio::time::sleep(POLL_RETRY_DELAY).await;
          }
        }
      }
    }
  }
}

/// Update handlers that are still running. `drain` waits for all of them.
#[derive(Clone, Default)]
pub struct InFlight {
  tasks: Arc<Mutex<JoinSet<()>>>,
}

impl InFlight {
  pub fn spawn(&self, bot: Arc<ShoreBot>, update: Update) {
    let mut tasks = self.lock();
    while tasks.try_join_next().is_some() {}
    tasks.spawn(async move { bot.handle_update(&update).await });
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub async fn drain(&self) {
    let mut tasks = std::mem::take(&mut *self.lock());
    if !tasks.is_empty() {
      info!("Waiting for {} update(s) to finish", tasks.len());
    }

    while let Some(result) = tasks.join_next().await {
      if let Err(e) = result {
        warn!("Update handler failed: {}", e);
      }
    }
  }

  fn lock(&self) -> MutexGuard<'_, JoinSet<()>> {
    self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// Offset that acknowledges every update in the batch.
pub fn next_offset(updates: &[Update]) -> Option<i64> {
  updates.iter().map(|u| u.update_id + 1).max()
}

/// Resolves on the first SIGTERM or SIGINT.
pub async fn shutdown_signal() {
  tokio::select! {
    _ = wait_for(SignalKind::terminate(), "SIGTERM") => {}
    _ = wait_for(SignalKind::interrupt(), "SIGINT") => {}
  }
}

/// A handler that cannot be installed never fires.
async fn wait_for(kind: SignalKind, name: &str) {
  match unix::signal(kind) {
    Ok(mut signal) => {
      signal.recv().await;
      info!("Received {}", name);
    }
    Err(e) => {
      error!("Failed to install {} handler: {}", name, e);
      future::pending::<()>().await;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::messages;
  use async_trait::async_trait;
  use shore::TemperatureSource;
  use telegram::{Chat, ChatId, IncomingMessage, MessageSender};

  fn settings(external_url: Option<&str>) -> WebhookSettings {
    WebhookSettings {
      external_url: external_url.map(String::from),
      ..WebhookSettings::default()
    }
  }

  #[test]
  fn polling_without_public_url() {
    assert_eq!(
      Transport::from_settings(&settings(None)).unwrap(),
      Transport::Polling
    );
  }

  #[test]
  fn webhook_with_public_url() {
    let transport = Transport::from_settings(&WebhookSettings {
      port: 10000,
      ..settings(Some("https://shore-bot.onrender.com/"))
    })
    .unwrap();

    match transport {
      Transport::Webhook {
        listen,
        path,
        public_url,
      } => {
        assert_eq!(listen, SocketAddr::from(([0, 0, 0, 0], 10000)));
        assert_eq!(path, "/webhook");
        assert_eq!(
          public_url.as_str(),
          "https://shore-bot.onrender.com/webhook"
        );
      }
      other => panic!("expected webhook, got {other:?}"),
    }
  }

  #[test]
  fn invalid_public_url_is_rejected() {
    assert!(matches!(
      Transport::from_settings(&settings(Some("not a url"))),
      Err(Error::ConfigError(_))
    ));
  }

  struct SlowSource(Duration);

  #[async_trait]
  impl TemperatureSource for SlowSource {
    async fn fetch_temperature(&self) -> Option<i32> {
      tokio::time::sleep(self.0).await;
      Some(61)
    }
  }

  #[derive(Clone, Default)]
  struct Outbox(Arc<Mutex<Vec<String>>>);

  #[async_trait]
  impl MessageSender for Outbox {
    async fn send_text(&self, _chat_id: &ChatId, text: &str) -> Result<(), Error> {
      self.0.lock().unwrap().push(text.to_string());
      Ok(())
    }
  }

  fn temp_update(update_id: i64) -> Update {
    Update {
      update_id,
      message: Some(IncomingMessage {
        message_id: update_id,
        chat: Chat {
          id: 42,
          kind: "private".into(),
          title: None,
          username: None,
          first_name: None,
        },
        text: Some("/temp".into()),
      }),
    }
  }

  #[tokio::test]
  async fn drain_waits_for_pending_replies() {
    let outbox = Outbox::default();
    let bot = Arc::new(ShoreBot::new(
      Box::new(SlowSource(Duration::from_millis(100))),
      Box::new(outbox.clone()),
    ));
    let in_flight = InFlight::default();

    in_flight.spawn(bot.clone(), temp_update(1));
    in_flight.spawn(bot, temp_update(2));
    assert_eq!(in_flight.len(), 2);

    in_flight.drain().await;

    assert!(in_flight.is_empty());
    let sent = outbox.0.lock().unwrap();
    assert_eq!(sent.len(), 4);
    assert_eq!(
      sent.iter().filter(|t| t.as_str() == messages::FETCHING).count(),
      2
    );
    assert!(sent.iter().any(|t| t.starts_with("Chicago Shore water temp: 61°F")));
  }

  #[tokio::test]
  async fn finished_handlers_are_reaped_on_spawn() {
    let bot = Arc::new(ShoreBot::new(
      Box::new(SlowSource(Duration::ZERO)),
      Box::new(Outbox::default()),
    ));
    let in_flight = InFlight::default();

    in_flight.spawn(bot.clone(), temp_update(1));
    tokio::time::sleep(Duration::from_millis(50)).await;
    in_flight.spawn(bot, temp_update(2));

    assert_eq!(in_flight.len(), 1);
    in_flight.drain().await;
  }

  #[test]
  fn offset_follows_highest_update() {
    let updates: Vec<Update> = [7, 9, 8]
      .into_iter()
      .map(|update_id| Update {
        update_id,
        message: None,
      })
      .collect();

    assert_eq!(next_offset(&updates), Some(10));
    assert_eq!(next_offset(&[]), None);
  }
}
