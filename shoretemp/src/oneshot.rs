// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::messages;
use shore::TemperatureSource;
use telegram::Notifier;
use tracing::{error, info, instrument};

/// One fetch, one message. Returns whether any chat received it.
#[instrument(skip_all)]
pub async fn run_once(source: &dyn TemperatureSource, notifier: &Notifier) -> bool {
  let Some(temp) = source.fetch_temperature().await else {
    error!("Could not parse Chicago shore temperature");
    if notifier.is_configured() {
      return notifier.send(messages::FETCH_FAILED).await;
    }
    return false;
  };

  info!("Chicago Shore temperature: {}°F", temp);
  notifier.send(&messages::daily_report(temp)).await
}
