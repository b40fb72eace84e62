// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  bot::ShoreBot,
  transport::{shutdown_signal, InFlight},
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use error::Error;
use std::{net::SocketAddr, sync::Arc};
use telegram::{TelegramClient, Update};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use url::Url;

#[derive(Clone)]
struct WebhookState {
  bot: Arc<ShoreBot>,
  in_flight: InFlight,
}

pub fn router(bot: Arc<ShoreBot>, in_flight: InFlight, path: &str) -> Router {
  Router::new()
    .route(path, post(receive_update))
    .layer(TraceLayer::new_for_http())
    .with_state(WebhookState { bot, in_flight })
}

/// Acknowledges immediately and answers in the background.
async fn receive_update(State(state): State<WebhookState>, Json(update): Json<Update>) -> StatusCode {
  debug!(update_id = update.update_id, "Received update");
  state.in_flight.spawn(state.bot, update);
  StatusCode::OK
}

pub async fn serve(
  client: &TelegramClient,
  bot: Arc<ShoreBot>,
  listen: SocketAddr,
  path: &str,
  public_url: &Url,
) -> Result<(), Error> {
  let listener = tokio::net::TcpListener::bind(listen).await?;
  client.set_webhook(public_url.as_str()).await?;
  info!("Starting in WEBHOOK mode -> {} (listening on {})", public_url, listen);

  let in_flight = InFlight::default();
  axum::serve(listener, router(bot, in_flight.clone(), path))
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  in_flight.drain().await;

  info!("Webhook server shutdown");
  Ok(())
}
