use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio_tungstenite::tungstenite::Message as WsMessage;

use aaron_domain::ServerEvent;

use crate::slot::{RunSlot, Trigger};

const EVENT_CAPACITY: usize = 256;
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// One auto-reconnecting websocket to the server's push channel.
#[derive(Debug)]
pub struct RealtimeClient {
	shared: Arc<Shared>,
	connection: RunSlot,
}

#[derive(Debug)]
enum Outbound {
	Text(String),
	/// Acknowledged once the Close frame has been written.
	Close(oneshot::Sender<()>),
}

#[derive(Debug)]
struct Shared {
	url: String,
	backoff: Duration,
	connected: watch::Sender<bool>,
	last_message: watch::Sender<Option<ServerEvent>>,
	events: broadcast::Sender<ServerEvent>,
	outbound: Mutex<Option<mpsc::UnboundedSender<Outbound>>>,
}
impl Shared {
	fn set_outbound(&self, outbound: Option<mpsc::UnboundedSender<Outbound>>) {
		*self.outbound.lock().unwrap_or_else(|err| err.into_inner()) = outbound;
	}

	fn take_outbound(&self) -> Option<mpsc::UnboundedSender<Outbound>> {
		self.outbound.lock().unwrap_or_else(|err| err.into_inner()).take()
	}

	fn set_connected(&self, connected: bool) {
		self.connected.send_if_modified(|current| {
			let changed = *current != connected;

			*current = connected;

			changed
		});
	}

	fn receive(&self, text: &str) {
		match serde_json::from_str::<ServerEvent>(text) {
			Ok(event) => {
				tracing::debug!(kind = event.kind(), "Received push event.");

				let _ = self.events.send(event.clone());

				self.last_message.send_replace(Some(event));
			},
			Err(err) => tracing::warn!(error = %err, "Dropped unparseable push frame."),
		}
	}
}

impl RealtimeClient {
	/// `url` is the full websocket address, e.g. `ws://host:port/ws`.
	pub fn new(url: impl Into<String>, backoff: Duration) -> Self {
		let (connected, _) = watch::channel(false);
		let (last_message, _) = watch::channel(None);
		let (events, _) = broadcast::channel(EVENT_CAPACITY);
		let shared = Shared {
			url: url.into(),
			backoff,
			connected,
			last_message,
			events,
			outbound: Mutex::new(None),
		};

		Self { shared: Arc::new(shared), connection: RunSlot::default() }
	}

	pub fn from_config(cfg: &aaron_config::Client) -> Self {
		Self::new(cfg.ws_url(), Duration::from_millis(cfg.reconnect_backoff_ms))
	}

	/// Starts the connection loop. A no-op while one is already running.
	pub fn connect(&self) {
		let shared = self.shared.clone();

		if self.connection.try_start(move || connection_loop(shared)) == Trigger::Rejected {
			tracing::debug!(url = %self.shared.url, "Push channel already running.");
		}
	}

	/// Sends a Close frame on the open socket, then stops the connection loop. No reconnect
	/// follows.
	pub async fn disconnect(&self) {
		if let Some(outbound) = self.shared.take_outbound() {
			let (sent_tx, sent_rx) = oneshot::channel();

			if outbound.send(Outbound::Close(sent_tx)).is_ok()
				&& tokio::time::timeout(CLOSE_TIMEOUT, sent_rx).await.is_err()
			{
				tracing::warn!(url = %self.shared.url, "Close frame not sent in time.");
			}
		}
		if self.connection.cancel() {
			tracing::info!(url = %self.shared.url, "Disconnected from push channel.");
		}

		self.shared.set_outbound(None);
		self.shared.set_connected(false);
	}

	pub fn is_connected(&self) -> bool {
		*self.shared.connected.borrow()
	}

	pub fn connected(&self) -> watch::Receiver<bool> {
		self.shared.connected.subscribe()
	}

	/// Most recent event received, replaced on every frame.
	pub fn last_message(&self) -> watch::Receiver<Option<ServerEvent>> {
		self.shared.last_message.subscribe()
	}

	/// Every event received from now on, in arrival order.
	pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
		self.shared.events.subscribe()
	}

	/// Queues `message` as a JSON text frame. Returns `false`, dropping the message, when no
	/// socket is open.
	pub fn send_message<T>(&self, message: &T) -> bool
	where
		T: Serialize,
	{
		let outbound = self.shared.outbound.lock().unwrap_or_else(|err| err.into_inner());
		let Some(outbound) = outbound.as_ref() else {
			return false;
		};
		let text = match serde_json::to_string(message) {
			Ok(text) => text,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to encode outbound frame.");

				return false;
			},
		};

		outbound.send(Outbound::Text(text)).is_ok()
	}
}
impl Drop for RealtimeClient {
	fn drop(&mut self) {
		self.connection.cancel();
	}
}

async fn connection_loop(shared: Arc<Shared>) {
	loop {
		match tokio_tungstenite::connect_async(shared.url.as_str()).await {
			Ok((socket, _)) => {
				tracing::info!(url = %shared.url, "Connected to push channel.");

				let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
				let (mut sink, mut stream) = socket.split();

				shared.set_outbound(Some(outbound_tx));
				shared.set_connected(true);

				loop {
					tokio::select! {
						frame = stream.next() => match frame {
							Some(Ok(WsMessage::Text(text))) => shared.receive(&text),
							Some(Ok(WsMessage::Close(_))) | None => break,
							Some(Ok(_)) => {},
							Some(Err(err)) => {
								tracing::warn!(error = %err, "Push channel read failed.");

								break;
							},
						},
						Some(outbound) = outbound_rx.recv() => match outbound {
							Outbound::Text(text) => {
								if let Err(err) = sink.send(WsMessage::Text(text)).await {
									tracing::warn!(error = %err, "Push channel write failed.");

									break;
								}
							},
							Outbound::Close(sent) => {
								if let Err(err) = sink.send(WsMessage::Close(None)).await {
									tracing::debug!(error = %err, "Push channel close failed.");
								}

								let _ = sent.send(());

								break;
							},
						},
					}
				}

				shared.set_outbound(None);
				shared.set_connected(false);

				tracing::info!(
					backoff_ms = shared.backoff.as_millis() as u64,
					"Push channel closed; reconnecting."
				);
			},
			Err(err) => {
				tracing::warn!(
					url = %shared.url,
					error = %err,
					backoff_ms = shared.backoff.as_millis() as u64,
					"Push channel connect failed; retrying."
				);
			},
		}

		tokio::time::sleep(shared.backoff).await;
	}
}
