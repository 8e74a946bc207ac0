use tokio::sync::broadcast;

use aaron_domain::ServerEvent;

const EVENT_CAPACITY: usize = 256;

/// Fan-out of push events to every connected websocket.
///
/// Slow subscribers lag and lose frames; publishing never blocks.
#[derive(Clone, Debug)]
pub struct EventHub {
	tx: broadcast::Sender<ServerEvent>,
}
impl EventHub {
	pub fn new() -> Self {
		let (tx, _) = broadcast::channel(EVENT_CAPACITY);

		Self { tx }
	}

	pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
		self.tx.subscribe()
	}

	pub fn subscriber_count(&self) -> usize {
		self.tx.receiver_count()
	}

	pub fn publish(&self, event: ServerEvent) {
		let kind = event.kind();

		match self.tx.send(event) {
			Ok(receivers) => tracing::debug!(kind, receivers, "Broadcast event."),
			Err(_) => tracing::debug!(kind, "No websocket clients; event dropped."),
		}
	}
}
impl Default for EventHub {
	fn default() -> Self {
		Self::new()
	}
}
