use std::sync::Arc;

use tokio::sync::watch;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteState {
	pub quoted_text: String,
	pub quoted_message_id: String,
	pub is_quoting: bool,
}

/// Text the user picked from an earlier message to reply to.
#[derive(Clone, Debug)]
pub struct QuoteStore {
	state: Arc<watch::Sender<QuoteState>>,
}
impl QuoteStore {
	pub fn new() -> Self {
		let (state, _) = watch::channel(QuoteState::default());

		Self { state: Arc::new(state) }
	}

	pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
		self.state.subscribe()
	}

	pub fn snapshot(&self) -> QuoteState {
		self.state.borrow().clone()
	}

	pub fn set_quote(&self, text: &str, message_id: &str) {
		self.state.send_replace(QuoteState {
			quoted_text: text.to_string(),
			quoted_message_id: message_id.to_string(),
			is_quoting: true,
		});
	}

	pub fn clear_quote(&self) {
		self.state.send_replace(QuoteState::default());
	}
}
impl Default for QuoteStore {
	fn default() -> Self {
		Self::new()
	}
}
