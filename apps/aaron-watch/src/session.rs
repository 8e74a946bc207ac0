use std::future::Future;

use tokio::task::JoinHandle;

use aaron_client::{
	ActivityStore, ApiClient, ConversationState, ConversationStore, DemoSequencer, MirrorStore,
	Pollers, RealtimeClient, ServerSnapshot, Trigger,
};
use aaron_domain::{Message, NewMessage, Role};

/// Everything one terminal client holds: the stores, the push channel and the pollers.
pub struct Session {
	pub api: ApiClient,
	pub realtime: RealtimeClient,
	pub conversation: ConversationStore,
	pub activity: ActivityStore,
	pub mirror: MirrorStore,
	pub sequencer: DemoSequencer,
	_pollers: Pollers,
	sync: JoinHandle<()>,
}
impl Session {
	/// Wires the stores to the server and starts connecting. Returns before the socket is open.
	pub fn start(cfg: &aaron_config::Client) -> aaron_client::Result<Self> {
		let api = ApiClient::new(&cfg.server_url)?;
		let realtime = RealtimeClient::from_config(cfg);
		let conversation = ConversationStore::new();
		let mirror = MirrorStore::new();
		let sync =
			aaron_client::spawn_sync(realtime.subscribe(), conversation.clone(), mirror.clone());
		let pollers = Pollers::spawn(api.clone(), mirror.clone(), cfg);

		realtime.connect();

		Ok(Self {
			api,
			realtime,
			sequencer: DemoSequencer::new(conversation.clone()),
			conversation,
			activity: ActivityStore::new(cfg.terminal_tail),
			mirror,
			_pollers: pollers,
			sync,
		})
	}

	pub async fn wait_connected(&self) {
		let mut connected = self.realtime.connected();
		let _ = connected.wait_for(|connected| *connected).await;
	}

	/// Posts `text` as a user message in the current conversation.
	pub async fn say(&self, text: &str) -> aaron_client::Result<Message> {
		let message = NewMessage {
			conversation_id: Some(self.conversation.snapshot().current_conversation_id),
			role: Role::User,
			content: text.to_string(),
			metadata: None,
		};

		self.api.post_message(&message).await
	}

	pub fn start_demo(&self) {
		if self.sequencer.trigger() == Trigger::Rejected {
			tracing::info!("Demo already running.");
		}

		self.activity.start_demo();
	}

	/// Logs store changes until `shutdown` resolves.
	pub async fn watch<F>(&self, shutdown: F)
	where
		F: Future<Output = ()>,
	{
		let mut conversation = self.conversation.subscribe();
		let mut mirror = self.mirror.subscribe();
		let mut activity = self.activity.subscribe();
		let mut phase = self.sequencer.subscribe();
		let mut connected = self.realtime.connected();
		let mut shown = log_messages(&conversation.borrow_and_update(), 0);
		let mut last_status = None;
		let mut shown_lines = self.activity.snapshot().terminal_lines.len();

		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				_ = &mut shutdown => break,
				Ok(()) = conversation.changed() => {
					shown = log_messages(&conversation.borrow_and_update(), shown);
				},
				Ok(()) = mirror.changed() => {
					last_status = log_status(&mirror.borrow_and_update(), last_status);
				},
				Ok(()) = activity.changed() => {
					let state = activity.borrow_and_update();

					for line in state.terminal_lines.iter().skip(shown_lines) {
						tracing::info!(target: "terminal", "{line}");
					}

					shown_lines = state.terminal_lines.len();
				},
				Ok(()) = phase.changed() => {
					tracing::info!(phase = ?*phase.borrow_and_update(), "Demo phase changed.");
				},
				Ok(()) = connected.changed() => {
					tracing::info!(connected = *connected.borrow_and_update(), "Push channel state.");
				},
			}
		}

		self.realtime.disconnect().await;
	}
}
impl Drop for Session {
	fn drop(&mut self) {
		self.sync.abort();
	}
}

fn log_messages(state: &ConversationState, shown: usize) -> usize {
	// A conversation switch or reset can shrink the list.
	let start = if state.messages.len() < shown { 0 } else { shown };

	for message in &state.messages[start..] {
		tracing::info!(role = ?message.role, "{}", message.content);
	}

	state.messages.len()
}

fn log_status(
	snapshot: &ServerSnapshot,
	last: Option<aaron_domain::AgentMode>,
) -> Option<aaron_domain::AgentMode> {
	let Some(status) = snapshot.agent_status.as_ref() else {
		return last;
	};

	if last != Some(status.status) {
		tracing::info!(
			status = ?status.status,
			current_task = status.current_task.as_deref().unwrap_or("-"),
			queued = snapshot.task_queue.len(),
			"Agent status changed."
		);
	}

	Some(status.status)
}
