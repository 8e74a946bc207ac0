use std::{sync::Arc, time::Duration};

use serde_json::json;
use tokio::sync::RwLock;

use aaron_domain::{
	AgentMode, AgentStatus, AgentStatusUpdate, Message, NewMessage, Role, ServerEvent,
};
use aaron_storage::MemStorage;

use crate::{AaronService, EventHub, Result};

const THINKING_TASK: &str = "Processing message";
const EXECUTING_TASK: &str = "Working on your request";

impl AaronService {
	pub async fn agent_status(&self) -> AgentStatus {
		self.storage.read().await.agent_status().clone()
	}

	/// Stores a user message and starts the scripted reply chain.
	///
	/// Returns as soon as the message is stored; the reply and the status changes arrive later
	/// as push events.
	pub async fn post_message(&self, req: NewMessage) -> Result<Message> {
		crate::require_non_empty("content", &req.content)?;

		let reply = ReplyChain {
			storage: self.storage.clone(),
			events: self.events.clone(),
			conversation_id: req.conversation_id.clone(),
			input: req.content.clone(),
			reply_delay: Duration::from_millis(self.cfg.agent.reply_delay_ms),
			idle_delay: Duration::from_millis(self.cfg.agent.idle_delay_ms),
		};
		let message = {
			let mut storage = self.storage.write().await;

			set_status(&mut storage, &self.events, AgentMode::Thinking, Some(THINKING_TASK));

			let message = storage.create_message(req, crate::now());

			self.events.publish(ServerEvent::Message { message: message.clone() });

			message
		};

		tracing::info!(message_id = %message.id, "Stored user message; reply scheduled.");

		tokio::spawn(reply.run());

		Ok(message)
	}
}

/// Timer-driven stand-in for a real agent: reply after one delay, go idle after another.
struct ReplyChain {
	storage: Arc<RwLock<MemStorage>>,
	events: EventHub,
	conversation_id: Option<String>,
	input: String,
	reply_delay: Duration,
	idle_delay: Duration,
}
impl ReplyChain {
	async fn run(self) {
		tokio::time::sleep(self.reply_delay).await;

		{
			let mut storage = self.storage.write().await;
			let reply = storage.create_message(
				NewMessage {
					conversation_id: self.conversation_id.clone(),
					role: Role::Assistant,
					content: reply_text(&self.input),
					metadata: Some(json!({ "thinking": true })),
				},
				crate::now(),
			);

			self.events.publish(ServerEvent::Message { message: reply });

			set_status(&mut storage, &self.events, AgentMode::Executing, Some(EXECUTING_TASK));
		}

		tokio::time::sleep(self.idle_delay).await;

		let mut storage = self.storage.write().await;

		set_status(&mut storage, &self.events, AgentMode::Idle, None);
	}
}

fn set_status(
	storage: &mut MemStorage,
	events: &EventHub,
	mode: AgentMode,
	current_task: Option<&str>,
) {
	let update = AgentStatusUpdate::new(mode, current_task);
	let status = storage.update_agent_status(update, crate::now());

	events.publish(ServerEvent::StatusUpdate {
		status: status.status,
		current_task: status.current_task,
		metadata: None,
	});
}

pub fn reply_text(input: &str) -> String {
	format!(
		"I understand you want me to help with: \"{input}\". Let me break this down into actionable steps and get started."
	)
}
