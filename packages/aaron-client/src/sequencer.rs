use std::{sync::Arc, time::Duration};

use time::OffsetDateTime;
use tokio::sync::watch;

use aaron_domain::{ActivityIndicator, ActivityKind, ActivityPatch, Message, ProgressStep, Role};

use crate::{
	ConversationStore,
	slot::{RunSlot, Trigger},
};

const WORKING_AFTER: Duration = Duration::from_millis(2_000);
const COMPLETING_AFTER: Duration = Duration::from_millis(3_000);
const REPLY_AFTER: Duration = Duration::from_millis(2_000);

const CANNED_REPLY: &str = "I'll create a comprehensive React dashboard with analytics charts, user management, and modern UI components.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DemoPhase {
	#[default]
	Idle,
	Thinking,
	Working,
	Completing,
}

/// Fakes an agent turn on the conversation store: thinking, working, a progress checklist and
/// finally a canned reply.
///
/// Only one run is in flight at a time. Dropping the sequencer cancels the run.
#[derive(Debug)]
pub struct DemoSequencer {
	conversation: ConversationStore,
	phase: Arc<watch::Sender<DemoPhase>>,
	run: RunSlot,
}
impl DemoSequencer {
	pub fn new(conversation: ConversationStore) -> Self {
		let (phase, _) = watch::channel(DemoPhase::Idle);

		Self { conversation, phase: Arc::new(phase), run: RunSlot::default() }
	}

	pub fn phase(&self) -> DemoPhase {
		*self.phase.borrow()
	}

	pub fn subscribe(&self) -> watch::Receiver<DemoPhase> {
		self.phase.subscribe()
	}

	pub fn trigger(&self) -> Trigger {
		let trigger = self.run.try_start(|| {
			let thinking_id = aaron_domain::new_id();

			self.conversation.modify(|state| {
				state.is_typing = true;
				state.is_demo_mode = true;
				state.activities.push(ActivityIndicator::new(
					thinking_id,
					ActivityKind::Thinking,
					"Thought about it...",
					OffsetDateTime::now_utc(),
				));
			});
			self.phase.send_replace(DemoPhase::Thinking);

			run(self.conversation.clone(), self.phase.clone())
		});

		if trigger == Trigger::Rejected {
			tracing::debug!(phase = ?self.phase(), "Demo trigger rejected; a run is in flight.");
		}

		trigger
	}

	/// Stops the pending timers and returns to idle. Activities already shown stay.
	pub fn cancel(&self) {
		if self.run.cancel() {
			self.conversation.modify(|state| {
				state.is_typing = false;
				state.is_demo_mode = false;
			});
		}

		self.phase.send_replace(DemoPhase::Idle);
	}
}
impl Drop for DemoSequencer {
	fn drop(&mut self) {
		self.cancel();
	}
}

async fn run(conversation: ConversationStore, phase: Arc<watch::Sender<DemoPhase>>) {
	tokio::time::sleep(WORKING_AFTER).await;

	let working_id = aaron_domain::new_id();

	conversation.add_activity(ActivityIndicator::new(
		working_id.clone(),
		ActivityKind::Working,
		"Setting up project...",
		OffsetDateTime::now_utc(),
	));
	phase.send_replace(DemoPhase::Working);

	tokio::time::sleep(COMPLETING_AFTER).await;

	conversation.update_activity(
		&working_id,
		ActivityPatch {
			kind: Some(ActivityKind::Completed),
			title: Some("Project setup complete".to_string()),
			..Default::default()
		},
	);

	let mut progress = ActivityIndicator::new(
		aaron_domain::new_id(),
		ActivityKind::Progress,
		"Building components...",
		OffsetDateTime::now_utc(),
	);

	progress.progress = Some(vec![
		ProgressStep::new("authentication_setup", true),
		ProgressStep::new("dashboard_layout", true),
		ProgressStep::new("api_endpoints", false),
		ProgressStep::new("database_schema", false),
	]);
	conversation.add_activity(progress);
	phase.send_replace(DemoPhase::Completing);

	tokio::time::sleep(REPLY_AFTER).await;

	let conversation_id = conversation.current_conversation_id();

	conversation.modify(|state| {
		state.is_typing = false;
		state.is_demo_mode = false;
		state.messages.push(Message {
			id: aaron_domain::new_id(),
			conversation_id: Some(conversation_id),
			role: Role::Assistant,
			content: CANNED_REPLY.to_string(),
			timestamp: OffsetDateTime::now_utc(),
			metadata: None,
		});
	});
	phase.send_replace(DemoPhase::Idle);
}
