use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tokio::sync::watch;

use aaron_domain::{ActivityIndicator, ActivityPatch, Message, Role};

pub const DEFAULT_CONVERSATION_ID: &str = "default";

const WELCOME_PROMPT: &str =
	"Help me build a modern web application with user authentication and a dashboard";
const WELCOME_REPLY: &str = "Sure! Let's get started on this task for you. I'll help you build a modern web application with authentication and dashboard functionality. Let me analyze the requirements and begin setting up the project structure.";

#[derive(Clone, Debug, PartialEq)]
pub struct ConversationState {
	pub messages: Vec<Message>,
	pub activities: Vec<ActivityIndicator>,
	pub is_typing: bool,
	pub current_conversation_id: String,
	pub current_title: Option<String>,
	pub is_demo_mode: bool,
}
impl Default for ConversationState {
	fn default() -> Self {
		Self {
			messages: welcome_messages(OffsetDateTime::now_utc()),
			activities: Vec::new(),
			is_typing: false,
			current_conversation_id: DEFAULT_CONVERSATION_ID.to_string(),
			current_title: None,
			is_demo_mode: false,
		}
	}
}

/// Messages and activity indicators of the conversation on screen.
///
/// Cloning shares the same state; every mutation notifies subscribers.
#[derive(Clone, Debug)]
pub struct ConversationStore {
	state: Arc<watch::Sender<ConversationState>>,
}
impl ConversationStore {
	pub fn new() -> Self {
		let (state, _) = watch::channel(ConversationState::default());

		Self { state: Arc::new(state) }
	}

	pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
		self.state.subscribe()
	}

	pub fn snapshot(&self) -> ConversationState {
		self.state.borrow().clone()
	}

	/// Appends without dedup or ordering checks.
	pub fn add_message(&self, message: Message) {
		self.state.send_modify(|state| state.messages.push(message));
	}

	pub fn add_activity(&self, activity: ActivityIndicator) {
		self.state.send_modify(|state| state.activities.push(activity));
	}

	/// Applies `patch` to the activity with `id`. Unknown ids are ignored.
	pub fn update_activity(&self, id: &str, patch: ActivityPatch) {
		self.state.send_if_modified(|state| {
			let Some(activity) = state.activities.iter_mut().find(|activity| activity.id == id)
			else {
				return false;
			};

			activity.apply(patch);

			true
		});
	}

	pub fn remove_activity(&self, id: &str) {
		self.state.send_if_modified(|state| {
			let before = state.activities.len();

			state.activities.retain(|activity| activity.id != id);

			state.activities.len() != before
		});
	}

	pub fn clear_activities(&self) {
		self.state.send_modify(|state| state.activities.clear());
	}

	/// Restores the welcome pair and drops every activity.
	pub fn clear_messages(&self) {
		let now = OffsetDateTime::now_utc();

		self.state.send_modify(|state| {
			state.messages = welcome_messages(now);
			state.activities.clear();
		});
	}

	pub fn set_typing(&self, typing: bool) {
		self.state.send_if_modified(|state| {
			let changed = state.is_typing != typing;

			state.is_typing = typing;

			changed
		});
	}

	pub fn set_demo_mode(&self, demo_mode: bool) {
		self.state.send_if_modified(|state| {
			let changed = state.is_demo_mode != demo_mode;

			state.is_demo_mode = demo_mode;

			changed
		});
	}

	pub fn set_current_conversation(&self, id: &str) {
		self.state.send_modify(|state| state.current_conversation_id = id.to_string());
	}

	/// Switches to a fresh conversation holding only `initial_message`, and returns its id.
	pub fn start_new_conversation(&self, title: &str, initial_message: &str) -> String {
		let conversation_id = aaron_domain::new_id();
		let message = Message {
			id: aaron_domain::new_id(),
			conversation_id: Some(conversation_id.clone()),
			role: Role::User,
			content: initial_message.to_string(),
			timestamp: OffsetDateTime::now_utc(),
			metadata: None,
		};

		self.state.send_modify(|state| {
			state.current_conversation_id = conversation_id.clone();
			state.current_title = Some(title.to_string());
			state.messages = vec![message];
			state.is_demo_mode = false;
		});

		conversation_id
	}

	pub(crate) fn current_conversation_id(&self) -> String {
		self.state.borrow().current_conversation_id.clone()
	}

	pub(crate) fn has_message(&self, id: &str) -> bool {
		self.state.borrow().messages.iter().any(|message| message.id == id)
	}

	pub(crate) fn modify(&self, f: impl FnOnce(&mut ConversationState)) {
		self.state.send_modify(f);
	}
}
impl Default for ConversationStore {
	fn default() -> Self {
		Self::new()
	}
}

fn welcome_messages(now: OffsetDateTime) -> Vec<Message> {
	let seed = |id: &str, role, content: &str, age_secs| Message {
		id: id.to_string(),
		conversation_id: Some(DEFAULT_CONVERSATION_ID.to_string()),
		role,
		content: content.to_string(),
		timestamp: now - Duration::seconds(age_secs),
		metadata: None,
	};

	vec![
		seed("demo-user", Role::User, WELCOME_PROMPT, 30),
		seed("demo-aaron", Role::Assistant, WELCOME_REPLY, 25),
	]
}
