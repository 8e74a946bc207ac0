use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{sync::watch, time::Instant};

use crate::slot::{RunSlot, Trigger};

const INITIAL_TERMINAL_LINES: [&str; 10] = [
	"$ npx create-react-app webapp --template typescript",
	"✓ Created new React TypeScript project",
	"$ cd webapp && npm install @auth0/auth0-react",
	"✓ Installing authentication packages...",
	"$ npm install @headlessui/react @tailwindcss/forms",
	"✓ Setting up UI components...",
	"$ mkdir src/components/dashboard",
	"✓ Creating dashboard structure...",
	"$ npm run build",
	"✓ Build completed successfully",
];
const INITIAL_ACTIONS: [(&str, &str, ActionStatus); 6] = [
	("Analyzed project requirements", "30s ago", ActionStatus::Completed),
	("Generated authentication setup", "25s ago", ActionStatus::Completed),
	("Creating dashboard components", "20s ago", ActionStatus::InProgress),
	("Installing dependencies", "15s ago", ActionStatus::InProgress),
	("Setting up routing", "10s ago", ActionStatus::Pending),
	("Deploying to production", "5s ago", ActionStatus::Pending),
];

/// Scripted demo steps: offset from start, terminal line, action index, new action status.
const DEMO_TIMELINE: [(u64, &str, usize, ActionStatus); 6] = [
	(1_000, "$ npm install express cors helmet", 2, ActionStatus::Completed),
	(2_000, "✓ Backend dependencies installed", 3, ActionStatus::Completed),
	(3_000, "$ npx create-react-app client --template typescript", 4, ActionStatus::InProgress),
	(4_000, "✓ Frontend scaffolding complete", 4, ActionStatus::Completed),
	(5_000, "$ npm run test", 5, ActionStatus::InProgress),
	(6_000, "✓ All tests passing", 5, ActionStatus::Completed),
];
const DEMO_DURATION: Duration = Duration::from_millis(7_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
	Pending,
	InProgress,
	Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
	pub action: String,
	pub time: String,
	pub status: ActionStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityState {
	pub terminal_lines: Vec<String>,
	pub actions: Vec<Action>,
	pub is_active: bool,
}
impl Default for ActivityState {
	fn default() -> Self {
		Self {
			terminal_lines: INITIAL_TERMINAL_LINES.iter().map(|line| line.to_string()).collect(),
			actions: INITIAL_ACTIONS
				.iter()
				.map(|(action, time, status)| Action {
					action: action.to_string(),
					time: time.to_string(),
					status: *status,
				})
				.collect(),
			is_active: false,
		}
	}
}
impl ActivityState {
	/// The last `tail` terminal lines, oldest first.
	pub fn visible_terminal_lines(&self, tail: usize) -> &[String] {
		let start = self.terminal_lines.len().saturating_sub(tail);

		&self.terminal_lines[start..]
	}
}

/// Rolling terminal log and action checklist backing the live-activity view.
#[derive(Debug)]
pub struct ActivityStore {
	state: Arc<watch::Sender<ActivityState>>,
	demo: RunSlot,
	terminal_tail: usize,
}
impl ActivityStore {
	pub fn new(terminal_tail: usize) -> Self {
		let (state, _) = watch::channel(ActivityState::default());

		Self { state: Arc::new(state), demo: RunSlot::default(), terminal_tail }
	}

	pub fn subscribe(&self) -> watch::Receiver<ActivityState> {
		self.state.subscribe()
	}

	pub fn snapshot(&self) -> ActivityState {
		self.state.borrow().clone()
	}

	pub fn visible_terminal_lines(&self) -> Vec<String> {
		self.state.borrow().visible_terminal_lines(self.terminal_tail).to_vec()
	}

	pub fn add_terminal_line(&self, line: &str) {
		add_terminal_line(&self.state, line);
	}

	/// Sets the status of the action at `index`. Any transition is accepted; an index past the
	/// end changes nothing.
	pub fn update_action(&self, index: usize, status: ActionStatus) {
		update_action(&self.state, index, status);
	}

	/// Plays the scripted timeline. Rejected while a previous run is still active.
	pub fn start_demo(&self) -> Trigger {
		let trigger = self.demo.try_start(|| {
			self.state.send_modify(|state| state.is_active = true);

			run_demo(self.state.clone())
		});

		if trigger == Trigger::Rejected {
			tracing::debug!("Activity demo already running.");
		}

		trigger
	}

	/// Cancels any running demo and restores the initial lines and actions.
	pub fn reset(&self) {
		self.demo.cancel();
		self.state.send_replace(ActivityState::default());
	}
}
impl Drop for ActivityStore {
	fn drop(&mut self) {
		self.demo.cancel();
	}
}

async fn run_demo(state: Arc<watch::Sender<ActivityState>>) {
	let started = Instant::now();

	for (offset_ms, line, index, status) in DEMO_TIMELINE {
		tokio::time::sleep_until(started + Duration::from_millis(offset_ms)).await;

		if !state.borrow().is_active {
			return;
		}

		add_terminal_line(&state, line);
		update_action(&state, index, status);
	}

	tokio::time::sleep_until(started + DEMO_DURATION).await;
	state.send_modify(|state| state.is_active = false);
}

fn add_terminal_line(state: &watch::Sender<ActivityState>, line: &str) {
	state.send_modify(|state| state.terminal_lines.push(line.to_string()));
}

fn update_action(state: &watch::Sender<ActivityState>, index: usize, status: ActionStatus) {
	state.send_if_modified(|state| match state.actions.get_mut(index) {
		Some(action) => {
			action.status = status;

			true
		},
		None => false,
	});
}
