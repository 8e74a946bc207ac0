use std::{future::Future, sync::Mutex};

use tokio::task::AbortHandle;

/// Outcome of asking for a new background run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
	Started,
	/// A previous run is still in flight; nothing was scheduled.
	Rejected,
}

/// Holds at most one in-flight background task.
#[derive(Debug, Default)]
pub(crate) struct RunSlot {
	handle: Mutex<Option<AbortHandle>>,
}
impl RunSlot {
	/// Runs `start` and spawns the future it returns, unless a run is still in flight.
	///
	/// `start` executes under the slot lock, so its synchronous effects are never observed by a
	/// caller that got `Rejected`.
	pub(crate) fn try_start<S, F>(&self, start: S) -> Trigger
	where
		S: FnOnce() -> F,
		F: Future<Output = ()> + Send + 'static,
	{
		let mut handle = self.handle.lock().unwrap_or_else(|err| err.into_inner());

		if handle.as_ref().is_some_and(|handle| !handle.is_finished()) {
			return Trigger::Rejected;
		}

		*handle = Some(tokio::spawn(start()).abort_handle());

		Trigger::Started
	}

	/// Aborts the in-flight run. Returns whether one was running.
	pub(crate) fn cancel(&self) -> bool {
		let handle = self.handle.lock().unwrap_or_else(|err| err.into_inner()).take();

		match handle {
			Some(handle) if !handle.is_finished() => {
				handle.abort();

				true
			},
			_ => false,
		}
	}
}
