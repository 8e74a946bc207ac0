use std::{future::Future, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{ApiClient, MirrorStore, Result};

/// Background snapshot refreshers for agent status, task queue and status pipeline.
///
/// A failed fetch keeps the previous snapshot. Dropping the value stops every loop.
#[derive(Debug)]
pub struct Pollers {
	handles: Vec<JoinHandle<()>>,
}
impl Pollers {
	pub fn spawn(api: ApiClient, mirror: MirrorStore, cfg: &aaron_config::Client) -> Self {
		let handles = vec![
			spawn_loop(
				"agent_status",
				Duration::from_millis(cfg.status_poll_ms),
				{
					let api = api.clone();

					move || {
						let api = api.clone();

						async move { api.agent_status().await }
					}
				},
				{
					let mirror = mirror.clone();

					move |status| mirror.set_agent_status(status)
				},
			),
			spawn_loop(
				"task_queue",
				Duration::from_millis(cfg.queue_poll_ms),
				{
					let api = api.clone();

					move || {
						let api = api.clone();

						async move { api.task_queue().await }
					}
				},
				{
					let mirror = mirror.clone();

					move |items| mirror.set_task_queue(items)
				},
			),
			spawn_loop(
				"status_pipeline",
				Duration::from_millis(cfg.pipeline_poll_ms),
				move || {
					let api = api.clone();

					async move { api.status_pipeline().await }
				},
				move |pipeline| mirror.set_status_pipeline(pipeline),
			),
		];

		Self { handles }
	}
}
impl Drop for Pollers {
	fn drop(&mut self) {
		for handle in &self.handles {
			handle.abort();
		}
	}
}

fn spawn_loop<T, F, Fut, A>(
	name: &'static str,
	period: Duration,
	fetch: F,
	apply: A,
) -> JoinHandle<()>
where
	T: Send + 'static,
	F: Fn() -> Fut + Send + 'static,
	Fut: Future<Output = Result<T>> + Send,
	A: Fn(T) + Send + 'static,
{
	tokio::spawn(async move {
		let mut ticker = tokio::time::interval(period);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			ticker.tick().await;

			match fetch().await {
				Ok(snapshot) => apply(snapshot),
				Err(err) => {
					tracing::warn!(poll = name, error = %err, "Poll failed; keeping last snapshot.");
				},
			}
		}
	})
}
