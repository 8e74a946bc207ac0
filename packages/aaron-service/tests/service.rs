use std::time::Duration;

use serde_json::Value;
use tokio::{sync::broadcast::error::TryRecvError, time::Instant};

use aaron_domain::{
	AgentMode, NewMessage, NewQueueItem, NewTask, QueueItemPatch, QueuePriority, QueueStatus, Role,
	ServerEvent, Stage, StageState, TaskPatch, TaskStatus, pipeline::PipelinePatch,
};
use aaron_service::{AaronService, Error};

fn service() -> AaronService {
	AaronService::new(aaron_testkit::test_config())
}

fn user_message(content: &str) -> NewMessage {
	NewMessage {
		conversation_id: Some("default".to_string()),
		role: Role::User,
		content: content.to_string(),
		metadata: None,
	}
}

fn new_task(title: &str, status: TaskStatus, is_pinned: bool) -> NewTask {
	NewTask {
		title: title.to_string(),
		description: Some(format!("{title} description")),
		status,
		priority: None,
		is_pinned,
		metadata: None,
	}
}

fn assert_elapsed(started: Instant, expected_ms: u64) {
	let elapsed = started.elapsed();
	let expected = Duration::from_millis(expected_ms);

	assert!(
		elapsed >= expected && elapsed < expected + Duration::from_millis(50),
		"Expected about {expected:?}, got {elapsed:?}."
	);
}

#[tokio::test(start_paused = true)]
async fn posted_message_drives_scripted_reply_chain() {
	let service = service();
	let mut events = service.events.subscribe();
	let started = Instant::now();
	let stored = service.post_message(user_message("hello")).await.expect("Message must be stored.");

	assert_eq!(stored.role, Role::User);
	assert_eq!(stored.content, "hello");

	match events.recv().await.expect("Expected thinking status.") {
		ServerEvent::StatusUpdate { status, current_task, .. } => {
			assert_eq!(status, AgentMode::Thinking);
			assert_eq!(current_task.as_deref(), Some("Processing message"));
		},
		other => panic!("Unexpected event: {other:?}"),
	}
	match events.recv().await.expect("Expected the user message.") {
		ServerEvent::Message { message } => assert_eq!(message.id, stored.id),
		other => panic!("Unexpected event: {other:?}"),
	}

	assert_eq!(service.agent_status().await.status, AgentMode::Thinking);

	match events.recv().await.expect("Expected the assistant reply.") {
		ServerEvent::Message { message } => {
			assert_eq!(message.role, Role::Assistant);
			assert!(message.content.contains("hello"));
			assert_eq!(message.conversation_id.as_deref(), Some("default"));
			assert_eq!(
				message.metadata.as_ref().and_then(|metadata| metadata.get("thinking")),
				Some(&Value::Bool(true))
			);
		},
		other => panic!("Unexpected event: {other:?}"),
	}

	assert_elapsed(started, 2_000);

	match events.recv().await.expect("Expected executing status.") {
		ServerEvent::StatusUpdate { status, .. } => assert_eq!(status, AgentMode::Executing),
		other => panic!("Unexpected event: {other:?}"),
	}
	match events.recv().await.expect("Expected idle status.") {
		ServerEvent::StatusUpdate { status, current_task, .. } => {
			assert_eq!(status, AgentMode::Idle);
			assert_eq!(current_task, None);
		},
		other => panic!("Unexpected event: {other:?}"),
	}

	assert_elapsed(started, 7_000);
	assert_eq!(service.messages("default").await.len(), 2);
	assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn blank_message_is_rejected_without_side_effects() {
	let service = service();
	let mut events = service.events.subscribe();
	let err = service.post_message(user_message("   ")).await.expect_err("Expected rejection.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
	assert_eq!(service.agent_status().await.status, AgentMode::Idle);
}

#[tokio::test]
async fn second_flush_without_new_resolved_tasks_creates_nothing() {
	let service = service();
	let resolved = service
		.create_task(new_task("Ship login", TaskStatus::Resolved, false))
		.await
		.expect("Task must be created.");

	service
		.create_task(new_task("Still planned", TaskStatus::Planned, false))
		.await
		.expect("Task must be created.");

	let first = service.flush().await.expect("Flush must succeed.");
	let second = service.flush().await.expect("Flush must succeed.");

	assert_eq!(first.shards_created, 1);
	assert_eq!(second.shards_created, 0);

	let shards = service.memory_shards_by_project("default").await;

	assert_eq!(shards.len(), 1);
	assert_eq!(shards[0].summary.as_deref(), Some("Ship login"));
	assert_eq!(shards[0].tokens, Some(200));
	assert_eq!(
		shards[0].metadata.as_ref().and_then(|m| m.get("originalTaskId")).and_then(Value::as_str),
		Some(resolved.id.as_str())
	);

	let content: Value = serde_json::from_str(&shards[0].content).expect("Content must be JSON.");

	assert_eq!(content["title"], "Ship login");
	assert_eq!(content["status"], "resolved");
}

#[tokio::test]
async fn newly_resolved_task_is_flushed_on_next_run() {
	let service = service();
	let task = service
		.create_task(new_task("Write docs", TaskStatus::InProgress, false))
		.await
		.expect("Task must be created.");

	assert_eq!(service.flush().await.expect("Flush must succeed.").shards_created, 0);

	service
		.update_task(&task.id, TaskPatch { status: Some(TaskStatus::Resolved), ..Default::default() })
		.await
		.expect("Task must be updated.");

	assert_eq!(service.flush().await.expect("Flush must succeed.").shards_created, 1);
}

#[tokio::test]
async fn flush_broadcasts_completion() {
	let service = service();
	let mut events = service.events.subscribe();

	service.flush().await.expect("Flush must succeed.");

	assert_eq!(
		events.try_recv().expect("Expected flush event."),
		ServerEvent::FlushComplete { shards_created: 0 }
	);
}

#[tokio::test]
async fn active_context_counts_in_progress_and_pinned_tasks() {
	let service = service();

	for (title, status, pinned) in [
		("working", TaskStatus::InProgress, false),
		("pinned", TaskStatus::Planned, true),
		("idle", TaskStatus::Planned, false),
		("blocked", TaskStatus::Blocked, false),
	] {
		service.create_task(new_task(title, status, pinned)).await.expect("Task must be created.");
	}

	let context = service.active_context().await;

	assert_eq!(context.tasks.len(), 2);
	assert_eq!(context.total_tokens, 400);
	assert_eq!(context.max_tokens, 15_000);
}

#[tokio::test]
async fn updating_unknown_task_is_not_found() {
	let service = service();
	let err = service
		.update_task("nope", TaskPatch::default())
		.await
		.expect_err("Expected not found.");

	assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn task_mutations_are_broadcast() {
	let service = service();
	let mut events = service.events.subscribe();
	let task = service
		.create_task(new_task("Plan", TaskStatus::Planned, false))
		.await
		.expect("Task must be created.");

	assert!(matches!(events.try_recv(), Ok(ServerEvent::TaskCreated { .. })));

	service
		.update_task(&task.id, TaskPatch { is_pinned: Some(true), ..Default::default() })
		.await
		.expect("Task must be updated.");

	match events.try_recv().expect("Expected update event.") {
		ServerEvent::TaskUpdated { task } => assert!(task.is_pinned),
		other => panic!("Unexpected event: {other:?}"),
	}
}

#[tokio::test]
async fn queue_snapshot_is_priority_ordered() {
	let service = service();

	for (title, priority) in
		[("c", QueuePriority::Low), ("a", QueuePriority::High), ("b", QueuePriority::Medium)]
	{
		service
			.create_queue_item(NewQueueItem {
				title: title.to_string(),
				description: None,
				priority,
				status: QueueStatus::Queued,
				estimated_time: None,
				metadata: None,
			})
			.await
			.expect("Item must be created.");
	}

	let queue = service.task_queue().await;
	let titles: Vec<_> = queue.iter().map(|item| item.title.as_str()).collect();

	assert_eq!(titles, vec!["a", "b", "c"]);

	let done = service
		.update_queue_item(
			&queue[2].id,
			QueueItemPatch { status: Some(QueueStatus::Completed), ..Default::default() },
		)
		.await
		.expect("Item must be updated.");

	assert!(done.completed_at.is_some());
	assert!(done.started_at.is_none());
}

#[tokio::test]
async fn pipeline_update_rederives_stages_and_broadcasts() {
	let service = service();
	let mut events = service.events.subscribe();
	let pipeline = service
		.update_status_pipeline(PipelinePatch {
			current_stage: Some(Stage::Done),
			task_id: Some("t-1".to_string()),
			metadata: None,
		})
		.await;

	assert_eq!(pipeline.task_id.as_deref(), Some("t-1"));
	assert!(pipeline.stages[..3].iter().all(|stage| stage.status == StageState::Completed));
	assert_eq!(pipeline.stages[3].progress, 65);
	assert_eq!(service.status_pipeline().await, pipeline);
	assert!(matches!(events.try_recv(), Ok(ServerEvent::PipelineUpdated { .. })));
}

#[tokio::test]
async fn bounded_shard_log_keeps_newest_and_never_reflushes() {
	let mut config = aaron_testkit::test_config();

	config.storage.max_memory_shards = 1;

	let service = AaronService::new(config);

	for title in ["first", "second"] {
		service
			.create_task(new_task(title, TaskStatus::Resolved, false))
			.await
			.expect("Task must be created.");
	}

	let report = service.flush().await.expect("Flush must succeed.");
	let shards = service.memory_shards().await;

	assert_eq!(report.shards_created, 2);
	assert_eq!(shards.len(), 1);
	assert_eq!(shards[0].summary.as_deref(), Some("second"));

	let again = service.flush().await.expect("Flush must succeed.");

	assert_eq!(again.shards_created, 0);
	assert_eq!(service.memory_shards().await, shards);
}
