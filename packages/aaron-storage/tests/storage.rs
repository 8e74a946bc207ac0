use serde_json::json;
use time::{Duration, OffsetDateTime, macros::datetime};

use aaron_domain::{
	AgentMode, AgentStatusUpdate, NewConversation, NewMemoryShard, NewMessage, NewQueueItem,
	NewTask, NewUser, QueueItemPatch, QueuePriority, QueueStatus, Role, TaskPatch, TaskStatus,
};
use aaron_storage::{Error, MemStorage};

const NOW: OffsetDateTime = datetime!(2026-03-01 09:30:00 UTC);

fn storage_config() -> aaron_config::Storage {
	aaron_config::Storage { max_messages: 0, max_memory_shards: 0, seed_sample_data: false }
}

fn new_task(title: &str, status: TaskStatus) -> NewTask {
	NewTask {
		title: title.to_string(),
		description: None,
		status,
		priority: None,
		is_pinned: false,
		metadata: None,
	}
}

fn new_item(title: &str, priority: QueuePriority) -> NewQueueItem {
	NewQueueItem {
		title: title.to_string(),
		description: None,
		priority,
		status: QueueStatus::Queued,
		estimated_time: None,
		metadata: None,
	}
}

#[test]
fn seeds_three_sample_queue_items() {
	let cfg = aaron_config::Storage { seed_sample_data: true, ..storage_config() };
	let storage = MemStorage::new(&cfg, NOW);
	let queue = storage.get_task_queue();
	let priorities: Vec<_> = queue.iter().map(|item| item.priority).collect();

	assert_eq!(priorities, vec![QueuePriority::High, QueuePriority::Medium, QueuePriority::Low]);
	assert_eq!(queue[0].status, QueueStatus::InProgress);
	assert_eq!(queue[0].started_at, Some(NOW));
}

#[test]
fn task_queue_sorts_by_priority_then_insertion() {
	let mut storage = MemStorage::new(&storage_config(), NOW);

	storage.create_task_queue_item(new_item("low", QueuePriority::Low), NOW);
	storage.create_task_queue_item(new_item("medium-1", QueuePriority::Medium), NOW);
	storage.create_task_queue_item(new_item("high", QueuePriority::High), NOW);
	storage.create_task_queue_item(new_item("medium-2", QueuePriority::Medium), NOW);

	let titles: Vec<_> = storage.get_task_queue().into_iter().map(|item| item.title).collect();

	assert_eq!(titles, vec!["high", "medium-1", "medium-2", "low"]);
}

#[test]
fn updating_missing_queue_item_is_not_found() {
	let mut storage = MemStorage::new(&storage_config(), NOW);
	let err = storage
		.update_task_queue_item("missing", QueueItemPatch::default(), NOW)
		.expect_err("Expected not found.");

	assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn agent_status_is_overwritten() {
	let mut storage = MemStorage::new(&storage_config(), NOW);
	let id = storage.agent_status().id.clone();
	let later = NOW + Duration::seconds(5);

	storage.update_agent_status(
		AgentStatusUpdate::new(AgentMode::Thinking, Some("Processing message")),
		NOW,
	);

	let status = storage.update_agent_status(AgentStatusUpdate::new(AgentMode::Idle, None), later);

	assert_eq!(status.id, id);
	assert_eq!(status.status, AgentMode::Idle);
	assert_eq!(status.current_task, None);
	assert_eq!(status.last_activity, later);
}

#[test]
fn messages_are_filtered_by_conversation_in_time_order() {
	let mut storage = MemStorage::new(&storage_config(), NOW);

	for (offset, conversation, content) in
		[(2, "a", "second"), (1, "b", "other"), (0, "a", "first"), (3, "a", "third")]
	{
		storage.create_message(
			NewMessage {
				conversation_id: Some(conversation.to_string()),
				role: Role::User,
				content: content.to_string(),
				metadata: None,
			},
			NOW + Duration::seconds(offset),
		);
	}

	let contents: Vec<_> =
		storage.get_messages("a").into_iter().map(|message| message.content).collect();

	assert_eq!(contents, vec!["first", "second", "third"]);
}

#[test]
fn message_log_evicts_oldest_when_bounded() {
	let cfg = aaron_config::Storage { max_messages: 2, ..storage_config() };
	let mut storage = MemStorage::new(&cfg, NOW);

	for (offset, content) in [(0, "one"), (1, "two"), (2, "three")] {
		storage.create_message(
			NewMessage {
				conversation_id: Some("default".to_string()),
				role: Role::User,
				content: content.to_string(),
				metadata: None,
			},
			NOW + Duration::seconds(offset),
		);
	}

	let contents: Vec<_> =
		storage.get_messages("default").into_iter().map(|message| message.content).collect();

	assert_eq!(contents, vec!["two", "three"]);
}

#[test]
fn tasks_are_listed_most_recently_updated_first() {
	let mut storage = MemStorage::new(&storage_config(), NOW);
	let first = storage.create_task(new_task("first", TaskStatus::Planned), NOW);

	storage.create_task(new_task("second", TaskStatus::Planned), NOW + Duration::seconds(1));
	storage
		.update_task(
			&first.id,
			TaskPatch { status: Some(TaskStatus::InProgress), ..Default::default() },
			NOW + Duration::seconds(2),
		)
		.expect("Task must exist.");

	let titles: Vec<_> = storage.get_tasks().into_iter().map(|task| task.title).collect();

	assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn flushed_tasks_are_not_offered_again() {
	let mut storage = MemStorage::new(&storage_config(), NOW);
	let resolved = storage.create_task(new_task("done", TaskStatus::Resolved), NOW);

	storage.create_task(new_task("open", TaskStatus::Planned), NOW);

	let pending = storage.unflushed_resolved_tasks();

	assert_eq!(pending.len(), 1);
	assert_eq!(pending[0].id, resolved.id);
	assert!(storage.mark_flushed(&resolved.id));
	assert!(!storage.mark_flushed(&resolved.id));
	assert!(storage.unflushed_resolved_tasks().is_empty());
}

#[test]
fn shards_are_newest_first_and_filterable() {
	let mut storage = MemStorage::new(&storage_config(), NOW);

	for (project, content) in [("alpha", "a1"), ("beta", "b1"), ("alpha", "a2")] {
		storage.create_memory_shard(
			NewMemoryShard {
				project: project.to_string(),
				content: content.to_string(),
				summary: None,
				tokens: Some(200),
				metadata: Some(json!({})),
			},
			NOW,
		);
	}

	let all: Vec<_> = storage.get_memory_shards().into_iter().map(|shard| shard.content).collect();
	let alpha: Vec<_> = storage
		.get_memory_shards_by_project("alpha")
		.into_iter()
		.map(|shard| shard.content)
		.collect();

	assert_eq!(all, vec!["a2", "b1", "a1"]);
	assert_eq!(alpha, vec!["a2", "a1"]);
}

#[test]
fn bounded_shard_log_evicts_oldest_but_keeps_flush_marks() {
	let cfg = aaron_config::Storage { max_memory_shards: 1, ..storage_config() };
	let mut storage = MemStorage::new(&cfg, NOW);

	storage.create_task(new_task("first", TaskStatus::Resolved), NOW);
	storage.create_task(new_task("second", TaskStatus::Resolved), NOW);

	for task in storage.unflushed_resolved_tasks() {
		storage.create_memory_shard(
			NewMemoryShard {
				project: "default".to_string(),
				content: task.id.clone(),
				summary: Some(task.title.clone()),
				tokens: Some(200),
				metadata: None,
			},
			NOW,
		);
		storage.mark_flushed(&task.id);
	}

	let summaries: Vec<_> =
		storage.get_memory_shards().into_iter().map(|shard| shard.summary).collect();

	assert_eq!(summaries, vec![Some("second".to_string())]);
	assert!(storage.unflushed_resolved_tasks().is_empty());
}

#[test]
fn usernames_are_unique() {
	let mut storage = MemStorage::new(&storage_config(), NOW);
	let user = storage
		.create_user(NewUser { username: "aaron".to_string() })
		.expect("First user must be created.");

	assert_eq!(storage.get_user(&user.id), Some(user.clone()));

	let err = storage
		.create_user(NewUser { username: "aaron".to_string() })
		.expect_err("Expected conflict.");

	assert!(matches!(err, Error::Conflict(_)));
}

#[test]
fn conversations_are_listed_per_user() {
	let mut storage = MemStorage::new(&storage_config(), NOW);
	let mine = storage.create_conversation(
		NewConversation { user_id: Some("u1".to_string()), title: "Mine".to_string() },
		NOW,
	);

	storage.create_conversation(
		NewConversation { user_id: Some("u2".to_string()), title: "Theirs".to_string() },
		NOW,
	);

	assert_eq!(storage.get_conversations("u1"), vec![mine.clone()]);
	assert_eq!(storage.get_conversation(&mine.id), Some(mine));
}
