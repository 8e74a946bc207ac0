//! Process-lifetime storage for every server-side entity.
//!
//! Nothing here is durable. Maps provide no referential integrity: a message may name a
//! conversation that was never created.

mod error;
mod table;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

use std::collections::HashSet;

use time::OffsetDateTime;

use aaron_domain::{
	AgentStatus, AgentStatusUpdate, Conversation, MemoryShard, Message, NewConversation,
	NewMemoryShard, NewMessage, NewQueueItem, NewTask, NewUser, PipelinePatch, QueueItemPatch,
	QueuePriority, QueueStatus, StatusPipeline, Task, TaskPatch, TaskQueueItem, TaskStatus, User,
	new_id,
};

use crate::table::Table;

#[derive(Debug)]
pub struct MemStorage {
	users: Table<User>,
	conversations: Table<Conversation>,
	messages: Table<Message>,
	tasks: Table<Task>,
	memory_shards: Table<MemoryShard>,
	task_queue: Table<TaskQueueItem>,
	agent_status: AgentStatus,
	status_pipeline: StatusPipeline,
	flushed_tasks: HashSet<String>,
}
impl MemStorage {
	pub fn new(cfg: &aaron_config::Storage, now: OffsetDateTime) -> Self {
		let mut storage = Self {
			users: Table::unbounded(),
			conversations: Table::unbounded(),
			messages: Table::with_capacity(cfg.max_messages),
			tasks: Table::unbounded(),
			memory_shards: Table::with_capacity(cfg.max_memory_shards),
			task_queue: Table::unbounded(),
			agent_status: AgentStatus::idle(new_id(), now),
			status_pipeline: StatusPipeline::new(new_id(), now),
			flushed_tasks: HashSet::new(),
		};

		if cfg.seed_sample_data {
			storage.seed_sample_queue(now);
		}

		storage
	}

	fn seed_sample_queue(&mut self, now: OffsetDateTime) {
		let samples = [
			(
				"Implement user authentication",
				"Set up JWT-based authentication system",
				QueuePriority::High,
				QueueStatus::InProgress,
				45,
			),
			(
				"Database schema optimization",
				"Optimize database queries and indexes",
				QueuePriority::Medium,
				QueueStatus::Queued,
				30,
			),
			(
				"UI component library update",
				"Update shadcn/ui components to latest version",
				QueuePriority::Low,
				QueueStatus::Queued,
				20,
			),
		];

		for (title, description, priority, status, estimated_time) in samples {
			self.create_task_queue_item(
				NewQueueItem {
					title: title.to_string(),
					description: Some(description.to_string()),
					priority,
					status,
					estimated_time: Some(estimated_time),
					metadata: None,
				},
				now,
			);
		}
	}

	pub fn get_user(&self, id: &str) -> Option<User> {
		self.users.get(id).cloned()
	}

	pub fn get_user_by_username(&self, username: &str) -> Option<User> {
		self.users.iter().find(|user| user.username == username).cloned()
	}

	pub fn create_user(&mut self, new: NewUser) -> Result<User> {
		if self.get_user_by_username(&new.username).is_some() {
			return Err(Error::Conflict(format!("username {} is taken", new.username)));
		}

		let user = User { id: new_id(), username: new.username };

		self.users.insert(user.id.clone(), user.clone());

		Ok(user)
	}

	pub fn get_conversations(&self, user_id: &str) -> Vec<Conversation> {
		self.conversations
			.iter()
			.filter(|conversation| conversation.user_id.as_deref() == Some(user_id))
			.cloned()
			.collect()
	}

	pub fn get_conversation(&self, id: &str) -> Option<Conversation> {
		self.conversations.get(id).cloned()
	}

	pub fn create_conversation(
		&mut self,
		new: NewConversation,
		now: OffsetDateTime,
	) -> Conversation {
		let conversation = Conversation {
			id: new_id(),
			user_id: new.user_id,
			title: new.title,
			created_at: now,
			updated_at: now,
		};

		self.conversations.insert(conversation.id.clone(), conversation.clone());

		conversation
	}

	/// Messages of one conversation, oldest first.
	pub fn get_messages(&self, conversation_id: &str) -> Vec<Message> {
		let mut messages: Vec<Message> = self
			.messages
			.iter()
			.filter(|message| message.conversation_id.as_deref() == Some(conversation_id))
			.cloned()
			.collect();

		messages.sort_by_key(|message| message.timestamp);

		messages
	}

	pub fn create_message(&mut self, new: NewMessage, now: OffsetDateTime) -> Message {
		let message = new.into_message(new_id(), now);

		if let Some(evicted) = self.messages.insert(message.id.clone(), message.clone()) {
			tracing::debug!(message_id = %evicted, "Message log full; evicted oldest message.");
		}

		message
	}

	/// All tasks, most recently updated first.
	pub fn get_tasks(&self) -> Vec<Task> {
		let mut tasks: Vec<Task> = self.tasks.iter().rev().cloned().collect();

		tasks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

		tasks
	}

	pub fn get_task(&self, id: &str) -> Option<Task> {
		self.tasks.get(id).cloned()
	}

	pub fn create_task(&mut self, new: NewTask, now: OffsetDateTime) -> Task {
		let task = new.into_task(new_id(), now);

		self.tasks.insert(task.id.clone(), task.clone());

		task
	}

	pub fn update_task(&mut self, id: &str, patch: TaskPatch, now: OffsetDateTime) -> Result<Task> {
		let task = self.tasks.get_mut(id).ok_or_else(|| Error::NotFound(format!("task {id}")))?;

		task.apply(patch, now);

		Ok(task.clone())
	}

	/// Resolved tasks that have not been projected into a memory shard yet.
	pub fn unflushed_resolved_tasks(&self) -> Vec<Task> {
		self.tasks
			.iter()
			.filter(|task| task.status == TaskStatus::Resolved)
			.filter(|task| !self.flushed_tasks.contains(&task.id))
			.cloned()
			.collect()
	}

	/// Records that a task has been flushed. Returns false when it already was.
	pub fn mark_flushed(&mut self, task_id: &str) -> bool {
		self.flushed_tasks.insert(task_id.to_string())
	}

	/// All shards, newest first.
	pub fn get_memory_shards(&self) -> Vec<MemoryShard> {
		self.memory_shards.iter().rev().cloned().collect()
	}

	pub fn get_memory_shards_by_project(&self, project: &str) -> Vec<MemoryShard> {
		self.memory_shards.iter().rev().filter(|shard| shard.project == project).cloned().collect()
	}

	pub fn create_memory_shard(
		&mut self,
		new: NewMemoryShard,
		now: OffsetDateTime,
	) -> MemoryShard {
		let shard = new.into_shard(new_id(), now);

		if let Some(evicted) = self.memory_shards.insert(shard.id.clone(), shard.clone()) {
			tracing::debug!(shard_id = %evicted, "Memory shard log full; evicted oldest shard.");
		}

		shard
	}

	pub fn agent_status(&self) -> &AgentStatus {
		&self.agent_status
	}

	pub fn update_agent_status(
		&mut self,
		update: AgentStatusUpdate,
		now: OffsetDateTime,
	) -> AgentStatus {
		self.agent_status.apply(update, now);

		self.agent_status.clone()
	}

	/// Queue snapshot ordered by priority; equal priorities keep insertion order.
	pub fn get_task_queue(&self) -> Vec<TaskQueueItem> {
		let mut items: Vec<TaskQueueItem> = self.task_queue.iter().cloned().collect();

		items.sort_by_key(|item| item.priority);

		items
	}

	pub fn create_task_queue_item(
		&mut self,
		new: NewQueueItem,
		now: OffsetDateTime,
	) -> TaskQueueItem {
		let item = new.into_item(new_id(), now);

		self.task_queue.insert(item.id.clone(), item.clone());

		item
	}

	pub fn update_task_queue_item(
		&mut self,
		id: &str,
		patch: QueueItemPatch,
		now: OffsetDateTime,
	) -> Result<TaskQueueItem> {
		let item = self
			.task_queue
			.get_mut(id)
			.ok_or_else(|| Error::NotFound(format!("task queue item {id}")))?;

		item.apply(patch, now);

		Ok(item.clone())
	}

	pub fn status_pipeline(&self) -> &StatusPipeline {
		&self.status_pipeline
	}

	pub fn update_status_pipeline(
		&mut self,
		patch: PipelinePatch,
		now: OffsetDateTime,
	) -> StatusPipeline {
		self.status_pipeline.apply(patch, now);

		self.status_pipeline.clone()
	}
}
