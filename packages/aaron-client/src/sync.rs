use tokio::{
	sync::broadcast::{self, error::RecvError},
	task::JoinHandle,
};

use aaron_domain::ServerEvent;

use crate::{ConversationStore, MirrorStore};

/// Applies one push event to the stores.
///
/// Messages land in the conversation only when they belong to the current conversation and are
/// not already shown there.
pub fn apply_event(event: ServerEvent, conversation: &ConversationStore, mirror: &MirrorStore) {
	match event {
		ServerEvent::Message { message } => {
			let current = conversation.current_conversation_id();

			if message.conversation_id.as_deref() == Some(current.as_str())
				&& !conversation.has_message(&message.id)
			{
				conversation.add_message(message);
			}
		},
		ServerEvent::StatusUpdate { status, current_task, metadata } =>
			mirror.apply_status_update(status, current_task, metadata),
		ServerEvent::TaskCreated { task } | ServerEvent::TaskUpdated { task } =>
			mirror.upsert_task(task),
		ServerEvent::QueueItemCreated { item } | ServerEvent::QueueItemUpdated { item } =>
			mirror.upsert_queue_item(item),
		ServerEvent::PipelineUpdated { pipeline } => mirror.set_status_pipeline(pipeline),
		ServerEvent::FlushComplete { shards_created } => {
			tracing::info!(shards_created, "Server flushed context.");
		},
	}
}

/// Feeds every event from `events` into the stores until the sender side closes.
pub fn spawn_sync(
	mut events: broadcast::Receiver<ServerEvent>,
	conversation: ConversationStore,
	mirror: MirrorStore,
) -> JoinHandle<()> {
	tokio::spawn(async move {
		loop {
			match events.recv().await {
				Ok(event) => apply_event(event, &conversation, &mirror),
				Err(RecvError::Lagged(skipped)) => {
					tracing::warn!(skipped, "Sync bridge lagged; polling will catch up.");
				},
				Err(RecvError::Closed) => return,
			}
		}
	})
}
