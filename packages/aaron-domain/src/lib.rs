//! Entity types shared by the server, the client stores and the wire.
//!
//! Every record lives only in process memory; ids are fresh random strings.

pub mod activity;
pub mod agent;
pub mod context;
pub mod conversation;
pub mod event;
pub mod memory;
pub mod message;
pub mod pipeline;
pub mod queue;
pub mod task;
pub mod time_serde;

pub use activity::{ActivityIndicator, ActivityKind, ActivityPatch, ProgressStep};
pub use agent::{AgentMode, AgentStatus, AgentStatusUpdate};
pub use context::{ActiveContext, FlushReport};
pub use conversation::{Conversation, NewConversation, NewUser, User};
pub use event::ServerEvent;
pub use memory::{MemoryShard, NewMemoryShard, calculate_token_usage, compress_memory};
pub use message::{Message, NewMessage, Role};
pub use pipeline::{PipelinePatch, Stage, StageProgress, StageState, StatusPipeline};
pub use queue::{NewQueueItem, QueueItemPatch, QueuePriority, QueueStatus, TaskQueueItem};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};

/// Returns a fresh random id in the canonical hyphenated form.
pub fn new_id() -> String {
	uuid::Uuid::new_v4().to_string()
}
