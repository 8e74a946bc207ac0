//! Client-side state for the chat front end: stores, the scripted demo, and the channels that
//! keep them in step with the server.

pub mod activity;
pub mod api;
pub mod conversation;
pub mod mirror;
pub mod polling;
pub mod quote;
pub mod realtime;
pub mod sequencer;
pub mod sync;

mod error;
mod slot;

pub use activity::{Action, ActionStatus, ActivityState, ActivityStore};
pub use api::ApiClient;
pub use conversation::{ConversationState, ConversationStore};
pub use error::{Error, Result};
pub use mirror::{MirrorStore, ServerSnapshot};
pub use polling::Pollers;
pub use quote::{QuoteState, QuoteStore};
pub use realtime::RealtimeClient;
pub use sequencer::{DemoPhase, DemoSequencer};
pub use slot::Trigger;
pub use sync::{apply_event, spawn_sync};

pub use aaron_domain::{calculate_token_usage, compress_memory};
