use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub agent: Agent,
	#[serde(default)]
	pub context: Context,
	#[serde(default)]
	pub flush: Flush,
	#[serde(default)]
	pub storage: Storage,
	#[serde(default)]
	pub client: Client,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Timings of the scripted reply chain that stands in for a real agent.
#[derive(Clone, Debug, Deserialize)]
pub struct Agent {
	#[serde(default = "default_reply_delay_ms")]
	pub reply_delay_ms: u64,
	#[serde(default = "default_idle_delay_ms")]
	pub idle_delay_ms: u64,
}
impl Default for Agent {
	fn default() -> Self {
		Self { reply_delay_ms: default_reply_delay_ms(), idle_delay_ms: default_idle_delay_ms() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Context {
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	#[serde(default = "default_tokens_per_task")]
	pub tokens_per_task: u32,
}
impl Default for Context {
	fn default() -> Self {
		Self { max_tokens: default_max_tokens(), tokens_per_task: default_tokens_per_task() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flush {
	#[serde(default = "default_flush_project")]
	pub project: String,
	#[serde(default = "default_tokens_per_task")]
	pub shard_tokens: u32,
}
impl Default for Flush {
	fn default() -> Self {
		Self { project: default_flush_project(), shard_tokens: default_tokens_per_task() }
	}
}

/// Bounds for the in-memory logs. Zero leaves a log unbounded.
#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	#[serde(default)]
	pub max_messages: usize,
	#[serde(default)]
	pub max_memory_shards: usize,
	#[serde(default = "default_true")]
	pub seed_sample_data: bool,
}
impl Default for Storage {
	fn default() -> Self {
		Self { max_messages: 0, max_memory_shards: 0, seed_sample_data: true }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Client {
	#[serde(default = "default_server_url")]
	pub server_url: String,
	#[serde(default = "default_reconnect_backoff_ms")]
	pub reconnect_backoff_ms: u64,
	#[serde(default = "default_status_poll_ms")]
	pub status_poll_ms: u64,
	#[serde(default = "default_queue_poll_ms")]
	pub queue_poll_ms: u64,
	#[serde(default = "default_pipeline_poll_ms")]
	pub pipeline_poll_ms: u64,
	#[serde(default = "default_terminal_tail")]
	pub terminal_tail: usize,
}
impl Client {
	/// Websocket endpoint derived from `server_url` (`http` -> `ws`, `https` -> `wss`).
	pub fn ws_url(&self) -> String {
		let base = &self.server_url;

		if let Some(rest) = base.strip_prefix("https://") {
			format!("wss://{rest}/ws")
		} else if let Some(rest) = base.strip_prefix("http://") {
			format!("ws://{rest}/ws")
		} else {
			format!("{base}/ws")
		}
	}
}
impl Default for Client {
	fn default() -> Self {
		Self {
			server_url: default_server_url(),
			reconnect_backoff_ms: default_reconnect_backoff_ms(),
			status_poll_ms: default_status_poll_ms(),
			queue_poll_ms: default_queue_poll_ms(),
			pipeline_poll_ms: default_pipeline_poll_ms(),
			terminal_tail: default_terminal_tail(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_reply_delay_ms() -> u64 {
	2_000
}

fn default_idle_delay_ms() -> u64 {
	5_000
}

fn default_max_tokens() -> u32 {
	15_000
}

fn default_tokens_per_task() -> u32 {
	200
}

fn default_flush_project() -> String {
	"default".to_string()
}

fn default_true() -> bool {
	true
}

fn default_server_url() -> String {
	"http://127.0.0.1:5000".to_string()
}

fn default_reconnect_backoff_ms() -> u64 {
	3_000
}

fn default_status_poll_ms() -> u64 {
	5_000
}

fn default_queue_poll_ms() -> u64 {
	2_000
}

fn default_pipeline_poll_ms() -> u64 {
	1_000
}

fn default_terminal_tail() -> usize {
	8
}
