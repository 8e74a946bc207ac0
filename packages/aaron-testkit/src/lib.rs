mod error;

pub use error::{Error, Result};

use std::net::SocketAddr;

use axum::Router;
use tokio::{net::TcpListener, task::JoinHandle};

use aaron_config::{Agent, Client, Config, Context, Flush, Service, Storage};

/// Config with the stock agent timings and fast client loops. Seed data is off.
pub fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "debug".to_string() },
		agent: Agent { reply_delay_ms: 2_000, idle_delay_ms: 5_000 },
		context: Context { max_tokens: 15_000, tokens_per_task: 200 },
		flush: Flush { project: "default".to_string(), shard_tokens: 200 },
		storage: Storage { max_messages: 0, max_memory_shards: 0, seed_sample_data: false },
		client: Client {
			server_url: "http://127.0.0.1:0".to_string(),
			reconnect_backoff_ms: 100,
			status_poll_ms: 50,
			queue_poll_ms: 50,
			pipeline_poll_ms: 50,
			terminal_tail: 8,
		},
	}
}

/// An axum app served on an ephemeral loopback port for the lifetime of the value.
pub struct TestServer {
	addr: SocketAddr,
	handle: JoinHandle<()>,
}
impl TestServer {
	pub async fn spawn(app: Router) -> Result<Self> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, app).await {
				eprintln!("Test server stopped: {err}.");
			}
		});

		Ok(Self { addr, handle })
	}

	pub fn http_url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn ws_url(&self) -> String {
		format!("ws://{}/ws", self.addr)
	}

	/// Client section pointing at this server.
	pub fn client_config(&self) -> Client {
		Client { server_url: self.http_url(), ..test_config().client }
	}
}
impl Drop for TestServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}
