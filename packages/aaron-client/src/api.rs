use reqwest::Url;
use serde::de::DeserializeOwned;

use aaron_domain::{
	ActiveContext, AgentStatus, FlushReport, MemoryShard, Message, NewMessage, StatusPipeline,
	Task, TaskQueueItem,
};

use crate::{Error, Result};

/// Thin JSON client for the HTTP endpoints the front end reads and writes.
#[derive(Clone, Debug)]
pub struct ApiClient {
	http: reqwest::Client,
	base: Url,
}
impl ApiClient {
	pub fn new(server_url: &str) -> Result<Self> {
		let base = Url::parse(server_url)
			.map_err(|_| Error::InvalidUrl { url: server_url.to_string() })?;

		Ok(Self { http: reqwest::Client::new(), base })
	}

	pub async fn agent_status(&self) -> Result<AgentStatus> {
		self.get("/api/agent/status").await
	}

	pub async fn task_queue(&self) -> Result<Vec<TaskQueueItem>> {
		self.get("/api/task-queue").await
	}

	pub async fn status_pipeline(&self) -> Result<StatusPipeline> {
		self.get("/api/status-pipeline").await
	}

	pub async fn tasks(&self) -> Result<Vec<Task>> {
		self.get("/api/tasks").await
	}

	pub async fn active_context(&self) -> Result<ActiveContext> {
		self.get("/api/context/active").await
	}

	pub async fn memory_shards(&self) -> Result<Vec<MemoryShard>> {
		self.get("/api/memory/shards").await
	}

	/// `project` is sent as a single encoded path segment, so `#`, `?` and `/` stay literal.
	pub async fn memory_shards_by_project(&self, project: &str) -> Result<Vec<MemoryShard>> {
		let mut url = self.url("/api/context/shard")?;

		url.path_segments_mut()
			.map_err(|_| Error::InvalidUrl { url: self.base.to_string() })?
			.pop_if_empty()
			.push(project);

		self.fetch(self.http.get(url)).await
	}

	pub async fn post_message(&self, message: &NewMessage) -> Result<Message> {
		let url = self.url("/api/agent/message")?;

		self.fetch(self.http.post(url).json(message)).await
	}

	pub async fn flush_context(&self) -> Result<FlushReport> {
		let url = self.url("/api/flush/trigger")?;

		self.fetch(self.http.post(url)).await
	}

	async fn get<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let url = self.url(path)?;

		self.fetch(self.http.get(url)).await
	}

	async fn fetch<T>(&self, request: reqwest::RequestBuilder) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = request.send().await?.error_for_status()?;

		Ok(response.json().await?)
	}

	fn url(&self, path: &str) -> Result<Url> {
		self.base.join(path).map_err(|_| Error::InvalidUrl { url: path.to_string() })
	}
}
