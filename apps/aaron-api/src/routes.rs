use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};

use aaron_domain::{
	ActiveContext, AgentStatus, Conversation, FlushReport, MemoryShard, Message, NewConversation,
	NewMessage, NewQueueItem, NewTask, NewUser, PipelinePatch, QueueItemPatch, StatusPipeline,
	Task, TaskPatch, TaskQueueItem, User,
};
use aaron_service::Error as ServiceError;

use crate::{state::AppState, ws};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/ws", get(ws::ws_handler))
		.route("/api/agent/status", get(agent_status))
		.route("/api/agent/message", post(post_message))
		.route("/api/context/active", get(active_context))
		.route("/api/context/shard/{project}", get(shards_by_project))
		.route("/api/flush/trigger", post(flush))
		.route("/api/tasks", get(tasks).post(create_task))
		.route("/api/tasks/{id}", get(task).patch(update_task))
		.route("/api/memory/shards", get(memory_shards))
		.route("/api/task-queue", get(task_queue).post(create_queue_item))
		.route("/api/task-queue/{id}", patch(update_queue_item))
		.route("/api/status-pipeline", get(status_pipeline).patch(update_status_pipeline))
		.route("/api/users", post(create_user))
		.route("/api/users/{id}", get(user))
		.route("/api/conversations", get(conversations).post(create_conversation))
		.route("/api/conversations/{id}", get(conversation))
		.route("/api/conversations/{id}/messages", get(messages))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn agent_status(State(state): State<AppState>) -> Json<AgentStatus> {
	Json(state.service.agent_status().await)
}

async fn post_message(
	State(state): State<AppState>,
	payload: Result<Json<NewMessage>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid message data"))?;
	let message = state.service.post_message(payload).await?;
	Ok(Json(message))
}

async fn active_context(State(state): State<AppState>) -> Json<ActiveContext> {
	Json(state.service.active_context().await)
}

async fn shards_by_project(
	State(state): State<AppState>,
	Path(project): Path<String>,
) -> Json<Vec<MemoryShard>> {
	Json(state.service.memory_shards_by_project(&project).await)
}

async fn flush(State(state): State<AppState>) -> Result<Json<FlushReport>, ApiError> {
	let report = state.service.flush().await?;
	Ok(Json(report))
}

async fn tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
	Json(state.service.tasks().await)
}

async fn task(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
	let task = state.service.task(&id).await?;
	Ok(Json(task))
}

async fn create_task(
	State(state): State<AppState>,
	payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid task data"))?;
	let task = state.service.create_task(payload).await?;
	Ok(Json(task))
}

async fn update_task(
	State(state): State<AppState>,
	Path(id): Path<String>,
	payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Failed to update task"))?;
	let task = state.service.update_task(&id, payload).await?;
	Ok(Json(task))
}

async fn memory_shards(State(state): State<AppState>) -> Json<Vec<MemoryShard>> {
	Json(state.service.memory_shards().await)
}

async fn task_queue(State(state): State<AppState>) -> Json<Vec<TaskQueueItem>> {
	Json(state.service.task_queue().await)
}

async fn create_queue_item(
	State(state): State<AppState>,
	payload: Result<Json<NewQueueItem>, JsonRejection>,
) -> Result<Json<TaskQueueItem>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid task queue data"))?;
	let item = state.service.create_queue_item(payload).await?;
	Ok(Json(item))
}

async fn update_queue_item(
	State(state): State<AppState>,
	Path(id): Path<String>,
	payload: Result<Json<QueueItemPatch>, JsonRejection>,
) -> Result<Json<TaskQueueItem>, ApiError> {
	let Json(payload) =
		payload.map_err(|_| ApiError::bad_request("Failed to update task queue item"))?;
	let item = state.service.update_queue_item(&id, payload).await?;
	Ok(Json(item))
}

async fn status_pipeline(State(state): State<AppState>) -> Json<StatusPipeline> {
	Json(state.service.status_pipeline().await)
}

async fn update_status_pipeline(
	State(state): State<AppState>,
	payload: Result<Json<PipelinePatch>, JsonRejection>,
) -> Result<Json<StatusPipeline>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid pipeline data"))?;
	Ok(Json(state.service.update_status_pipeline(payload).await))
}

async fn create_user(
	State(state): State<AppState>,
	payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid user data"))?;
	let user = state.service.create_user(payload).await?;
	Ok(Json(user))
}

async fn user(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
	let user = state.service.user(&id).await?;
	Ok(Json(user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationQuery {
	user_id: String,
}

async fn conversations(
	State(state): State<AppState>,
	query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<Json<Vec<Conversation>>, ApiError> {
	let Query(query) = query.map_err(|_| ApiError::bad_request("userId is required"))?;
	Ok(Json(state.service.conversations(&query.user_id).await))
}

async fn create_conversation(
	State(state): State<AppState>,
	payload: Result<Json<NewConversation>, JsonRejection>,
) -> Result<Json<Conversation>, ApiError> {
	let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid conversation data"))?;
	let conversation = state.service.create_conversation(payload).await?;
	Ok(Json(conversation))
}

async fn conversation(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
	let conversation = state.service.conversation(&id).await?;
	Ok(Json(conversation))
}

async fn messages(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Message>> {
	Json(state.service.messages(&id).await)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}

	fn bad_request(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, message)
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { .. } | ServiceError::Conflict { .. } =>
				Self::bad_request(err.to_string()),
			ServiceError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
			ServiceError::Internal { .. } => {
				tracing::error!(error = %err, "Request failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}
