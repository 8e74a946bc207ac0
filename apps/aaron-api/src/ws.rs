use axum::{
	extract::{
		State,
		ws::{Message, WebSocket, WebSocketUpgrade},
	},
	response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};

use aaron_domain::ServerEvent;

use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
	// Subscribed before the 101 response so events that follow the handshake are delivered.
	let events = state.service.events.subscribe();

	ws.on_upgrade(move |socket| handle_socket(socket, events, state))
}

async fn handle_socket(
	socket: WebSocket,
	mut events: broadcast::Receiver<ServerEvent>,
	state: AppState,
) {
	let (mut ws_sender, mut ws_receiver) = socket.split();

	tracing::info!(
		clients = state.service.events.subscriber_count(),
		"Client connected to websocket."
	);

	let mut send_task = tokio::spawn(async move {
		loop {
			let event = match events.recv().await {
				Ok(event) => event,
				Err(RecvError::Lagged(skipped)) => {
					tracing::warn!(skipped, "Websocket client lagged; events dropped.");

					continue;
				},
				Err(RecvError::Closed) => return,
			};
			let text = match serde_json::to_string(&event) {
				Ok(text) => text,
				Err(err) => {
					tracing::error!(error = %err, kind = event.kind(), "Failed to encode event.");

					continue;
				},
			};

			if ws_sender.send(Message::Text(text.into())).await.is_err() {
				return;
			}
		}
	});
	let mut recv_task = tokio::spawn(async move {
		while let Some(result) = ws_receiver.next().await {
			match result {
				Ok(Message::Text(text)) => {
					tracing::debug!(bytes = text.len(), "Ignoring inbound websocket frame.");
				},
				Ok(Message::Close(_)) => return,
				Ok(_) => {},
				Err(err) => {
					tracing::warn!(error = %err, "Websocket read failed.");

					return;
				},
			}
		}
	});

	tokio::select! {
		_ = &mut send_task => {
			recv_task.abort();

			let _ = recv_task.await;
		},
		_ = &mut recv_task => {
			send_task.abort();

			// The event receiver lives in the send task; it must be gone before counting.
			let _ = send_task.await;
		},
	}

	tracing::info!(
		clients = state.service.events.subscriber_count(),
		"Client disconnected from websocket."
	);
}
