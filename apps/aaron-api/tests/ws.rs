use std::time::Duration;

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use aaron_api::{routes, state::AppState};
use aaron_domain::{AgentMode, NewMessage, Role, ServerEvent};
use aaron_testkit::TestServer;

type Socket = tokio_tungstenite::WebSocketStream<
	tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn next_event(socket: &mut Socket) -> ServerEvent {
	loop {
		let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
			.await
			.expect("Timed out waiting for a frame.")
			.expect("Socket closed.")
			.expect("Failed to read frame.");

		if let WsMessage::Text(text) = frame {
			return serde_json::from_str(&text).expect("Failed to parse event.");
		}
	}
}

#[tokio::test]
async fn message_post_is_pushed_to_connected_clients() {
	let mut config = aaron_testkit::test_config();

	config.agent.reply_delay_ms = 20;
	config.agent.idle_delay_ms = 20;

	let state = AppState::new(config);
	let server =
		TestServer::spawn(routes::router(state.clone())).await.expect("Failed to spawn server.");
	let (mut socket, _) =
		tokio_tungstenite::connect_async(server.ws_url()).await.expect("Failed to connect.");

	state
		.service
		.post_message(NewMessage {
			conversation_id: Some("default".to_string()),
			role: Role::User,
			content: "build me a dashboard".to_string(),
			metadata: None,
		})
		.await
		.expect("Failed to post message.");

	let mut kinds = Vec::new();
	let mut reply = None;

	while kinds.len() < 5 {
		let event = next_event(&mut socket).await;

		kinds.push(event.kind());

		match event {
			ServerEvent::Message { message } if message.role == Role::Assistant =>
				reply = Some(message),
			ServerEvent::StatusUpdate { status: AgentMode::Idle, current_task, .. } => {
				assert_eq!(current_task, None);
			},
			_ => {},
		}
	}

	assert_eq!(kinds, ["status_update", "message", "message", "status_update", "status_update"]);

	let reply = reply.expect("Expected an assistant reply.");

	assert_eq!(reply.conversation_id.as_deref(), Some("default"));
	assert_eq!(reply.metadata, Some(serde_json::json!({ "thinking": true })));
}

#[tokio::test]
async fn client_frames_are_ignored() {
	use futures_util::SinkExt;

	let state = AppState::new(aaron_testkit::test_config());
	let server =
		TestServer::spawn(routes::router(state.clone())).await.expect("Failed to spawn server.");
	let (mut socket, _) =
		tokio_tungstenite::connect_async(server.ws_url()).await.expect("Failed to connect.");

	socket
		.send(WsMessage::Text("{\"type\":\"ping\"}".to_string()))
		.await
		.expect("Failed to send frame.");
	state.service.flush().await.expect("Failed to flush.");

	match next_event(&mut socket).await {
		ServerEvent::FlushComplete { shards_created } => assert_eq!(shards_created, 0),
		other => panic!("Unexpected event: {other:?}."),
	}
}

#[tokio::test]
async fn closed_client_releases_its_subscription() {
	let state = AppState::new(aaron_testkit::test_config());
	let server =
		TestServer::spawn(routes::router(state.clone())).await.expect("Failed to spawn server.");
	let (mut socket, _) =
		tokio_tungstenite::connect_async(server.ws_url()).await.expect("Failed to connect.");

	assert_eq!(state.service.events.subscriber_count(), 1);

	socket.close(None).await.expect("Failed to close socket.");

	tokio::time::timeout(Duration::from_secs(5), async {
		while state.service.events.subscriber_count() != 0 {
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
	})
	.await
	.expect("Subscription was not released.");
}
