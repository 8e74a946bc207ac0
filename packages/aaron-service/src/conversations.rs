use aaron_domain::{Conversation, Message, NewConversation, NewUser, User};

use crate::{AaronService, Error, Result};

impl AaronService {
	pub async fn create_user(&self, req: NewUser) -> Result<User> {
		crate::require_non_empty("username", &req.username)?;

		Ok(self.storage.write().await.create_user(req)?)
	}

	pub async fn user(&self, id: &str) -> Result<User> {
		self.storage
			.read()
			.await
			.get_user(id)
			.ok_or_else(|| Error::NotFound { message: format!("user {id}") })
	}

	pub async fn conversations(&self, user_id: &str) -> Vec<Conversation> {
		self.storage.read().await.get_conversations(user_id)
	}

	pub async fn create_conversation(&self, req: NewConversation) -> Result<Conversation> {
		crate::require_non_empty("title", &req.title)?;

		Ok(self.storage.write().await.create_conversation(req, crate::now()))
	}

	pub async fn conversation(&self, id: &str) -> Result<Conversation> {
		self.storage
			.read()
			.await
			.get_conversation(id)
			.ok_or_else(|| Error::NotFound { message: format!("conversation {id}") })
	}

	pub async fn messages(&self, conversation_id: &str) -> Vec<Message> {
		self.storage.read().await.get_messages(conversation_id)
	}
}
