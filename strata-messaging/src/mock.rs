//! In-memory messaging and queue adapters.

use crate::adapter::{
    Message, MessageChannel, MessageReceipt, MessagingAdapter, QueueAdapter, QueueHandler,
    Recipient,
};
use crate::error::{MessagingError, MessagingResult, QueueResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// One message captured by the mock messager.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub channel: MessageChannel,
    pub recipient: Recipient,
    pub message: Message,
}

/// In-memory messaging adapter that records everything it "sends".
#[derive(Default)]
pub struct MockMessagingAdapter {
    sent: RwLock<Vec<SentMessage>>,
}

impl MockMessagingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().clone()
    }

    fn record(
        &self,
        channel: MessageChannel,
        recipient: &Recipient,
        message: &Message,
    ) -> MessageReceipt {
        self.sent.write().push(SentMessage {
            channel,
            recipient: recipient.clone(),
            message: message.clone(),
        });
        MessageReceipt {
            message_id: Uuid::new_v4().to_string(),
            channel,
        }
    }
}

#[async_trait]
impl MessagingAdapter for MockMessagingAdapter {
    async fn send_notification(
        &self,
        recipient: &Recipient,
        message: &Message,
    ) -> MessagingResult<MessageReceipt> {
        Ok(self.record(MessageChannel::Notification, recipient, message))
    }

    async fn send_email(
        &self,
        recipient: &Recipient,
        message: &Message,
    ) -> MessagingResult<MessageReceipt> {
        if recipient.email.is_none() {
            return Err(MessagingError::MissingAddress("email".to_string()));
        }
        Ok(self.record(MessageChannel::Email, recipient, message))
    }

    async fn send_text(
        &self,
        recipient: &Recipient,
        message: &Message,
    ) -> MessagingResult<MessageReceipt> {
        if recipient.phone.is_none() {
            return Err(MessagingError::MissingAddress("text".to_string()));
        }
        Ok(self.record(MessageChannel::Text, recipient, message))
    }
}

/// In-memory topic queue that dispatches to subscribed handlers on publish.
#[derive(Default)]
pub struct MockQueueAdapter {
    messages: RwLock<HashMap<String, Vec<Value>>>,
    handlers: RwLock<HashMap<String, QueueHandler>>,
}

impl MockQueueAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every payload published to a topic, in publish order.
    pub fn messages(&self, topic: &str) -> Vec<Value> {
        self.messages.read().get(topic).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl QueueAdapter for MockQueueAdapter {
    async fn publish(&self, topic: &str, payload: Value) -> QueueResult<String> {
        debug!(%topic, "publishing message");
        self.messages
            .write()
            .entry(topic.to_string())
            .or_default()
            .push(payload.clone());

        let handler = self.handlers.read().get(topic).cloned();
        if let Some(handler) = handler {
            handler(&payload);
        }
        Ok(Uuid::new_v4().to_string())
    }

    fn subscribe(&self, topic: &str, handler: QueueHandler) {
        self.handlers.write().insert(topic.to_string(), handler);
    }
}
