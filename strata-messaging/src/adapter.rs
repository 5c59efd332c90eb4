//! Messaging and queue adapter contracts.

use crate::error::{MessagingResult, QueueResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Delivery channel of a sent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Notification,
    Email,
    Text,
}

/// Who a message goes to. Channel-specific addresses are optional; an
/// adapter fails when the channel it serves has no address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Message content, shared by all channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    pub body: String,
}

/// Acknowledgement returned by a send operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    pub message_id: String,
    pub channel: MessageChannel,
}

/// Abstract messaging interface: push notification, email, and text send.
#[async_trait]
pub trait MessagingAdapter: Send + Sync {
    async fn send_notification(
        &self,
        recipient: &Recipient,
        message: &Message,
    ) -> MessagingResult<MessageReceipt>;

    async fn send_email(
        &self,
        recipient: &Recipient,
        message: &Message,
    ) -> MessagingResult<MessageReceipt>;

    async fn send_text(
        &self,
        recipient: &Recipient,
        message: &Message,
    ) -> MessagingResult<MessageReceipt>;
}

/// Handler invoked for each payload published to a subscribed topic.
pub type QueueHandler = Arc<dyn Fn(&Value) + Send + Sync>;

/// Abstract topic queue interface.
#[async_trait]
pub trait QueueAdapter: Send + Sync {
    /// Publishes a payload to a topic, returning the message id.
    async fn publish(&self, topic: &str, payload: Value) -> QueueResult<String>;

    /// Registers a handler for a topic, replacing any previous one.
    fn subscribe(&self, topic: &str, handler: QueueHandler);
}
