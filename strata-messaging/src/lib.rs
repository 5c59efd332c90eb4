//! Messaging and queue layer for Strata.
//!
//! Provider-agnostic contracts for outbound messages and topic queues:
//! - [`MessagingAdapter`] — notification/email/text send
//! - [`QueueAdapter`] — topic publish/subscribe
//! - [`MessagingRegistry`] / [`QueueRegistry`] — explicit alias resolution,
//!   with process-wide convenience accessors for the composition layer
//! - [`MockMessagingAdapter`] / [`MockQueueAdapter`] — in-memory references
//!
//! Records pass through these adapters as plain value containers only.

mod adapter;
mod error;
mod mock;
mod registry;

pub use adapter::{
    Message, MessageChannel, MessageReceipt, MessagingAdapter, QueueAdapter, QueueHandler,
    Recipient,
};
pub use error::{MessagingError, MessagingResult, QueueError, QueueResult};
pub use mock::{MockMessagingAdapter, MockQueueAdapter, SentMessage};
pub use registry::{
    add_messager, add_queue, get_messager, get_queue, MessagingRegistry, QueueRegistry,
};
