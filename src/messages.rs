//! Care-team messages. Sending records the message locally; there is no
//! transport.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, IdGenerator};
use crate::field::PersistentField;
use crate::models::{Message, MessageStatus, Priority, Recipient};
use crate::validation::{check_message_length, require_text, ValidationError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageInput {
    pub recipient: Recipient,
    pub subject: String,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageSummary {
    pub total: usize,
    /// One row per priority, in `Priority::ALL` order, zero counts included.
    pub by_priority: Vec<PriorityCount>,
}

impl MessageSummary {
    pub fn count_for(&self, priority: Priority) -> usize {
        self.by_priority
            .iter()
            .find(|row| row.priority == priority)
            .map_or(0, |row| row.count)
    }
}

pub fn send_message(
    field: &mut PersistentField<Vec<Message>>,
    input: &MessageInput,
    clock: &dyn Clock,
    ids: &IdGenerator,
) -> Result<Message, ValidationError> {
    let subject = require_text("Subject", &input.subject)?;
    let body = require_text("Message", &input.message)?;
    check_message_length(&body)?;
    let (id, timestamp) = ids.stamp(clock);

    let message = Message {
        recipient: input.recipient,
        subject,
        message: body,
        priority: input.priority,
        id,
        timestamp,
        status: MessageStatus::Sent,
        read: false,
    };

    tracing::info!(
        id,
        recipient = %message.recipient,
        priority = %message.priority,
        "Message recorded as sent"
    );
    field.prepend(message.clone());
    Ok(message)
}

pub fn summarize_messages(messages: &[Message]) -> MessageSummary {
    MessageSummary {
        total: messages.len(),
        by_priority: Priority::ALL
            .iter()
            .map(|&priority| PriorityCount {
                priority,
                count: messages.iter().filter(|m| m.priority == priority).count(),
            })
            .collect(),
    }
}
