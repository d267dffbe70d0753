use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{MessageStatus, Priority, Recipient};

/// A message composed for a care-team member. Messages are only ever
/// recorded locally as sent; nothing is transmitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub recipient: Recipient,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub priority: Priority,
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default)]
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_persisted_message() {
        let msg: Message = serde_json::from_str(
            r#"{"recipient":"dietitian","subject":"Diet and Nutrition",
                "message":"Is oatmeal ok?","priority":"urgent","id":3,
                "timestamp":"2025-03-14T10:00:00Z","status":"sent","read":false}"#,
        )
        .unwrap();
        assert_eq!(msg.recipient, Recipient::Dietitian);
        assert_eq!(msg.priority, Priority::Urgent);
        assert_eq!(msg.status, MessageStatus::Sent);
        assert!(!msg.read);
    }
}
