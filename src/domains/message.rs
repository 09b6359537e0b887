use std::fmt;

use serde::{Deserialize, Serialize};

/// One opaque text payload pulled off the relay queue.
pub type Message = String;

/// Body of a `get_new_messages/` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub user_id: String,
    pub plugin_version: String,
}

impl FetchRequest {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            plugin_version: crate::PLUGIN_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Success {
        messages: Vec<Message>,
    },
    Failure {
        status_code: u16,
        service_message: Option<String>,
    },
}

/// Shape of a 200 response: `{"messages": {"contents": [{"contents": "..."}]}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct PendingMessages {
    pub messages: MessageBatch,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBatch {
    pub contents: Vec<MessageItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageItem {
    pub contents: String,
}

impl PendingMessages {
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
            .contents
            .into_iter()
            .map(|item| item.contents)
            .collect()
    }
}

/// Rendered text unit inserted into the document per fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock(String);

impl FormattedBlock {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormattedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormattedBlock {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
