use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoglinkError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("service error: status {status_code}")]
    Service {
        status_code: u16,
        message: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, LoglinkError>;

impl LoglinkError {
    /// Short text for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(detail) => format!("❌ {detail}"),
            Self::Service {
                status_code,
                message,
            } => {
                let mut text = format!(
                    "❌ There was an error fetching your data from LogLink. Error code was {status_code}."
                );
                if let Some(message) = message.as_deref().filter(|m| !m.trim().is_empty()) {
                    text.push(' ');
                    text.push_str(message);
                }
                text
            }
            Self::Transport(detail) => format!("❌ Could not reach LogLink: {detail}"),
            Self::MalformedResponse(detail) => {
                format!("❌ LogLink sent a response that could not be read: {detail}")
            }
            Self::Serialization(detail) | Self::Runtime(detail) => format!("❌ {detail}"),
        }
    }
}
