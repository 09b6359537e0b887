use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{mask_token, RelayConfig};
use crate::domains::message::{FetchRequest, FetchResponse, PendingMessages};
use crate::error::{LoglinkError, Result};
use crate::interfaces::relay::MessageSource;

/// Pulls the pending message batch for a user from the relay service.
pub struct MessageFetcher {
    endpoint: String,
    client: reqwest::Client,
}

impl MessageFetcher {
    pub fn new(relay: &RelayConfig) -> Result<Self> {
        relay.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(relay.connect_timeout_seconds()))
            .timeout(Duration::from_secs(relay.timeout_seconds()))
            .build()
            .map_err(|e| LoglinkError::Runtime(e.to_string()))?;
        Ok(Self {
            endpoint: relay.endpoint(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_success(body: &str) -> Result<FetchResponse> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| LoglinkError::Transport(format!("response body is not JSON: {e}")))?;
        let pending: PendingMessages = serde_json::from_value(value)
            .map_err(|e| LoglinkError::MalformedResponse(e.to_string()))?;
        Ok(FetchResponse::Success {
            messages: pending.into_messages(),
        })
    }

    fn parse_failure(status_code: u16, body: &str) -> FetchResponse {
        let service_message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            });
        FetchResponse::Failure {
            status_code,
            service_message,
        }
    }
}

#[async_trait]
impl MessageSource for MessageFetcher {
    async fn fetch(&self, user_id: &str) -> Result<FetchResponse> {
        let request = FetchRequest::new(user_id);
        info!(
            endpoint = %self.endpoint,
            user_id = %mask_token(user_id),
            plugin_version = %request.plugin_version,
            "fetching new messages"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e: reqwest::Error| LoglinkError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e: reqwest::Error| LoglinkError::Transport(e.to_string()))?;
        info!(endpoint = %self.endpoint, status = %status.as_u16(), "relay responded");

        if status == StatusCode::OK {
            let result = Self::parse_success(&body);
            if let Ok(FetchResponse::Success { messages }) = &result {
                debug!(count = messages.len(), "decoded message batch");
            }
            result
        } else {
            warn!(status = %status.as_u16(), "relay returned an error status");
            debug!(body = %body, "relay failure payload");
            Ok(Self::parse_failure(status.as_u16(), &body))
        }
    }
}
