use async_trait::async_trait;

use crate::domains::message::FetchResponse;
use crate::error::Result;

/// Anything that can hand over the pending messages for a user.
///
/// `Err` is reserved for transport and decoding failures; a non-200 answer
/// from the relay is an `Ok(FetchResponse::Failure { .. })`.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<FetchResponse>;
}
