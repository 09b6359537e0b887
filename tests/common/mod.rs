#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::macros::datetime;
use time::OffsetDateTime;

use loglink::error::{LoglinkError, Result};
use loglink::interfaces::notifier::{Notice, Notifier};
use loglink::interfaces::relay::MessageSource;
use loglink::services::command::Clock;
use loglink::FetchResponse;

pub const FIXED_TIME: OffsetDateTime = datetime!(2024-03-07 21:05:03 UTC);
pub const FIXED_HEADER: &str = "Inserted from [[LogLink]] on 3/7/2024, 9:05:03 PM:\n";

pub fn fixed_clock() -> Clock {
    Arc::new(|| FIXED_TIME)
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.text).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Canned relay answer that counts how often it was asked.
pub struct StubSource {
    response: Mutex<Option<Result<FetchResponse>>>,
    calls: AtomicUsize,
    seen_tokens: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn returning(response: Result<FetchResponse>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn success(messages: &[&str]) -> Self {
        Self::returning(Ok(FetchResponse::Success {
            messages: messages.iter().map(|m| m.to_string()).collect(),
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSource for StubSource {
    async fn fetch(&self, user_id: &str) -> Result<FetchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().unwrap().push(user_id.to_string());
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(LoglinkError::Runtime("stub exhausted".to_string())))
    }
}
