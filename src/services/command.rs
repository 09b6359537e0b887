use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::domains::message::{FetchResponse, FormattedBlock};
use crate::error::{LoglinkError, Result};
use crate::interfaces::editor::TextSink;
use crate::interfaces::notifier::{Notice, Notifier};
use crate::interfaces::relay::MessageSource;
use crate::interfaces::settings::TokenProvider;
use crate::services::formatter::format_block;

pub const COMMAND_ID: &str = "get-data-from-loglink";
pub const COMMAND_NAME: &str = "Get data from LogLink";

const MISSING_TOKEN: &str =
    "You haven't entered a LogLink token. Please enter a token in the settings.";

pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Fetch once for `token` and render the batch stamped with `timestamp`.
///
/// A token that is empty or only whitespace counts as missing and is
/// rejected before `source` is touched.
pub async fn fetch_and_format(
    source: &dyn MessageSource,
    token: &str,
    timestamp: OffsetDateTime,
) -> Result<FormattedBlock> {
    if token.trim().is_empty() {
        return Err(LoglinkError::Config(MISSING_TOKEN.to_string()));
    }
    match source.fetch(token).await? {
        FetchResponse::Success { messages } => Ok(format_block(&messages, timestamp)),
        FetchResponse::Failure {
            status_code,
            service_message,
        } => Err(LoglinkError::Service {
            status_code,
            message: service_message,
        }),
    }
}

/// The "Get data from LogLink" editor command.
///
/// Every failure is reported through the notifier before it is returned.
pub struct EditorCommand {
    tokens: Arc<dyn TokenProvider>,
    source: Arc<dyn MessageSource>,
    notifier: Arc<dyn Notifier>,
    clock: Clock,
}

impl EditorCommand {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        source: Arc<dyn MessageSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tokens,
            source,
            notifier,
            clock: Arc::new(local_now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn id(&self) -> &'static str {
        COMMAND_ID
    }

    pub fn name(&self) -> &'static str {
        COMMAND_NAME
    }

    /// Everything except the insertion: token check, fetch, format, notices.
    pub async fn fetch_block(&self) -> Result<FormattedBlock> {
        let token = match self.tokens.token() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, command = COMMAND_ID, "could not read token");
                self.notifier.notify(&Notice::error(err.user_message()));
                return Err(err);
            }
        };
        if token.trim().is_empty() {
            self.notifier
                .notify(&Notice::error(format!("❌ {MISSING_TOKEN}")));
            return Err(LoglinkError::Config(MISSING_TOKEN.to_string()));
        }

        self.notifier
            .notify(&Notice::info("♻︎ Fetching data from LogLink..."));

        match fetch_and_format(self.source.as_ref(), &token, (self.clock)()).await {
            Ok(block) => {
                self.notifier
                    .notify(&Notice::success("✅ Data fetched from LogLink"));
                Ok(block)
            }
            Err(err) => {
                warn!(error = %err, command = COMMAND_ID, "fetch failed");
                self.notifier.notify(&Notice::error(err.user_message()));
                Err(err)
            }
        }
    }

    /// Run the command against an editor, replacing its selection with the block.
    pub async fn run(&self, sink: &mut dyn TextSink) -> Result<FormattedBlock> {
        let block = self.fetch_block().await?;
        if let Err(err) = sink.replace_selection(block.as_str()) {
            warn!(error = %err, command = COMMAND_ID, "insert failed");
            self.notifier.notify(&Notice::error(err.user_message()));
            return Err(err);
        }
        info!(command = COMMAND_ID, bytes = block.as_str().len(), "inserted block");
        Ok(block)
    }
}
