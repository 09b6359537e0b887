use std::sync::Arc;

use tracing::info;

use crate::config::{RelayConfig, Settings};
use crate::error::Result;
use crate::interfaces::notifier::Notifier;
use crate::interfaces::relay::MessageSource;
use crate::interfaces::settings::{SettingsStore, TokenProvider};
use crate::services::command::EditorCommand;
use crate::services::fetcher::MessageFetcher;

/// Wires settings, the relay fetcher and the editor command together.
pub struct Loglink {
    store: Arc<dyn SettingsStore>,
    source: Arc<dyn MessageSource>,
    token_override: Option<String>,
}

impl Loglink {
    pub fn new(store: Arc<dyn SettingsStore>, relay: &RelayConfig) -> Result<Self> {
        let source = Arc::new(MessageFetcher::new(relay)?);
        Ok(Self::with_source(store, source))
    }

    pub fn with_source(store: Arc<dyn SettingsStore>, source: Arc<dyn MessageSource>) -> Self {
        Self {
            store,
            source,
            token_override: None,
        }
    }

    /// Use `token` for this session instead of the stored one.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.token_override = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn settings(&self) -> Result<Settings> {
        self.store.load()
    }

    /// Surrounding whitespace is dropped before the token is saved.
    pub fn set_token(&self, token: &str) -> Result<Settings> {
        let mut settings = self.store.load()?;
        settings.token = token.trim().to_string();
        self.store.save(&settings)?;
        info!(token = %settings.masked_token(), "token saved");
        Ok(settings)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.set_token("").map(|_| ())
    }

    pub fn command(&self, notifier: Arc<dyn Notifier>) -> Result<EditorCommand> {
        let tokens: Arc<dyn TokenProvider> = match &self.token_override {
            Some(token) => Arc::new(Settings {
                token: token.clone(),
            }),
            None => Arc::new(self.store.load()?),
        };
        Ok(EditorCommand::new(tokens, self.source.clone(), notifier))
    }
}
