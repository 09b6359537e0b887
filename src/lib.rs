pub mod client;
pub mod config;
pub mod config_store;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod logging;
pub mod providers;
pub mod services;

/// Client build reported to the relay with every fetch.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ABOUT: &str = "LogLink is a service that allows you to send messages to your notes from Telegram.";
pub const SETUP_URL: &str = "https://loglink.it";

pub use crate::client::Loglink;
pub use crate::config::{Config, RelayConfig, Settings};
pub use crate::domains::message::{FetchRequest, FetchResponse, FormattedBlock, Message};
pub use crate::error::{LoglinkError, Result};
pub use crate::services::command::{fetch_and_format, EditorCommand};
pub use crate::services::fetcher::MessageFetcher;
pub use crate::services::formatter::format_block;
