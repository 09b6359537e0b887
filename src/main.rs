#[cfg(not(test))]
use std::path::PathBuf;
#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use clap::{Parser, Subcommand};
#[cfg(not(test))]
use console::style;

#[cfg(not(test))]
use loglink::config::{Config, RelayConfig, DEFAULT_SETTINGS_PATH};
#[cfg(not(test))]
use loglink::config_store::JsonSettingsStore;
#[cfg(not(test))]
use loglink::error::Result;
#[cfg(not(test))]
use loglink::interfaces::editor::TextSink;
#[cfg(not(test))]
use loglink::interfaces::notifier::Notifier;
#[cfg(not(test))]
use loglink::providers::editor::{MarkdownFileSink, StdoutSink};
#[cfg(not(test))]
use loglink::providers::notifier::{ConsoleNotifier, DesktopNotifier};
#[cfg(not(test))]
use loglink::Loglink;
#[cfg(not(test))]
use tracing::info;

#[cfg(not(test))]
#[derive(Parser, Debug)]
#[command(name = "loglink")]
#[command(version, about = "Insert messages sent to the LogLink bot into your notes")]
struct Cli {
    /// Settings file holding the LogLink token
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Optional JSON config with `settings` and `relay` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Relay base url (defaults to the hosted service)
    #[arg(long, conflicts_with = "local")]
    base_url: Option<String>,

    /// Talk to a relay running on 127.0.0.1:5010
    #[arg(long, default_value_t = false)]
    local: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Token for this run only; the stored token is left untouched
    #[arg(long, env = "LOGLINK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[cfg(not(test))]
#[derive(Subcommand, Debug)]
enum Command {
    /// Get data from LogLink and insert it
    Fetch {
        /// Note to insert into; prints to stdout when omitted
        #[arg(long)]
        into: Option<PathBuf>,

        /// Byte offset of the cursor in the note (defaults to the end)
        #[arg(long, requires = "into")]
        at: Option<usize>,

        /// Show notices as desktop notifications
        #[arg(long, default_value_t = false)]
        desktop_notify: bool,
    },
    /// Manage the stored LogLink token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// What LogLink is and where to set it up
    About,
}

#[cfg(not(test))]
#[derive(Subcommand, Debug)]
enum TokenAction {
    /// Save the token received from the LogLink Telegram bot
    Set { token: String },
    /// Print the stored token, masked
    Show,
    /// Remove the stored token
    Clear,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> Result<()> {
    loglink::logging::init_tracing("loglink");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let relay = resolve_relay(&cli, &config);

    let token = cli.token.clone().or_else(|| {
        config
            .settings
            .as_ref()
            .filter(|settings| settings.has_token())
            .map(|settings| settings.token.clone())
    });
    let store = JsonSettingsStore::new(cli.settings.clone());
    let app = Loglink::new(Arc::new(store), &relay)?.with_token_override(token);

    match cli.command {
        Command::Fetch {
            into,
            at,
            desktop_notify,
        } => {
            let notifier: Arc<dyn Notifier> = if desktop_notify {
                Arc::new(DesktopNotifier)
            } else {
                Arc::new(ConsoleNotifier)
            };
            let command = app.command(notifier)?;
            let mut sink: Box<dyn TextSink> = match into {
                Some(path) => Box::new(MarkdownFileSink::new(path, at)),
                None => Box::new(StdoutSink),
            };
            info!(command = command.id(), "running '{}'", command.name());
            if command.run(sink.as_mut()).await.is_err() {
                std::process::exit(1);
            }
        }
        Command::Token { action } => match action {
            TokenAction::Set { token } => {
                let settings = app.set_token(&token)?;
                println!("Token saved: {}", settings.masked_token());
            }
            TokenAction::Show => {
                let settings = app.settings()?;
                if settings.has_token() {
                    println!("{}", settings.masked_token());
                } else {
                    println!("{}", style("No token set.").color256(245));
                }
            }
            TokenAction::Clear => {
                app.clear_token()?;
                println!("Token cleared.");
            }
        },
        Command::About => {
            println!("{}", style("Settings for LogLink").color256(214).bold());
            println!("{}", loglink::ABOUT);
            println!("Full instructions for setting up LogLink are available at:");
            println!("{}", style(loglink::SETUP_URL).color256(45).underlined());
        }
    }
    Ok(())
}

#[cfg(not(test))]
fn resolve_relay(cli: &Cli, config: &Config) -> RelayConfig {
    let mut relay = if cli.local {
        RelayConfig::local()
    } else {
        config.relay()
    };
    if let Some(base_url) = &cli.base_url {
        relay.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        relay.timeout_seconds = Some(timeout);
    }
    relay
}

#[cfg(test)]
fn main() {}
