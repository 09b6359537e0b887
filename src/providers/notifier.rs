use console::{style, Term};
use notify_rust::Notification;
use tracing::{info, warn};

use crate::interfaces::notifier::{Notice, NoticeLevel, Notifier};

const APP_NAME: &str = "LogLink";

/// Prints notices to stderr so stdout stays clean for the inserted block.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let line = match notice.level {
            NoticeLevel::Info => style(&notice.text).color256(245),
            NoticeLevel::Success => style(&notice.text).color256(114).bold(),
            NoticeLevel::Error => style(&notice.text).color256(203).bold(),
        };
        let _ = Term::stderr().write_line(&line.to_string());
    }
}

/// Desktop notification popup; falls back to the log when no daemon answers.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) {
        match Notification::new()
            .appname(APP_NAME)
            .summary(APP_NAME)
            .body(&notice.text)
            .show()
        {
            Ok(_) => info!(level = ?notice.level, "desktop notice shown"),
            Err(err) => warn!(error = %err, notice = %notice.text, "desktop notice failed"),
        }
    }
}
