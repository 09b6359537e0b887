use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::domains::message::{FormattedBlock, Message};

const HEADER_PREFIX: &str = "Inserted from [[LogLink]] on ";

// en-US locale rendering, e.g. "3/7/2024, 9:05:03 PM".
const LOCALIZED_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period case:upper]"
);

pub fn localized_timestamp(timestamp: &OffsetDateTime) -> String {
    timestamp
        .format(LOCALIZED_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Render a fetched batch as a header line plus one bullet per message.
pub fn format_block(messages: &[Message], timestamp: OffsetDateTime) -> FormattedBlock {
    let mut text = format!("{HEADER_PREFIX}{}:\n", localized_timestamp(&timestamp));
    for message in messages {
        text.push_str("- ");
        text.push_str(message);
        text.push('\n');
    }
    FormattedBlock::new(text)
}
