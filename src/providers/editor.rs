use std::io::{ErrorKind, Write};
use std::ops::Range;
use std::path::PathBuf;

use crate::config_store::ensure_parent_dir;
use crate::error::{LoglinkError, Result};
use crate::interfaces::editor::TextSink;

/// In-memory document with a byte-range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    text: String,
    selection: Range<usize>,
}

impl BufferSink {
    /// Cursor starts at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
        }
    }

    pub fn with_cursor(text: impl Into<String>, cursor: usize) -> Result<Self> {
        Self::with_selection(text, cursor..cursor)
    }

    pub fn with_selection(text: impl Into<String>, selection: Range<usize>) -> Result<Self> {
        let text = text.into();
        if selection.start > selection.end {
            return Err(LoglinkError::Runtime(format!(
                "selection start {} is past its end {}",
                selection.start, selection.end
            )));
        }
        for offset in [selection.start, selection.end] {
            if offset > text.len() {
                return Err(LoglinkError::Runtime(format!(
                    "cursor {offset} is past the end of the document ({} bytes)",
                    text.len()
                )));
            }
            if !text.is_char_boundary(offset) {
                return Err(LoglinkError::Runtime(format!(
                    "cursor {offset} is not on a character boundary"
                )));
            }
        }
        Ok(Self { text, selection })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextSink for BufferSink {
    fn replace_selection(&mut self, text: &str) -> Result<()> {
        self.text.replace_range(self.selection.clone(), text);
        let cursor = self.selection.start + text.len();
        self.selection = cursor..cursor;
        Ok(())
    }
}

/// Writes the inserted text to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TextSink for StdoutSink {
    fn replace_selection(&mut self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| LoglinkError::Runtime(e.to_string()))
    }
}

/// Inserts into a note on disk at a byte offset, or at the end when no offset is given.
#[derive(Debug, Clone)]
pub struct MarkdownFileSink {
    path: PathBuf,
    cursor: Option<usize>,
}

impl MarkdownFileSink {
    pub fn new(path: impl Into<PathBuf>, cursor: Option<usize>) -> Self {
        Self {
            path: path.into(),
            cursor,
        }
    }
}

impl TextSink for MarkdownFileSink {
    fn replace_selection(&mut self, text: &str) -> Result<()> {
        let current = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(LoglinkError::Runtime(err.to_string())),
        };
        let cursor = self.cursor.unwrap_or(current.len());
        let mut buffer = BufferSink::with_cursor(current, cursor)?;
        buffer.replace_selection(text)?;
        ensure_parent_dir(&self.path)?;
        std::fs::write(&self.path, buffer.text())
            .map_err(|e| LoglinkError::Runtime(e.to_string()))?;
        self.cursor = Some(buffer.cursor());
        Ok(())
    }
}
