use crate::error::Result;

/// Editor handle the command writes into.
pub trait TextSink {
    /// Replace the current selection, or insert at the cursor when nothing is selected.
    fn replace_selection(&mut self, text: &str) -> Result<()>;
}
