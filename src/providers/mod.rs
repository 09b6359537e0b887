pub mod editor;
pub mod notifier;
