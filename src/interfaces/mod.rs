pub mod editor;
pub mod notifier;
pub mod relay;
pub mod settings;
