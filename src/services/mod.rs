pub mod command;
pub mod fetcher;
pub mod formatter;
