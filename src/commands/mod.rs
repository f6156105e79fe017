pub mod ask;
pub mod config;
pub mod format;
pub mod tui;
