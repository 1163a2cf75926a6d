// ABOUTME: Library root for chatpanel: re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod chat;
pub mod command;
pub mod config;
pub mod host;
pub mod panel;
pub mod prompt;
pub mod protocol;
pub mod snippet;
pub mod terminal;
