//! newtab: a self-hosted new tab page of bookmarks with discovered favicons.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod managers;
pub mod platform;
pub mod server;
pub mod services;
pub mod types;
