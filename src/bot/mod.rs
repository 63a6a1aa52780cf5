//! Bot layer - Discord-specific interface, event handlers, and commands
//!
//! This module connects the framework-agnostic ghost ping logic in [`crate::core`]
//! to Discord through poise and serenity.

/// Poise framework and serenity client setup
pub mod client;
/// Discord command implementations
pub mod commands;
/// Serenity-backed implementation of the core's Discord gateway
pub mod gateway;
/// Gateway event handlers (message tracking, ghost ping detection)
pub mod handlers;

use crate::{config::AppConfig, core::tracker::MessageTracker};
use std::sync::Arc;

/// Shared data available to all bot commands and event handlers.
#[derive(Debug)]
pub struct BotData {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Last known state of recent messages, consumed on deletion
    pub tracker: MessageTracker,
}

impl BotData {
    /// Creates a new `BotData` with a tracker sized from the configuration.
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        let tracker = MessageTracker::new(config.cache.max_messages);
        Self { config, tracker }
    }
}

pub use client::run_bot;
