//! Core components, types, and utilities for the bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The in-memory membership event log.
//! - Outbound reply text.
//! - Common types and result handling.

pub mod config;
pub mod event_log;
pub mod replies;
pub mod types;
