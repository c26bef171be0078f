//! Event handling and user interactions for the bot.
//!
//! This module provides functionality for handling gateway events:
//! - Dispatching events from the gateway to their handlers
//! - Logging joins and leaves, and welcoming new members
//! - Routing prefixed messages to the command subsystem

pub mod dispatch;
pub mod log;
pub mod member;
pub mod message;
