//! Service integrations for external APIs and clients.
//!
//! This module contains the services the event handlers depend on:
//! - Chat services (Discord, via serenity)
//! - The prefix command subsystem
//! - The random source used to pick greetings
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod command;
pub mod random;
