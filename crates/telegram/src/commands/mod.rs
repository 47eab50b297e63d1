//! Command handlers for the Telegram bot
//!
//! This module contains all command handler functions organized by category:
//! - `basic`: start, help, about, stats and the fallbacks
//! - `account`: me, info
//! - `admin`: restart, logs, ban, unban

mod account;
mod admin;
mod basic;

pub use account::*;
pub use admin::*;
pub use basic::*;
