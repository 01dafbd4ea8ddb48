//! Dispatch-and-delivery pipeline.
//!
//! Receives one decoded [`EventPayload`](crescendo_common::types::EventPayload)
//! per invocation and:
//! 1. Resolves the target group (and, for some event kinds, a user)
//! 2. Renders the event into a human-readable message (via [`render`])
//! 3. Pages the group's recipient roster (via [`pager`])
//! 4. Delivers page by page through a [`telegram::Messenger`], pacing between
//!    pages and isolating per-recipient failures

pub mod dispatcher;
pub mod pager;
pub mod render;
pub mod telegram;

pub use dispatcher::Dispatcher;
pub use telegram::{Messenger, TelegramClient};
