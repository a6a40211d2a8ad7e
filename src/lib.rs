//! mailscore — inbound-email sentiment pipeline.

pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod pipeline;
pub mod sentiment;
pub mod store;
