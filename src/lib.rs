//! Card Advisor — conversational credit-card recommendation client.

pub mod api;
pub mod channels;
pub mod config;
pub mod conversation;
pub mod error;
pub mod intake;
pub mod presenter;
