//! Terminal front-end for the expenses service.
//!
//! # Overview
//! Reads one command per line, drives `expense_core::Synchronizer` through a
//! blocking ureq transport, and prints the resulting screen as plain text.

pub mod command;
pub mod logging;
pub mod render;
pub mod session;
pub mod transport;

pub use command::Command;
pub use session::Session;
pub use transport::UreqTransport;
