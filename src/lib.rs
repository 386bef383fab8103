//! # jira-commit
//!
//! Create a git commit whose message is the title and description of a Jira
//! ticket.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod jira;
pub mod prompt;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use jira::{TicketInfo, TicketKey};
