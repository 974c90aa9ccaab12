//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::Prompt`]: validated user input ready to be sent upstream
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod prompt;
