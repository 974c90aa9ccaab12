//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion_client;
pub mod conversation_store;
pub mod transcript_logger;
