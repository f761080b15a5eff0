//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems.
//!
//! Implementations of these traits live in infrastructure crates
//! (see `tonebridge-llm`).

pub mod services;

// Re-exports
pub use services::*;
