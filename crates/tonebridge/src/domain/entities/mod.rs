//! Domain Entities
//!
//! Result records produced by the domain.

mod tone_message;

pub use tone_message::*;
