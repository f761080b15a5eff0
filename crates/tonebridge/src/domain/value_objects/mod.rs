//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod mbti;

pub use mbti::*;
