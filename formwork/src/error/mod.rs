//! Error types

mod config;
mod rule;

pub use config::*;
pub use rule::*;
