//! Keepmap Core - Fundamental types and utilities

mod error;
mod positions;

pub use error::*;
pub use positions::*;
