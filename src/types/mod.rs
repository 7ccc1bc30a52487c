//! Type definitions

pub mod trip;

pub use trip::*;
