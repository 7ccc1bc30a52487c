//! Delivery trip route planning.
//!
//! Splits a trip's ordered delivery stops into route legs at operator-set
//! lock points, asks a directions service for travel times per leg, and
//! walks the legs sequentially to fill in estimated arrival times (optionally
//! re-ordering stops per the optimized waypoint order first).
//!
//! Persistence, email transport, and the directions backend are all behind
//! traits so callers can plug in their own and tests can run deterministic
//! fakes.

pub mod config;
pub mod services;
pub mod types;
