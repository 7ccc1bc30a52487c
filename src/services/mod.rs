//! Business logic services

pub mod directions;
pub mod notifications;
pub mod planner;
pub mod store;
