//! Foundation utilities shared by every runtime subsystem
//!
//! Math types, logging setup, and frame timing. Nothing in here knows about
//! scenes or particles.

pub mod logging;
pub mod math;
pub mod time;
