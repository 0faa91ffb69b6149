//! Recurrence engine: due-status and next-due computation.
//!
//! Everything in this module is pure and synchronous. Callers pass the
//! reference day explicitly ("today" is never read from a clock here),
//! which keeps the functions deterministic and testable.

mod dates;
mod engine;

pub use dates::*;
pub use engine::*;
