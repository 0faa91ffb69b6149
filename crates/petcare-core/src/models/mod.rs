//! Domain models for the petcare system.

mod log;
mod medication;
mod occurrence;
mod pet;
mod task;

pub use log::*;
pub use medication::*;
pub use occurrence::*;
pub use pet::*;
pub use task::*;
