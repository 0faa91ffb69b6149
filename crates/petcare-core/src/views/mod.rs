//! Read-path projections consumed by the presentation layer.
//!
//! Every function here takes a [`Snapshot`](crate::store::Snapshot) and
//! the caller's notion of "now"/"today" explicitly, computes fresh
//! view-models, and never touches storage.

mod calendar;
mod daily;
mod history;

pub use calendar::*;
pub use daily::*;
pub use history::*;
