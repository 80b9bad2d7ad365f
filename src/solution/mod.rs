//! Solution representation.
//!
//! An [`Assignment`] maps tasks to stations and workers to stations and
//! caches per-station completion times. It only changes through a
//! [`Move`], which is checked against precedence, worker capability and
//! worker uniqueness before anything is written; a rejected move leaves
//! the assignment untouched.
//!
//! Initial assignments come from [`build_initial`], a seeded randomized
//! greedy construction that is feasible by construction.

mod assignment;
mod construct;
mod moves;

pub use assignment::{Assignment, AssignmentParts};
pub use construct::{build_initial, build_initial_multi, MAX_CONSTRUCTION_ATTEMPTS};
pub use moves::Move;
