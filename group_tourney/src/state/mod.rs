//! Canonical tournament state and its snapshots.
//!
//! [`TournamentState`] owns groups, slots, people and matches. Every mutation
//! goes through one of its transition methods, which either apply fully or
//! return an error and leave the state untouched. [`TournamentState::snapshot`]
//! renders the complete immutable view sent to viewers.

pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::TournamentState;
