//! # Group Tourney
//!
//! Coordination core for an eight-group, four-role round-robin tournament.
//!
//! The crate generates a fixed match schedule, assigns people to group slots
//! under a captain constraint, derives a live scoreboard from match results
//! and keeps every connected viewer in sync with one authoritative state.
//!
//! ## Core Modules
//!
//! - [`schedule`]: Deterministic match list (circle-method pairings plus an internal final round)
//! - [`slots`]: Groups, roles and the fixed group × role slot grid
//! - [`roster`]: People and their referee/captain/selection flags
//! - [`assignment`]: Randomized slot filling with captain-only `A` slots
//! - [`scoreboard`]: Win tallies derived on demand
//! - [`state`]: The owned state aggregate and its snapshots
//! - [`sync`]: Actor that serializes events, gates privilege and broadcasts snapshots
//!
//! ## Example
//!
//! ```
//! use group_tourney::{TournamentState, schedule::Winner};
//!
//! let mut state = TournamentState::new();
//! state.add_test_people();
//! state.set_match_winner(1, Winner::Side1).unwrap();
//!
//! let snapshot = state.snapshot();
//! assert_eq!(snapshot.matches.len(), 496);
//! assert_eq!(snapshot.scoreboard.len(), 40);
//! ```

pub mod assignment;
pub mod constants;
pub mod errors;
pub mod roster;
pub mod schedule;
pub mod scoreboard;
pub mod slots;
pub mod state;
pub mod sync;

pub use assignment::GroupRandomizer;
pub use errors::{TournamentError, TournamentResult};
pub use roster::{Person, PersonId};
pub use schedule::{Match, MatchId, Schedule, Winner};
pub use slots::{Group, GroupId, Role, Slot, SlotGrid};
pub use state::{Snapshot, TournamentState};
