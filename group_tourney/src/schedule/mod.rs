//! Match schedule generation.
//!
//! The schedule is produced once from fixed tables and never regenerated:
//! - Rounds 1–7: round-robin group pairings, each expanded into 4 cross-group
//!   mini-rounds of 4 rooms
//! - Round 8: the last round's pairings replayed as internal matches, 3
//!   mini-rounds of 4 rooms (two rooms per group)
//!
//! Match ids run from 1 in round, instance, mini-round, room order.
//!
//! ## Example
//!
//! ```
//! use group_tourney::schedule::Schedule;
//!
//! let schedule = Schedule::generate();
//! assert_eq!(schedule.len(), 496);
//! assert_eq!(schedule.get(1).map(|m| m.round), Some(1));
//! ```

pub mod generator;
pub mod tables;

pub use generator::generate;

use crate::{
    errors::{TournamentError, TournamentResult},
    slots::{GroupId, Role},
};
use serde::{Deserialize, Serialize};

/// Match ID type
pub type MatchId = u64;

/// Result to record for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Side 1 won
    #[serde(rename = "p1")]
    Side1,
    /// Side 2 won
    #[serde(rename = "p2")]
    Side2,
    /// Back to undecided
    #[serde(rename = "clear")]
    Clear,
}

/// One scheduled match between two slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub round: u8,
    pub instance: u8,
    pub mini_round: u8,
    pub room: u8,
    pub group1_id: GroupId,
    pub group2_id: GroupId,
    pub role1: Role,
    pub role2: Role,
    win1: bool,
    win2: bool,
}

impl Match {
    /// Undecided match
    pub fn new(
        id: MatchId,
        round: u8,
        instance: u8,
        mini_round: u8,
        room: u8,
        (group1_id, role1): (GroupId, Role),
        (group2_id, role2): (GroupId, Role),
    ) -> Self {
        Self {
            id,
            round,
            instance,
            mini_round,
            room,
            group1_id,
            group2_id,
            role1,
            role2,
            win1: false,
            win2: false,
        }
    }

    pub fn win1(&self) -> bool {
        self.win1
    }

    pub fn win2(&self) -> bool {
        self.win2
    }

    pub fn is_decided(&self) -> bool {
        self.win1 || self.win2
    }

    /// Both sides belong to the same group.
    pub fn is_internal(&self) -> bool {
        self.group1_id == self.group2_id
    }

    /// Record or clear the result. The two flags are never both set.
    pub fn record(&mut self, winner: Winner) {
        (self.win1, self.win2) = match winner {
            Winner::Side1 => (true, false),
            Winner::Side2 => (false, true),
            Winner::Clear => (false, false),
        };
    }
}

/// The full, fixed match list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    matches: Vec<Match>,
}

impl Schedule {
    /// Build the tournament schedule from the fixed tables.
    pub fn generate() -> Self {
        Self {
            matches: generate(),
        }
    }

    /// Look up a match by id. Ids are dense from 1, so this is an index.
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.matches.get(index)
    }

    fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.matches.get_mut(index)
    }

    /// Record a result for one match.
    pub fn record(&mut self, id: MatchId, winner: Winner) -> TournamentResult<()> {
        let m = self.get_mut(id).ok_or(TournamentError::MatchNotFound(id))?;
        m.record(winner);
        Ok(())
    }

    /// Clear every result.
    pub fn reset_results(&mut self) {
        for m in &mut self.matches {
            m.record(Winner::Clear);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of matches with a recorded winner.
    pub fn decided_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_decided()).count()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::generate()
    }
}
