//! Randomized group assignment under the captain-slot constraint.

use crate::{
    errors::{TournamentError, TournamentResult},
    roster::{PersonId, Roster},
    slots::{GroupId, Role, SlotGrid},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::HashSet;

/// One person placed into one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub group_id: GroupId,
    pub role: Role,
    pub person_id: PersonId,
}

/// A complete drawn assignment, not yet written to the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    placements: Vec<Placement>,
}

impl Assignment {
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Overwrite the grid: every slot is cleared, then the placements filled in.
    pub fn apply(&self, grid: &mut SlotGrid) {
        grid.clear_all();
        for placement in &self.placements {
            grid.set_occupant(placement.group_id, placement.role, Some(placement.person_id));
        }
    }
}

/// Shuffles selected people into slots
///
/// Captain-role slots are drawn from selected referee captains; every other
/// slot from the remaining selected people. Both pools use an unbiased
/// Fisher–Yates shuffle.
pub struct GroupRandomizer<R = StdRng> {
    rng: R,
}

impl GroupRandomizer {
    /// Randomizer seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for GroupRandomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GroupRandomizer<R> {
    /// Randomizer over a caller-supplied generator
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw an assignment for `grid` from the selected part of `roster`.
    ///
    /// # Errors
    ///
    /// * `InsufficientPlayers` - fewer selected people than slots
    /// * `InsufficientCaptains` - fewer selected referee captains than
    ///   captain-role slots
    ///
    /// Nothing is written on failure; the caller applies the result.
    pub fn draw(&mut self, roster: &Roster, grid: &SlotGrid) -> TournamentResult<Assignment> {
        let selected: Vec<_> = roster.selected().collect();
        if selected.len() < grid.len() {
            return Err(TournamentError::InsufficientPlayers {
                needed: grid.len(),
                current: selected.len(),
            });
        }

        let captain_slots = grid.captain_slot_count();
        let mut captains: Vec<PersonId> = selected
            .iter()
            .filter(|p| p.is_captain_eligible())
            .map(|p| p.id)
            .collect();
        if captains.len() < captain_slots {
            return Err(TournamentError::InsufficientCaptains {
                needed: captain_slots,
                current: captains.len(),
            });
        }

        captains.shuffle(&mut self.rng);
        captains.truncate(captain_slots);

        // Eligible captains that were not drawn join the general pool
        let chosen: HashSet<PersonId> = captains.iter().copied().collect();
        let mut others: Vec<PersonId> = selected
            .iter()
            .map(|p| p.id)
            .filter(|id| !chosen.contains(id))
            .collect();
        others.shuffle(&mut self.rng);

        let mut captains = captains.into_iter();
        let mut others = others.into_iter();
        let placements = grid
            .iter()
            .filter_map(|slot| {
                let next = if slot.role.is_captain() {
                    captains.next()
                } else {
                    others.next()
                };
                next.map(|person_id| Placement {
                    group_id: slot.group_id,
                    role: slot.role,
                    person_id,
                })
            })
            .collect();

        Ok(Assignment { placements })
    }
}
