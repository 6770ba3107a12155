//! Tournament state aggregate and its transition methods.

use super::snapshot::Snapshot;
use crate::{
    assignment::GroupRandomizer,
    constants::MAX_NAME_LEN,
    errors::{TournamentError, TournamentResult},
    roster::{Person, PersonId, Roster, normalize_name},
    schedule::{MatchId, Schedule, Winner},
    scoreboard,
    slots::{Group, GroupId, SlotGrid},
};
use rand::Rng;

/// Single owned tournament state
///
/// Privilege checks happen before these methods are reached; every method
/// here assumes the caller is allowed to make the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentState {
    groups: Vec<Group>,
    slots: SlotGrid,
    roster: Roster,
    schedule: Schedule,
}

impl TournamentState {
    /// Fresh state: default group names, empty slots and roster, full
    /// undecided schedule.
    pub fn new() -> Self {
        Self {
            groups: Group::defaults(),
            slots: SlotGrid::new(),
            roster: Roster::new(),
            schedule: Schedule::generate(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn slots(&self) -> &SlotGrid {
        &self.slots
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Rename a group. The name is stored as given, bounded in length;
    /// blank names are rejected.
    pub fn rename_group(&mut self, group_id: GroupId, name: &str) -> TournamentResult<()> {
        if name.trim().is_empty() {
            return Err(TournamentError::Validation("group name is blank".to_string()));
        }
        let name: String = name.chars().take(MAX_NAME_LEN).collect();
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(TournamentError::GroupNotFound(group_id))?;
        group.name = name;
        Ok(())
    }

    /// Append a person with every flag cleared.
    pub fn add_person(&mut self, name: &str) -> TournamentResult<PersonId> {
        let name = normalize_name(name)
            .ok_or_else(|| TournamentError::Validation("person name is blank".to_string()))?;
        Ok(self.roster.add(name))
    }

    /// Remove a person and empty every slot they held.
    pub fn delete_person(&mut self, person_id: PersonId) -> TournamentResult<Person> {
        let person = self
            .roster
            .remove(person_id)
            .ok_or(TournamentError::PersonNotFound(person_id))?;
        let cleared = self.slots.clear_person(person_id);
        log::debug!("Deleted person {person_id}, cleared {cleared} slot(s)");
        Ok(person)
    }

    /// Set referee/captain flags; captain is dropped unless referee.
    pub fn update_person_flags(
        &mut self,
        person_id: PersonId,
        is_referee: bool,
        is_captain: bool,
    ) -> TournamentResult<()> {
        self.person_mut(person_id)?.set_flags(is_referee, is_captain);
        Ok(())
    }

    pub fn set_person_selected(
        &mut self,
        person_id: PersonId,
        is_selected: bool,
    ) -> TournamentResult<()> {
        self.person_mut(person_id)?.is_selected = is_selected;
        Ok(())
    }

    /// Append the synthetic 40-person test roster.
    pub fn add_test_people(&mut self) -> Vec<PersonId> {
        self.roster.add_test_people()
    }

    /// Empty the roster and every slot.
    pub fn clear_people(&mut self) {
        self.roster.clear();
        self.slots.clear_all();
    }

    /// Reshuffle every slot from the selected roster.
    ///
    /// Validation runs first; the grid is only cleared and refilled once a
    /// full draw has succeeded, so a failed call changes nothing.
    pub fn randomize_groups<R: Rng>(
        &mut self,
        randomizer: &mut GroupRandomizer<R>,
    ) -> TournamentResult<()> {
        let assignment = randomizer.draw(&self.roster, &self.slots)?;
        assignment.apply(&mut self.slots);
        Ok(())
    }

    /// Clear results and slots, strip captain status, keep referees and the
    /// roster.
    pub fn reset_tournament(&mut self) {
        self.schedule.reset_results();
        self.slots.clear_all();
        self.roster.strip_captains();
    }

    /// Record or clear one match result.
    pub fn set_match_winner(&mut self, match_id: MatchId, winner: Winner) -> TournamentResult<()> {
        self.schedule.record(match_id, winner)
    }

    /// Complete view with a freshly derived scoreboard.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            groups: self.groups.clone(),
            slots: self.slots.as_slice().to_vec(),
            people: self.roster.as_slice().to_vec(),
            matches: self.schedule.as_slice().to_vec(),
            scoreboard: scoreboard::compute(&self.schedule, &self.slots, &self.roster),
        }
    }

    fn person_mut(&mut self, person_id: PersonId) -> TournamentResult<&mut Person> {
        self.roster
            .get_mut(person_id)
            .ok_or(TournamentError::PersonNotFound(person_id))
    }
}

impl Default for TournamentState {
    fn default() -> Self {
        Self::new()
    }
}
