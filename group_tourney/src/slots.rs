//! Groups, roles and the group × role slot grid.
//!
//! The grid is built complete at startup and never grows or shrinks; only the
//! occupant of each slot changes. Slots are stored group-major, so iteration
//! order is `G1/A, G1/B, .., G1/D, G2/A, ..`.

use crate::{
    constants::{GROUP_COUNT, ROLE_COUNT},
    roster::PersonId,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Stable group identifier, rendered as `G1`..`G8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(u8);

/// Error parsing a group identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid group id: {0}")]
pub struct ParseGroupIdError(String);

impl GroupId {
    /// Group identifier from its 1-based number, if in range.
    pub fn new(number: u8) -> Option<Self> {
        (1..=GROUP_COUNT as u8)
            .contains(&number)
            .then_some(Self(number))
    }

    /// 1-based group number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// 0-based position in the group list.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Every group in ascending order.
    pub fn all() -> impl Iterator<Item = GroupId> {
        (1..=GROUP_COUNT as u8).map(GroupId)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = ParseGroupIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('G')
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(GroupId::new)
            .ok_or_else(|| ParseGroupIdError(s.to_string()))
    }
}

impl TryFrom<String> for GroupId {
    type Error = ParseGroupIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.to_string()
    }
}

/// Position within a group. `A` is the captain slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    A,
    B,
    C,
    D,
}

impl Role {
    /// Every role in slot order.
    pub const ALL: [Role; ROLE_COUNT] = [Role::A, Role::B, Role::C, Role::D];

    /// The role reserved for referee captains.
    pub const CAPTAIN: Role = Role::A;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_captain(self) -> bool {
        self == Role::CAPTAIN
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Role::A => "A",
            Role::B => "B",
            Role::C => "C",
            Role::D => "D",
        };
        write!(f, "{letter}")
    }
}

/// A competing group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    /// Group with its default display name (`Group n`).
    pub fn with_default_name(id: GroupId) -> Self {
        Self {
            id,
            name: format!("Group {}", id.number()),
        }
    }

    /// The full group list in id order.
    pub fn defaults() -> Vec<Group> {
        GroupId::all().map(Group::with_default_name).collect()
    }
}

/// One addressable (group, role) position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub group_id: GroupId,
    pub role: Role,
    pub occupant_id: Option<PersonId>,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.occupant_id.is_none()
    }
}

/// Fixed grid of `GROUP_COUNT × ROLE_COUNT` slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    slots: Vec<Slot>,
}

impl SlotGrid {
    /// Build the complete, empty grid.
    pub fn new() -> Self {
        let slots = GroupId::all()
            .flat_map(|group_id| {
                Role::ALL.into_iter().map(move |role| Slot {
                    group_id,
                    role,
                    occupant_id: None,
                })
            })
            .collect();

        Self { slots }
    }

    fn position(group_id: GroupId, role: Role) -> usize {
        group_id.index() * ROLE_COUNT + role.index()
    }

    /// Slot for a (group, role) pair. Every valid pair has exactly one slot.
    pub fn slot_for(&self, group_id: GroupId, role: Role) -> &Slot {
        &self.slots[Self::position(group_id, role)]
    }

    /// Occupant of a (group, role) slot, if any.
    pub fn occupant(&self, group_id: GroupId, role: Role) -> Option<PersonId> {
        self.slot_for(group_id, role).occupant_id
    }

    pub fn set_occupant(&mut self, group_id: GroupId, role: Role, person_id: Option<PersonId>) {
        self.slots[Self::position(group_id, role)].occupant_id = person_id;
    }

    /// Empty every slot.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            slot.occupant_id = None;
        }
    }

    /// Empty every slot held by `person_id`, returning how many were cleared.
    pub fn clear_person(&mut self, person_id: PersonId) -> usize {
        let mut cleared = 0;
        for slot in &mut self.slots {
            if slot.occupant_id == Some(person_id) {
                slot.occupant_id = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots with an occupant.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Number of captain-role slots.
    pub fn captain_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.role.is_captain()).count()
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SLOT_COUNT;

    fn g(n: u8) -> GroupId {
        GroupId::new(n).unwrap()
    }

    #[test]
    fn test_group_id_round_trips_through_text() {
        assert_eq!(g(3).to_string(), "G3");
        assert_eq!("G8".parse::<GroupId>().unwrap(), g(8));
        assert!("G0".parse::<GroupId>().is_err());
        assert!("G9".parse::<GroupId>().is_err());
        assert!("3".parse::<GroupId>().is_err());
    }

    #[test]
    fn test_group_id_serializes_as_label() {
        let json = serde_json::to_string(&g(5)).unwrap();
        assert_eq!(json, "\"G5\"");
        let back: GroupId = serde_json::from_str("\"G5\"").unwrap();
        assert_eq!(back, g(5));
        assert!(serde_json::from_str::<GroupId>("\"G42\"").is_err());
    }

    #[test]
    fn test_grid_has_one_slot_per_group_and_role() {
        let grid = SlotGrid::new();
        assert_eq!(grid.len(), SLOT_COUNT);
        assert_eq!(grid.captain_slot_count(), GROUP_COUNT);

        for group_id in GroupId::all() {
            for role in Role::ALL {
                let slot = grid.slot_for(group_id, role);
                assert_eq!(slot.group_id, group_id);
                assert_eq!(slot.role, role);
                assert!(slot.is_empty());
            }
        }
    }

    #[test]
    fn test_grid_iterates_group_major() {
        let grid = SlotGrid::new();
        let first: Vec<(GroupId, Role)> =
            grid.iter().take(5).map(|s| (s.group_id, s.role)).collect();
        assert_eq!(
            first,
            vec![
                (g(1), Role::A),
                (g(1), Role::B),
                (g(1), Role::C),
                (g(1), Role::D),
                (g(2), Role::A),
            ]
        );
    }

    #[test]
    fn test_clear_person_only_touches_their_slots() {
        let mut grid = SlotGrid::new();
        grid.set_occupant(g(1), Role::A, Some(7));
        grid.set_occupant(g(4), Role::C, Some(7));
        grid.set_occupant(g(2), Role::B, Some(9));

        assert_eq!(grid.clear_person(7), 2);
        assert_eq!(grid.occupant(g(1), Role::A), None);
        assert_eq!(grid.occupant(g(4), Role::C), None);
        assert_eq!(grid.occupant(g(2), Role::B), Some(9));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_default_group_names() {
        let groups = Group::defaults();
        assert_eq!(groups.len(), GROUP_COUNT);
        assert_eq!(groups[0].name, "Group 1");
        assert_eq!(groups[7].id, g(8));
    }
}
