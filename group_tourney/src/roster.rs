//! People taking part in the tournament.

use crate::constants::{MAX_NAME_LEN, TEST_CAPTAINS, TEST_PEOPLE, TEST_REFEREES};
use serde::{Deserialize, Serialize};

/// Person ID type
pub type PersonId = u64;

/// A roster entry
///
/// `is_captain` can only be set alongside `is_referee`; [`Person::set_flags`]
/// downgrades a captain without referee status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub is_referee: bool,
    pub is_captain: bool,
    pub is_selected: bool,
}

impl Person {
    /// New person with every flag cleared
    pub fn new(id: PersonId, name: String) -> Self {
        Self {
            id,
            name,
            is_referee: false,
            is_captain: false,
            is_selected: false,
        }
    }

    /// Set referee/captain status, forcing captain off for non-referees.
    pub fn set_flags(&mut self, is_referee: bool, is_captain: bool) {
        self.is_referee = is_referee;
        self.is_captain = is_captain && is_referee;
    }

    /// May fill a captain-role slot.
    pub fn is_captain_eligible(&self) -> bool {
        self.is_referee && self.is_captain
    }
}

/// Trim a display name, reject it when blank and bound it to
/// [`MAX_NAME_LEN`] characters.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_LEN).collect())
}

/// Ordered roster with monotonically increasing ids
///
/// Ids are never reused, even after [`Roster::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
    next_id: PersonId,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            people: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> PersonId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a person with an already-normalized name.
    pub fn add(&mut self, name: String) -> PersonId {
        let id = self.allocate_id();
        self.people.push(Person::new(id, name));
        id
    }

    /// Append the synthetic test roster: `Player 1..=40`, all selected, the
    /// first ten referees and the first eight of those captains.
    pub fn add_test_people(&mut self) -> Vec<PersonId> {
        (1..=TEST_PEOPLE)
            .map(|i| {
                let id = self.allocate_id();
                let mut person = Person::new(id, format!("Player {i}"));
                person.set_flags(i <= TEST_REFEREES, i <= TEST_CAPTAINS);
                person.is_selected = true;
                self.people.push(person);
                id
            })
            .collect()
    }

    /// Remove a person, returning them if they existed.
    pub fn remove(&mut self, id: PersonId) -> Option<Person> {
        let position = self.people.iter().position(|p| p.id == id)?;
        Some(self.people.remove(position))
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.get(id).is_some()
    }

    /// Empty the roster. The id counter keeps running.
    pub fn clear(&mut self) {
        self.people.clear();
    }

    /// Drop captain status from everyone, keeping referee status.
    pub fn strip_captains(&mut self) {
        for person in &mut self.people {
            person.is_captain = false;
        }
    }

    /// Selected people in roster order.
    pub fn selected(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| p.is_selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn as_slice(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
