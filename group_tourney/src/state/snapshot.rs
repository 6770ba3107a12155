//! Full serialized tournament view.

use crate::{
    roster::Person,
    schedule::Match,
    scoreboard::ScoreboardEntry,
    slots::{Group, Slot},
};
use serde::{Deserialize, Serialize};

/// Everything a viewer needs, rebuilt after every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub groups: Vec<Group>,
    pub slots: Vec<Slot>,
    pub people: Vec<Person>,
    pub matches: Vec<Match>,
    pub scoreboard: Vec<ScoreboardEntry>,
}
