//! Win tallies derived from match results and slot occupancy.

use crate::{
    roster::{PersonId, Roster},
    schedule::Schedule,
    slots::SlotGrid,
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashMap};

/// One ranked scoreboard line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardEntry {
    pub person_id: PersonId,
    pub name: String,
    pub wins: u32,
}

/// Rank every person by wins, then by name.
///
/// A win is credited to whoever currently occupies the winning side's slot,
/// so the board always reflects current occupancy. People with no wins are
/// still listed. Runs in O(matches + people).
pub fn compute(schedule: &Schedule, grid: &SlotGrid, roster: &Roster) -> Vec<ScoreboardEntry> {
    let mut wins: HashMap<PersonId, u32> = roster.iter().map(|p| (p.id, 0)).collect();

    for m in schedule.iter() {
        let winning_slot = if m.win1() {
            Some((m.group1_id, m.role1))
        } else if m.win2() {
            Some((m.group2_id, m.role2))
        } else {
            None
        };

        if let Some((group_id, role)) = winning_slot
            && let Some(person_id) = grid.occupant(group_id, role)
            && let Some(count) = wins.get_mut(&person_id)
        {
            *count += 1;
        }
    }

    let mut board: Vec<ScoreboardEntry> = roster
        .iter()
        .map(|p| ScoreboardEntry {
            person_id: p.id,
            name: p.name.clone(),
            wins: wins.get(&p.id).copied().unwrap_or(0),
        })
        .collect();

    board.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    board
}

/// Alphabetical name order.
///
/// Letters compare without regard to case first. Names that differ only in
/// case put the lowercase spelling first, so `alice`, `bob`, `Bob`, `Zed`
/// is already sorted. Remaining ties fall back to code point order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    let case = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();

    fold(a)
        .cmp(&fold(b))
        .then_with(|| case(a).cmp(&case(b)))
        .then_with(|| a.cmp(b))
}
