//! Integration tests for the generated match schedule.
//!
//! These check the structural guarantees of the full 496-match list rather
//! than individual rows.

use group_tourney::{
    GroupId, Role, Schedule,
    constants::{GROUP_COUNT, ROLE_COUNT},
};
use std::collections::{BTreeMap, HashMap, HashSet};

fn cross_rounds(schedule: &Schedule) -> impl Iterator<Item = &group_tourney::Match> {
    schedule.iter().filter(|m| m.round <= 7)
}

#[test]
fn test_every_group_plays_once_per_cross_round() {
    let schedule = Schedule::generate();

    for round in 1..=7 {
        let pairs: HashSet<(u8, GroupId, GroupId)> = schedule
            .iter()
            .filter(|m| m.round == round)
            .map(|m| (m.instance, m.group1_id, m.group2_id))
            .collect();
        assert_eq!(pairs.len(), GROUP_COUNT / 2, "round {round}");

        let mut seen: HashSet<GroupId> = HashSet::new();
        for (_, g1, g2) in pairs {
            assert!(seen.insert(g1), "round {round}: {g1} twice");
            assert!(seen.insert(g2), "round {round}: {g2} twice");
        }
        assert_eq!(seen.len(), GROUP_COUNT);
    }
}

#[test]
fn test_each_pair_of_groups_meets_in_exactly_one_round() {
    let schedule = Schedule::generate();

    let mut rounds_per_pair: HashMap<(GroupId, GroupId), HashSet<u8>> = HashMap::new();
    for m in cross_rounds(&schedule) {
        let key = if m.group1_id < m.group2_id {
            (m.group1_id, m.group2_id)
        } else {
            (m.group2_id, m.group1_id)
        };
        rounds_per_pair.entry(key).or_default().insert(m.round);
    }

    assert_eq!(rounds_per_pair.len(), GROUP_COUNT * (GROUP_COUNT - 1) / 2);
    assert!(rounds_per_pair.values().all(|rounds| rounds.len() == 1));
}

#[test]
fn test_each_instance_covers_all_sixteen_role_pairs() {
    let schedule = Schedule::generate();

    let mut by_instance: BTreeMap<(u8, u8), HashSet<(Role, Role)>> = BTreeMap::new();
    let mut counts: BTreeMap<(u8, u8), usize> = BTreeMap::new();
    for m in cross_rounds(&schedule) {
        by_instance
            .entry((m.round, m.instance))
            .or_default()
            .insert((m.role1, m.role2));
        *counts.entry((m.round, m.instance)).or_default() += 1;
    }

    assert_eq!(by_instance.len(), 7 * 4);
    for (key, role_pairs) in &by_instance {
        assert_eq!(role_pairs.len(), ROLE_COUNT * ROLE_COUNT, "{key:?}");
        assert_eq!(counts[key], ROLE_COUNT * ROLE_COUNT, "{key:?}");
    }
}

#[test]
fn test_fourth_mini_round_is_same_role() {
    let schedule = Schedule::generate();

    for m in cross_rounds(&schedule) {
        if m.mini_round == 4 {
            assert_eq!(m.role1, m.role2, "match {}", m.id);
        } else {
            assert_ne!(m.role1, m.role2, "match {}", m.id);
        }
    }
}

#[test]
fn test_mini_rounds_have_one_match_per_room() {
    let schedule = Schedule::generate();

    let mut rooms: HashMap<(u8, u8, u8), Vec<u8>> = HashMap::new();
    for m in cross_rounds(&schedule) {
        rooms
            .entry((m.round, m.instance, m.mini_round))
            .or_default()
            .push(m.room);
    }

    for (key, mut list) in rooms {
        list.sort_unstable();
        assert_eq!(list, vec![1, 2, 3, 4], "{key:?}");
    }
}

#[test]
fn test_internal_round_stays_inside_groups() {
    let schedule = Schedule::generate();
    let internal: Vec<_> = schedule.iter().filter(|m| m.round == 8).collect();

    assert_eq!(internal.len(), 6 * GROUP_COUNT);

    let mut per_group: HashMap<GroupId, HashSet<(Role, Role)>> = HashMap::new();
    for m in &internal {
        assert!(m.is_internal());
        assert_eq!(m.group1_id, m.group2_id);
        assert_ne!(m.role1, m.role2, "internal matches never pit a role against itself");
        per_group.entry(m.group1_id).or_default().insert((m.role1, m.role2));
    }

    // Every group plays all six pairings of its four roles
    assert_eq!(per_group.len(), GROUP_COUNT);
    assert!(per_group.values().all(|pairs| pairs.len() == 6));
}

#[test]
fn test_internal_round_reuses_last_pairing_for_rooms() {
    let schedule = Schedule::generate();

    for m in schedule.iter().filter(|m| m.round == 8) {
        let last_cross = schedule
            .iter()
            .find(|c| {
                c.round == 7
                    && c.instance == m.instance
                    && (c.group1_id == m.group1_id || c.group2_id == m.group1_id)
            })
            .unwrap();

        let expected_rooms = if last_cross.group1_id == m.group1_id {
            [1, 2]
        } else {
            [3, 4]
        };
        assert!(expected_rooms.contains(&m.room), "match {}", m.id);
    }
}

#[test]
fn test_ids_follow_generation_order() {
    let schedule = Schedule::generate();
    let mut previous = (0, 0, 0, 0);

    for (i, m) in schedule.iter().enumerate() {
        assert_eq!(m.id, i as u64 + 1);
        let key = (m.round, m.instance, m.mini_round, m.room);
        assert!(key > previous, "match {} out of order", m.id);
        previous = key;
    }
}
