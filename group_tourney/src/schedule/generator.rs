//! Expands pairing tables into the ordered match list.

use super::{
    Match, MatchId,
    tables::{CROSS_MINI_ROUNDS, INTERNAL_MINI_ROUNDS, circle_pairings},
};
use crate::slots::{GroupId, Role};

/// Hands out sequential match ids in push order.
struct ScheduleBuilder {
    next_id: MatchId,
    matches: Vec<Match>,
}

impl ScheduleBuilder {
    fn new() -> Self {
        Self {
            next_id: 1,
            matches: Vec::new(),
        }
    }

    fn push(
        &mut self,
        (round, instance, mini_round, room): (u8, u8, u8, u8),
        side1: (GroupId, Role),
        side2: (GroupId, Role),
    ) {
        let id = self.next_id;
        self.next_id += 1;
        self.matches
            .push(Match::new(id, round, instance, mini_round, room, side1, side2));
    }
}

/// Build every match, ids from 1 in round, instance, mini-round, room order.
///
/// Deterministic: repeated calls return identical lists.
pub fn generate() -> Vec<Match> {
    let rounds = circle_pairings();
    let mut builder = ScheduleBuilder::new();

    for (round_idx, pairings) in rounds.iter().enumerate() {
        let round = round_idx as u8 + 1;
        for (instance_idx, &(group1, group2)) in pairings.iter().enumerate() {
            let instance = instance_idx as u8 + 1;
            for (mini_idx, rooms) in CROSS_MINI_ROUNDS.iter().enumerate() {
                for (room_idx, &(role1, role2)) in rooms.iter().enumerate() {
                    builder.push(
                        (round, instance, mini_idx as u8 + 1, room_idx as u8 + 1),
                        (group1, role1),
                        (group2, role2),
                    );
                }
            }
        }
    }

    // The final round replays the last pairing as two internal sub-tournaments
    if let Some(last) = rounds.last() {
        let round = rounds.len() as u8 + 1;
        for (instance_idx, &(first, second)) in last.iter().enumerate() {
            let instance = instance_idx as u8 + 1;
            for (mini_idx, pairs) in INTERNAL_MINI_ROUNDS.iter().enumerate() {
                let mut room = 0;
                for group in [first, second] {
                    for &(role1, role2) in pairs {
                        room += 1;
                        builder.push(
                            (round, instance, mini_idx as u8 + 1, room),
                            (group, role1),
                            (group, role2),
                        );
                    }
                }
            }
        }
    }

    log::debug!("Generated schedule with {} matches", builder.matches.len());
    builder.matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_count() {
        // 7 rounds × 4 instances × 16 cross matches + 4 instances × 12 internal
        assert_eq!(generate().len(), 7 * 4 * 16 + 4 * 12);
    }

    #[test]
    fn test_ids_are_sequential() {
        for (i, m) in generate().iter().enumerate() {
            assert_eq!(m.id, i as MatchId + 1);
        }
    }

    #[test]
    fn test_first_and_last_matches() {
        let matches = generate();

        let first = &matches[0];
        assert_eq!(
            (first.round, first.instance, first.mini_round, first.room),
            (1, 1, 1, 1)
        );
        assert_eq!(first.group1_id, GroupId::new(1).unwrap());
        assert_eq!(first.group2_id, GroupId::new(8).unwrap());
        assert_eq!((first.role1, first.role2), (Role::A, Role::B));

        // Round 8, instance 4 is G5/G6; last room is G6 playing B vs C
        let last = matches.last().unwrap();
        assert_eq!(
            (last.round, last.instance, last.mini_round, last.room),
            (8, 4, 3, 4)
        );
        assert_eq!(last.group1_id, GroupId::new(6).unwrap());
        assert!(last.is_internal());
        assert_eq!((last.role1, last.role2), (Role::B, Role::C));
    }

    #[test]
    fn test_round_eight_rooms_split_by_group() {
        let matches = generate();
        let round8: Vec<&Match> = matches.iter().filter(|m| m.round == 8).collect();
        assert_eq!(round8.len(), 48);

        // Instance 1 replays G1-G2: rooms 1-2 are G1, rooms 3-4 are G2
        for m in round8.iter().filter(|m| m.instance == 1) {
            let expected = if m.room <= 2 { 1 } else { 2 };
            assert_eq!(m.group1_id.number(), expected);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(), generate());
    }
}
