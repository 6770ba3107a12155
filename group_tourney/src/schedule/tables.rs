//! Fixed pairing tables the schedule is expanded from.

use crate::{
    constants::{ROLE_COUNT, ROOMS_PER_MINI_ROUND},
    slots::{GroupId, Role},
};

/// Cross-group mini-rounds for round-robin rounds. Each entry is
/// `(side 1 role, side 2 role)` in room order.
///
/// Minis 1-3 rotate through every distinct-role combination; mini 4 pits
/// each role against the same role.
pub const CROSS_MINI_ROUNDS: [[(Role, Role); ROOMS_PER_MINI_ROUND]; ROLE_COUNT] = [
    [(Role::A, Role::B), (Role::B, Role::C), (Role::C, Role::D), (Role::D, Role::A)],
    [(Role::A, Role::C), (Role::B, Role::D), (Role::C, Role::A), (Role::D, Role::B)],
    [(Role::A, Role::D), (Role::B, Role::A), (Role::C, Role::B), (Role::D, Role::C)],
    [(Role::A, Role::A), (Role::B, Role::B), (Role::C, Role::C), (Role::D, Role::D)],
];

/// Internal mini-rounds for the final round. Each mini splits a group's four
/// roles into two matches; the A-vs-A pairing never appears.
pub const INTERNAL_MINI_ROUNDS: [[(Role, Role); 2]; 3] = [
    [(Role::A, Role::B), (Role::C, Role::D)],
    [(Role::A, Role::C), (Role::B, Role::D)],
    [(Role::A, Role::D), (Role::B, Role::C)],
];

/// Round-robin pairings by the circle method.
///
/// The first group stays fixed while the rest rotate one position per round;
/// position `i` plays position `n - 1 - i`. For 8 groups this yields 7 rounds
/// of 4 disjoint pairings, starting with `G1-G8, G2-G7, G3-G6, G4-G5`.
pub fn circle_pairings() -> Vec<Vec<(GroupId, GroupId)>> {
    let mut ring: Vec<GroupId> = GroupId::all().collect();
    let n = ring.len();
    let mut rounds = Vec::with_capacity(n.saturating_sub(1));

    for _ in 1..n {
        rounds.push((0..n / 2).map(|i| (ring[i], ring[n - 1 - i])).collect());
        ring[1..].rotate_right(1);
    }

    rounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(round: &[(GroupId, GroupId)]) -> Vec<(u8, u8)> {
        round.iter().map(|(a, b)| (a.number(), b.number())).collect()
    }

    #[test]
    fn test_circle_pairings_match_published_table() {
        let rounds = circle_pairings();
        assert_eq!(rounds.len(), 7);
        assert_eq!(pairs(&rounds[0]), vec![(1, 8), (2, 7), (3, 6), (4, 5)]);
        assert_eq!(pairs(&rounds[1]), vec![(1, 7), (8, 6), (2, 5), (3, 4)]);
        assert_eq!(pairs(&rounds[3]), vec![(1, 5), (6, 4), (7, 3), (8, 2)]);
        assert_eq!(pairs(&rounds[6]), vec![(1, 2), (3, 8), (4, 7), (5, 6)]);
    }

    #[test]
    fn test_internal_minis_cover_each_group_once() {
        for mini in INTERNAL_MINI_ROUNDS {
            let mut roles: Vec<Role> = mini.iter().flat_map(|&(a, b)| [a, b]).collect();
            roles.sort();
            assert_eq!(roles, Role::ALL.to_vec());
        }
    }
}
