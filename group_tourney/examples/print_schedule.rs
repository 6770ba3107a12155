//! Schedule Example
//!
//! Seeds the test roster, draws groups and prints who plays whom in the
//! first round together with a partial scoreboard.

use group_tourney::{GroupRandomizer, TournamentState, Winner};

fn main() {
    println!("=== Group Round-Robin Example ===\n");

    let mut state = TournamentState::new();
    state.add_test_people();

    let mut randomizer = GroupRandomizer::new();
    if let Err(e) = state.randomize_groups(&mut randomizer) {
        eprintln!("Could not draw groups: {e}");
        return;
    }

    println!("Groups:");
    for group in state.groups() {
        let members: Vec<String> = state
            .slots()
            .iter()
            .filter(|slot| slot.group_id == group.id)
            .map(|slot| {
                let name = slot
                    .occupant_id
                    .and_then(|id| state.roster().get(id))
                    .map_or("-", |p| p.name.as_str());
                format!("{}={}", slot.role, name)
            })
            .collect();
        println!("  {:<8} {}", group.name, members.join("  "));
    }

    println!("\nRound 1, instance 1:");
    for m in state
        .schedule()
        .iter()
        .filter(|m| m.round == 1 && m.instance == 1)
    {
        println!(
            "  #{:<3} mini {} room {}: {}/{} vs {}/{}",
            m.id, m.mini_round, m.room, m.group1_id, m.role1, m.group2_id, m.role2
        );
    }

    // Side 1 wins every odd match of the first round
    let first_round: Vec<u64> = state
        .schedule()
        .iter()
        .filter(|m| m.round == 1)
        .map(|m| m.id)
        .collect();
    for id in first_round {
        let winner = if id % 2 == 1 { Winner::Side1 } else { Winner::Side2 };
        if let Err(e) = state.set_match_winner(id, winner) {
            eprintln!("Could not record match {id}: {e}");
        }
    }

    println!("\nTop five after round 1:");
    for entry in state.snapshot().scoreboard.iter().take(5) {
        println!("  {:<12} {}", entry.name, entry.wins);
    }

    println!(
        "\n{} of {} matches decided",
        state.schedule().decided_count(),
        state.schedule().len()
    );
}
