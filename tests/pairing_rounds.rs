use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;

use scrabble_pairings::{
    history::History,
    king_of_the_hill::pair_king_of_the_hill,
    pairing::{Pairing, PairingOptions, PairingSystem, pair_round},
    participant::Participant,
    round_robin::{cycle_length, pair_round_robin},
    swiss::{ByePolicy, SwissOptions, pair_swiss, pair_swiss_with},
    tournament::{MatchStatus, Tournament, TournamentStatus},
    validate::{check_round, rematches},
};

const SYSTEMS: [PairingSystem; 3] = [
    PairingSystem::Swiss,
    PairingSystem::RoundRobin,
    PairingSystem::KingOfTheHill,
];

fn field(records: &[(&str, f64, i64)]) -> Vec<Participant> {
    records
        .iter()
        .enumerate()
        .map(|(i, (user_id, wins, spread))| {
            Participant::new(&format!("entry-{i}"), user_id).with_record(*wins, *spread)
        })
        .collect()
}

fn unranked_field(size: usize) -> Vec<Participant> {
    (0..size)
        .map(|i| Participant::new(&format!("entry-{i}"), &format!("player-{i:02}")))
        .collect()
}

fn unordered(pairing: &Pairing) -> Option<(String, String)> {
    pairing.players().map(|(player1_id, player2_id)| {
        if player1_id < player2_id {
            (player1_id.to_string(), player2_id.to_string())
        } else {
            (player2_id.to_string(), player1_id.to_string())
        }
    })
}

fn six_players() -> Vec<Participant> {
    field(&[
        ("ana", 3.0, 40),
        ("ben", 3.0, 210),
        ("cai", 2.0, 15),
        ("dev", 2.0, 90),
        ("eli", 1.0, -60),
        ("fay", 1.0, -20),
    ])
}

/// Whether any pairing of `pool` avoids every game in `history`.
fn rematch_free_pairing_exists(pool: &[&str], history: &History) -> bool {
    let Some((first, rest)) = pool.split_first() else {
        return true;
    };

    rest.iter().enumerate().any(|(i, opponent)| {
        if history.has_played(first, opponent) {
            return false;
        }

        let remaining: Vec<_> = rest
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, user_id)| *user_id)
            .collect();

        rematch_free_pairing_exists(&remaining, history)
    })
}

#[test]
fn king_of_the_hill_pairs_the_top_two() {
    let pairings = pair_king_of_the_hill(&six_players());

    assert_eq!(
        pairings,
        vec![
            Pairing::game("ben", "ana"),
            Pairing::game("dev", "cai"),
            Pairing::game("fay", "eli"),
        ]
    );
}

#[test]
fn round_robin_first_round_has_no_byes() {
    let pairings = pair_round_robin(&six_players(), 1);

    assert_eq!(pairings.len(), 3);
    assert!(pairings.iter().all(|pairing| !pairing.is_bye));
}

#[test]
fn round_robin_rounds_share_no_pairs() {
    let participants = six_players();

    let first: FxHashSet<_> = pair_round_robin(&participants, 1)
        .iter()
        .filter_map(unordered)
        .collect();
    let second: FxHashSet<_> = pair_round_robin(&participants, 2)
        .iter()
        .filter_map(unordered)
        .collect();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert!(first.is_disjoint(&second));
}

#[test]
fn swiss_first_round_covers_everyone() -> anyhow::Result<()> {
    let participants = six_players();
    let pairings = pair_swiss(&participants, &History::new(), 1, &SwissOptions::default());

    assert_eq!(pairings.len(), 3);
    assert!(pairings.iter().all(|pairing| !pairing.is_bye));
    check_round(&participants, &pairings)?;
    Ok(())
}

#[test]
fn swiss_second_round_avoids_a_played_game() {
    let participants = six_players();
    let history = History::from_pairings(&[Pairing::game("ana", "ben")]);

    let pairings = pair_swiss(&participants, &history, 2, &SwissOptions::default());

    assert!(!pairings.iter().any(|pairing| {
        pairing.involves("ana") && pairing.involves("ben")
    }));
}

#[test]
fn swiss_odd_field_has_one_bye() -> anyhow::Result<()> {
    let participants = field(&[
        ("ana", 0.0, 0),
        ("ben", 0.0, 0),
        ("cai", 0.0, 0),
        ("dev", 0.0, 0),
        ("eli", 0.0, 0),
    ]);

    let pairings = pair_swiss(&participants, &History::new(), 1, &SwissOptions::default());

    assert_eq!(pairings.iter().filter(|pairing| pairing.is_bye).count(), 1);
    assert_eq!(pairings.iter().filter(|pairing| !pairing.is_bye).count(), 2);
    check_round(&participants, &pairings)?;
    Ok(())
}

#[test]
fn every_system_covers_every_field_size() -> anyhow::Result<()> {
    let options = PairingOptions::default();

    for size in 0..=13 {
        let participants = unranked_field(size);

        for system in SYSTEMS {
            for round in 1..=4 {
                let pairings = pair_round(&participants, &History::new(), round, system, &options);

                check_round(&participants, &pairings)?;
                assert_eq!(pairings.len(), size.div_ceil(2), "{system} {size} {round}");
            }
        }
    }

    Ok(())
}

#[test]
fn round_robin_meets_every_pair_once_per_cycle() {
    for size in 1..=12 {
        let participants = unranked_field(size);
        let mut seen = FxHashSet::default();
        let mut byes = Vec::new();

        let rounds = u32::try_from(cycle_length(size)).unwrap_or(u32::MAX);
        for round in 1..=rounds {
            for pairing in pair_round_robin(&participants, round) {
                match unordered(&pairing) {
                    Some(pair) => assert!(seen.insert(pair), "size {size} round {round}"),
                    None => byes.push(pairing.player1_id),
                }
            }
        }

        assert_eq!(seen.len(), size * (size - 1) / 2, "size {size}");

        if size % 2 == 1 {
            byes.sort();
            byes.dedup();
            assert_eq!(byes.len(), size, "everyone sits out once, size {size}");
        } else {
            assert!(byes.is_empty());
        }
    }
}

#[test]
fn king_of_the_hill_is_deterministic() {
    let participants = field(&[
        ("ana", 1.0, 0),
        ("ben", 1.0, 0),
        ("cai", 1.0, 0),
        ("dev", 0.5, 7),
        ("eli", 0.5, 7),
    ]);

    let first = pair_king_of_the_hill(&participants);
    for _ in 0..10 {
        assert_eq!(pair_king_of_the_hill(&participants), first);
    }

    assert_eq!(
        first,
        vec![
            Pairing::game("ana", "ben"),
            Pairing::game("cai", "dev"),
            Pairing::bye("eli"),
        ]
    );
}

#[test]
fn swiss_finds_a_rematch_free_round_whenever_one_exists() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5c4a_bb1e);

    for _ in 0..300 {
        let size = rng.random_range(2..=8);
        let participants: Vec<_> = unranked_field(size)
            .into_iter()
            .map(|participant| {
                let wins = f64::from(rng.random_range(0..=8_u8)) / 2.0;
                let spread = rng.random_range(-300..=300);
                participant.with_record(wins, spread)
            })
            .collect();

        let mut history = History::new();
        for (i, player1) in participants.iter().enumerate() {
            for player2 in &participants[i + 1..] {
                if rng.random_bool(0.45) {
                    history.record_game(&player1.user_id, &player2.user_id);
                }
            }
        }

        let outcome = pair_swiss_with(&participants, &history, 3, &SwissOptions::default());
        check_round(&participants, &outcome.pairings)?;

        let bye = outcome
            .pairings
            .iter()
            .find(|pairing| pairing.is_bye)
            .map(|pairing| pairing.player1_id.as_str());
        let pool: Vec<_> = participants
            .iter()
            .map(|participant| participant.user_id.as_str())
            .filter(|user_id| Some(*user_id) != bye)
            .collect();

        if rematch_free_pairing_exists(&pool, &history) {
            assert_eq!(outcome.fallback, None);
            assert!(rematches(&outcome.pairings, &history).is_empty());
        } else {
            assert!(outcome.fallback.is_some());
            assert!(!outcome.rematches.is_empty());
        }

        let again = pair_swiss_with(&participants, &history, 3, &SwissOptions::default());
        assert_eq!(again, outcome);
    }

    Ok(())
}

#[test]
fn swiss_tournament_runs_a_full_event_without_rematches() -> anyhow::Result<()> {
    let mut tournament = Tournament::new("league", PairingSystem::Swiss);
    tournament.options.swiss.bye_policy = ByePolicy::FewestByes;
    for participant in unranked_field(9) {
        tournament.register(participant)?;
    }
    tournament.start()?;

    for round in 1..=5 {
        let ids: Vec<_> = tournament
            .next_round()?
            .iter()
            .map(|a_match| (a_match.id, a_match.is_bye))
            .collect();
        assert_eq!(ids.len(), 5);

        for (id, is_bye) in ids {
            if !is_bye {
                tournament.set_match_status(id, MatchStatus::Live)?;
            }
            tournament.set_match_status(id, MatchStatus::Finished)?;
        }

        assert_eq!(tournament.current_round, round);
    }

    let mut games = FxHashSet::default();
    for a_match in &tournament.matches {
        if let Some(pair) = unordered(&a_match.pairing()) {
            assert!(games.insert(pair));
        }
    }
    assert_eq!(games.len(), 20);

    let history = tournament.history();
    let byes: Vec<_> = tournament
        .participants
        .iter()
        .map(|participant| history.bye_count(&participant.user_id))
        .collect();
    assert_eq!(byes, vec![0, 0, 0, 0, 1, 1, 1, 1, 1]);

    tournament.complete()?;
    assert_eq!(tournament.status, TournamentStatus::Completed);
    Ok(())
}

#[test]
fn demo_snapshot_pairs_round_three() -> anyhow::Result<()> {
    let tournament: Tournament = ron::from_str(include_str!("../demos/club-night.ron"))?;

    assert_eq!(tournament.status, TournamentStatus::Active);
    assert_eq!(tournament.active_participants().len(), 6);
    assert_eq!(tournament.history().bye_count("gus"), 1);

    assert_eq!(
        tournament.preview_round(tournament.current_round + 1),
        vec![
            Pairing::game("alice", "bashir"),
            Pairing::game("chen", "gus"),
            Pairing::game("dara", "ext-emeka"),
        ]
    );

    Ok(())
}
