use crowdmines_core::*;
use std::time::Duration;
use web_time::Instant;

fn seeded(seed: u64) -> RoundController {
    RoundController::new(&SessionSettings {
        seed: Some(seed),
        ..Default::default()
    })
}

fn cells(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}

#[test]
fn starts_with_default_board() {
    let round = seeded(1);
    let snapshot = round.snapshot();

    assert_eq!(snapshot.size, DEFAULT_SIZE);
    assert_eq!(snapshot.mine_count, DEFAULT_MINE_COUNT);
    assert_eq!(snapshot.board.len(), usize::from(DEFAULT_SIZE));
    assert!(snapshot.revealed.iter().flatten().all(|&revealed| !revealed));
    assert!(snapshot.scores.is_empty());
    assert_eq!(round.next_deadline(), None);
}

#[test]
fn crowd_clears_board_and_round_restarts() {
    let start = Instant::now();
    let cooldown = Timings::default().cooldown();
    let mut round = seeded(7);
    let board = round.board().clone();

    // everyone guesses until the board is gone, one new name per guess so nobody is throttled
    let mut now = start;
    let mut expected = std::collections::BTreeMap::new();
    for (i, coords) in cells(board.size()).enumerate() {
        if round.engine().is_revealed(coords) {
            continue;
        }
        let user = format!("viewer{i}");
        let message = if board.contains_mine(coords) {
            tile_label(coords) + "f"
        } else {
            tile_label(coords)
        };
        now += Duration::from_millis(10);

        match round.handle_chat(&ChatEvent::new(&user, message), now) {
            Outcome::Guessed { delta, .. } => {
                expected.insert(user, delta);
            }
            outcome => panic!("guess on {coords:?} was {outcome:?}"),
        }
    }

    assert!(round.engine().is_cleared());
    let snapshot = round.snapshot();
    assert_eq!(snapshot.scores, expected);
    assert!(snapshot.scores.values().all(|&score| score > 0));
    assert_eq!(snapshot.chat.len(), expected.len());

    let restart_at = now + Timings::default().restart_delay();
    assert!(!round.tick(restart_at - Duration::from_millis(1)).restarted);
    assert!(round.tick(restart_at).restarted);

    let after = round.snapshot();
    assert_eq!(after.generation.get(), 1);
    assert_eq!(after.size, DEFAULT_SIZE);
    assert_eq!(after.mine_count, DEFAULT_MINE_COUNT);
    assert!(after.chat.is_empty());
    assert_eq!(after.scores, expected);
    assert_ne!(after.board, snapshot.board);

    // viewer0's cooldown from the cleared board would still be running, the restart lifted it
    assert!(restart_at < start + Duration::from_millis(10) + cooldown);
    let first = cells(DEFAULT_SIZE)
        .find(|&coords| !round.board().contains_mine(coords))
        .unwrap();
    assert!(
        round
            .handle_chat(&ChatEvent::new("viewer0", tile_label(first)), restart_at)
            .has_update()
    );
}

#[test]
fn cooldown_gates_a_single_viewer() {
    let start = Instant::now();
    let mut round = seeded(11);
    let safe: Vec<_> = cells(DEFAULT_SIZE)
        .filter(|&coords| round.board()[coords] == TileContent::Count(1))
        .take(2)
        .collect();

    let first = ChatEvent::new("alice", tile_label(safe[0]));
    let second = ChatEvent::new("alice", tile_label(safe[1]));

    assert!(round.handle_chat(&first, start).has_update());
    assert_eq!(
        round.handle_chat(&second, start + Duration::from_secs(1)),
        Outcome::Ignored(IgnoreReason::Throttled)
    );
    assert!(!round.engine().is_revealed(safe[1]));

    let deadline = round.next_deadline().unwrap();
    assert_eq!(round.tick(deadline).released, 1);
    assert!(round.handle_chat(&second, deadline).has_update());
    assert_eq!(round.scores().score("alice"), Some(2));
}

#[test]
fn moderator_reconfigures_the_board() {
    let now = Instant::now();
    let mut round = seeded(5);

    let ignored = round.handle_chat(&ChatEvent::new("viewer", "!size 12"), now);
    assert!(!ignored.has_update());

    let moderator = |message: &str| ChatEvent::new("mod", message).moderator(true);
    round.handle_chat(&moderator("!size 12"), now);
    let snapshot = round.snapshot();
    assert_eq!((snapshot.size, snapshot.mine_count), (12, 22));
    let mines = snapshot
        .board
        .iter()
        .flatten()
        .filter(|tile| tile.is_mine())
        .count();
    assert_eq!(mines, 22);

    round.handle_chat(&moderator("!mines 143"), now);
    assert_eq!(round.board().mine_count(), 143);
    assert!(!round.handle_chat(&moderator("!mines 144"), now).has_update());
    assert!(!round.handle_chat(&moderator("!size 27"), now).has_update());

    // guesses now address the larger board
    assert!(matches!(
        round.handle_chat(&ChatEvent::new("viewer", "L12"), now),
        Outcome::Guessed { coords: (11, 11), .. }
    ));
}
