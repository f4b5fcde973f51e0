//! Turn flow integration tests.
//!
//! These tests drive the engine through its inbound signals with forced
//! roll values and check the published facts and the resulting state.

use std::cell::RefCell;
use std::rc::Rc;

use rust_board::board::TileRecord;
use rust_board::core::{EngineError, PlayerId, ScriptedRng, SessionBuilder};
use rust_board::effects::ChanceOutcome;
use rust_board::events::{EventKind, GameEvent};
use rust_board::session::{Decision, GameEngine, Pending};
use rust_board::turn::TurnStrategy;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn engine(players: usize, balance: u64, tiles: Vec<TileRecord>, chance: Vec<f64>) -> GameEngine {
    let config = SessionBuilder::new()
        .player_count(players)
        .starting_balance(balance)
        .external_dice()
        .tiles(tiles)
        .build();
    GameEngine::with_random(config, Box::new(ScriptedRng::new(chance))).unwrap()
}

/// Board of `size` start tiles with `tile` placed at `index`.
fn board_with(size: usize, index: usize, tile: TileRecord) -> Vec<TileRecord> {
    let mut tiles: Vec<_> = (0..size).map(|_| TileRecord::start()).collect();
    tiles[index] = tile;
    tiles
}

fn events(engine: &mut GameEngine) -> Rc<RefCell<Vec<GameEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe_all(move |_, event| sink.borrow_mut().push(event.clone()));
    seen
}

/// Roll `value` for whoever is up and complete the move.
fn play(engine: &mut GameEngine, value: u32) {
    engine.roll_with(value).unwrap();
    let Pending::Movement(mv) = engine.pending().clone() else {
        panic!("expected a move in flight, engine is {}", engine.pending());
    };
    engine.complete_movement(mv.player, mv.to).unwrap();
}

/// A six grants the same player another turn.
#[test]
fn test_continuation_roll() {
    let mut engine = engine(2, 1500, board_with(10, 0, TileRecord::start()), vec![]);
    engine.start().unwrap();

    play(&mut engine, 6);
    assert_eq!(engine.pending(), &Pending::Roll { player: P0 });
    assert_eq!(engine.active_player(), Some(P0));

    play(&mut engine, 2);
    assert_eq!(engine.pending(), &Pending::Roll { player: P1 });
    assert_eq!(engine.session().player(P0).unwrap().position, 8);
}

/// Turn start clears the previous roll.
#[test]
fn test_last_roll_reset_on_turn_start() {
    let mut engine = engine(2, 1500, board_with(10, 0, TileRecord::start()), vec![]);
    engine.start().unwrap();

    play(&mut engine, 6);
    assert_eq!(engine.session().player(P0).unwrap().last_roll, 0);
    engine.roll_with(3).unwrap();
    assert_eq!(engine.session().player(P0).unwrap().last_roll, 0);
}

/// Detained for three: three activations end at once, the fourth rolls.
#[test]
fn test_detainment_three_turns() {
    let mut engine = engine(2, 1500, board_with(10, 1, TileRecord::detainment("Jail", 3)), vec![]);
    let seen = events(&mut engine);
    engine.start().unwrap();

    play(&mut engine, 1);
    assert_eq!(
        engine.session().player(P0).unwrap().strategy,
        TurnStrategy::Detained { remaining: 3 }
    );
    assert!(seen.borrow().contains(&GameEvent::PlayerDetained { player: P0, turns: 3 }));
    assert_eq!(engine.pending(), &Pending::Roll { player: P1 });

    for skipped in 1..=3 {
        seen.borrow_mut().clear();
        // Seat 1 plays; seat 0's activation ends without a roll
        play(&mut engine, 2);
        let kinds: Vec<_> = seen
            .borrow()
            .iter()
            .filter(|e| e.player() == Some(P0))
            .map(GameEvent::kind)
            .collect();
        assert_eq!(kinds, vec![EventKind::TurnStarted, EventKind::TurnEnded], "skip {}", skipped);
        assert_eq!(engine.pending(), &Pending::Roll { player: P1 });
    }

    seen.borrow_mut().clear();
    play(&mut engine, 2);
    assert_eq!(engine.pending(), &Pending::Roll { player: P0 });
    assert_eq!(engine.session().player(P0).unwrap().strategy, TurnStrategy::Normal);
    assert!(seen.borrow().contains(&GameEvent::ReadyToRoll { player: P0 }));
}

/// Landing on detainment with a six still ends the turn.
#[test]
fn test_detainment_ignores_continuation() {
    let mut engine = engine(2, 1500, board_with(10, 6, TileRecord::detainment("Jail", 2)), vec![]);
    engine.start().unwrap();

    play(&mut engine, 6);
    assert_eq!(engine.pending(), &Pending::Roll { player: P1 });
}

/// Chance draw of 0.05 on a balance of 1000 pays 500.
#[test]
fn test_chance_reward() {
    let mut engine = engine(2, 1000, board_with(5, 1, TileRecord::chance("Chance")), vec![0.05]);
    let seen = events(&mut engine);
    engine.start().unwrap();

    play(&mut engine, 1);
    assert_eq!(engine.session().player(P0).unwrap().balance(), 1500);
    assert!(seen.borrow().contains(&GameEvent::ChanceResolved {
        player: P0,
        outcome: ChanceOutcome::Reward(500),
    }));
    assert!(seen.borrow().contains(&GameEvent::BalanceChanged { player: P0, old: 1000, new: 1500 }));
    assert_eq!(engine.pending(), &Pending::Roll { player: P1 });
}

/// Chance draw of 0.5 with a penalty fraction of 0.2 costs 200.
#[test]
fn test_chance_penalty() {
    let mut engine = engine(2, 1000, board_with(5, 1, TileRecord::chance("Chance")), vec![0.5, 0.5]);
    engine.start().unwrap();

    play(&mut engine, 1);
    assert_eq!(engine.session().player(P0).unwrap().balance(), 800);
}

/// Chance on a six: the continuation check runs after the draw.
#[test]
fn test_chance_then_continuation() {
    let mut engine = engine(2, 1000, board_with(10, 6, TileRecord::chance("Chance")), vec![0.05]);
    let seen = events(&mut engine);
    engine.start().unwrap();

    play(&mut engine, 6);
    let kinds: Vec<_> = seen.borrow().iter().map(GameEvent::kind).collect();
    let chance = kinds.iter().position(|k| *k == EventKind::ChanceResolved).unwrap();
    let continued = kinds.iter().position(|k| *k == EventKind::TurnContinued).unwrap();
    assert!(chance < continued);
    assert_eq!(engine.pending(), &Pending::Roll { player: P0 });
}

/// An unaffordable property on a six continues after acknowledgment.
#[test]
fn test_unaffordable_six_continues() {
    let mut engine = engine(2, 100, board_with(10, 6, TileRecord::property("Tokyo", 400, 40)), vec![]);
    engine.start().unwrap();

    play(&mut engine, 6);
    let Pending::Decision(decision) = engine.pending().clone() else {
        panic!("expected a decision");
    };
    assert!(!decision.purchasable());

    assert_eq!(engine.decide(Decision::Purchase), Err(EngineError::InvalidDecision("purchase")));
    assert_eq!(engine.pending(), &Pending::Decision(decision));

    engine.decide(Decision::Acknowledge).unwrap();
    assert_eq!(engine.pending(), &Pending::Roll { player: P0 });
    assert!(!engine.session().ledger().is_owned(rust_board::board::TileId::new(6)));
}

/// Declining a purchasable property ends the turn without a purchase.
#[test]
fn test_decline_purchase() {
    let mut engine = engine(2, 1500, board_with(5, 2, TileRecord::property("Rome", 180, 18)), vec![]);
    let seen = events(&mut engine);
    engine.start().unwrap();

    play(&mut engine, 2);
    engine.decide(Decision::Decline).unwrap();

    assert!(seen.borrow().iter().all(|e| e.kind() != EventKind::PurchaseMade));
    assert_eq!(engine.session().player(P0).unwrap().balance(), 1500);
    assert_eq!(engine.pending(), &Pending::Roll { player: P1 });
}

/// Double strategy rolls stay in 2..=12 and move accordingly.
#[test]
fn test_double_dice_roll() {
    let config = SessionBuilder::new()
        .dice(rust_board::core::DiceStrategy::Double)
        .tiles((0..40).map(|_| TileRecord::start()).collect())
        .build();
    let mut engine = GameEngine::new(config, 11).unwrap();
    engine.start().unwrap();

    for _ in 0..20 {
        let player = engine.pending().player().unwrap();
        let before = engine.session().player(player).unwrap().position;
        let value = engine.roll().unwrap();
        assert!((2..=12).contains(&value));

        let Pending::Movement(mv) = engine.pending().clone() else {
            panic!("expected a move in flight");
        };
        assert_eq!(mv.to, (before + value as usize) % 40);
        engine.complete_movement(mv.player, mv.to).unwrap();
    }
}

/// Turn counter advances once per activation, skips included.
#[test]
fn test_turn_counter() {
    let mut engine = engine(3, 1500, board_with(10, 0, TileRecord::start()), vec![]);
    engine.start().unwrap();
    assert_eq!(engine.session().turn_number, 1);

    play(&mut engine, 1);
    play(&mut engine, 6);
    play(&mut engine, 2);
    assert_eq!(engine.session().turn_number, 4);
    assert_eq!(engine.pending(), &Pending::Roll { player: PlayerId::new(2) });
}

/// Two players detained for a very long time skip turns one after
/// another without exhausting the stack, in strict alternation.
#[test]
fn test_long_mutual_detainment() {
    const TURNS: u32 = 10_000;
    let mut engine = engine(2, 1500, board_with(4, 1, TileRecord::detainment("Jail", TURNS)), vec![]);
    engine.start().unwrap();

    play(&mut engine, 1);
    let seen = events(&mut engine);
    play(&mut engine, 1);

    assert_eq!(engine.pending(), &Pending::Roll { player: P0 });
    assert_eq!(engine.session().turn_number, 2 + 2 * TURNS + 1);
    assert_eq!(engine.session().player(P0).unwrap().strategy, TurnStrategy::Normal);
    assert_eq!(
        engine.session().player(P1).unwrap().strategy,
        TurnStrategy::Detained { remaining: 0 }
    );

    let turn_facts: Vec<_> = seen
        .borrow()
        .iter()
        .filter(|e| matches!(e.kind(), EventKind::TurnStarted | EventKind::TurnEnded))
        .take(6)
        .map(|e| (e.kind(), e.player()))
        .collect();
    assert_eq!(turn_facts, vec![
        (EventKind::TurnEnded, Some(P1)),
        (EventKind::TurnStarted, Some(P0)),
        (EventKind::TurnEnded, Some(P0)),
        (EventKind::TurnStarted, Some(P1)),
        (EventKind::TurnEnded, Some(P1)),
        (EventKind::TurnStarted, Some(P0)),
    ]);
}

/// A full table of 255 players, all detained, drains every skipped turn.
#[test]
fn test_every_seat_detained() {
    let mut engine = engine(255, 1500, board_with(4, 1, TileRecord::detainment("Jail", 3)), vec![]);
    engine.start().unwrap();

    for _ in 0..255 {
        play(&mut engine, 1);
    }

    assert_eq!(engine.pending(), &Pending::Roll { player: P0 });
    assert_eq!(engine.session().turn_number, 255 + 255 * 3 + 1);
    assert!(engine.session().players().all(|p| p.position == 1));
}
