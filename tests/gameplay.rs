//! End-to-end gameplay scenarios driven through the input API

use glam::Vec2;
use proptest::prelude::*;

use tsum_drop::GameConfig;
use tsum_drop::sim::{InputEvent, SelectionOutcome, TokenKind, Viewport, World, handle_input};

const VIEW: Viewport = Viewport {
    width: 480.0,
    height: 800.0,
};

fn world() -> World {
    World::new(2024, VIEW, GameConfig::default())
}

/// Long enough for a full batch of 40 staggered spawns to land
fn run_until_spawned(world: &mut World) {
    for _ in 0..200 {
        world.tick();
    }
    assert_eq!(world.pending_spawns(), 0);
}

fn drag(world: &mut World, points: &[Vec2]) -> Option<SelectionOutcome> {
    handle_input(world, InputEvent::PointerDown(points[0]));
    for &pos in &points[1..] {
        handle_input(world, InputEvent::PointerMove { pos, pressed: true });
    }
    handle_input(world, InputEvent::PointerUp)
}

/// Three same-kind tokens in a row, 80 px apart, plus an unrelated one
fn row_of_three(world: &mut World) -> Vec<Vec2> {
    let points = vec![
        Vec2::new(100.0, 300.0),
        Vec2::new(180.0, 300.0),
        Vec2::new(260.0, 300.0),
    ];
    for &p in &points {
        world.insert_token(p, TokenKind::Frog);
    }
    world.insert_token(Vec2::new(400.0, 500.0), TokenKind::Bear);
    points
}

#[test]
fn test_chain_of_two_cancels() {
    let mut w = world();
    let points = row_of_three(&mut w);

    let outcome = drag(&mut w, &points[..2]);
    assert_eq!(outcome, Some(SelectionOutcome::Cancelled { count: 2 }));
    assert_eq!(w.score, 0);
    assert_eq!(w.tokens.len(), 4);
    assert!(w.tokens.iter().all(|t| !t.selected));
    assert!(w.chain.is_empty());
    assert_eq!(w.pending_spawns(), 0);
}

#[test]
fn test_chain_of_three_commits_and_respawns() {
    let mut w = world();
    let points = row_of_three(&mut w);
    let bear = w.tokens[3].id;

    let outcome = drag(&mut w, &points);
    assert_eq!(
        outcome,
        Some(SelectionOutcome::Committed {
            count: 3,
            points: 300
        })
    );
    assert_eq!(w.score, 300);
    assert_eq!(w.tokens.len(), 1);
    assert_eq!(w.tokens[0].id, bear);
    assert!(w.chain.is_empty());

    // Replacements trickle in over the stagger window
    assert_eq!(w.pending_spawns(), 3);
    for _ in 0..20 {
        w.tick();
    }
    assert_eq!(w.pending_spawns(), 0);
    assert_eq!(w.tokens.len(), 4);
}

#[test]
fn test_chain_extends_only_with_matching_nearby_tokens() {
    let mut w = world();
    let a = w.insert_token(Vec2::new(100.0, 300.0), TokenKind::Pig);
    let b = w.insert_token(Vec2::new(190.0, 300.0), TokenKind::Pig);
    let far = w.insert_token(Vec2::new(100.0, 450.0), TokenKind::Pig);
    let other = w.insert_token(Vec2::new(190.0, 380.0), TokenKind::Cat);

    handle_input(&mut w, InputEvent::PointerDown(Vec2::new(100.0, 300.0)));
    handle_input(
        &mut w,
        InputEvent::PointerMove {
            pos: Vec2::new(190.0, 300.0),
            pressed: true,
        },
    );
    assert_eq!(w.chain, vec![a, b]);

    // Different kind, adjacent to `b`
    handle_input(
        &mut w,
        InputEvent::PointerMove {
            pos: Vec2::new(190.0, 380.0),
            pressed: true,
        },
    );
    // Same kind, but ~175 px from `b`
    handle_input(
        &mut w,
        InputEvent::PointerMove {
            pos: Vec2::new(100.0, 450.0),
            pressed: true,
        },
    );
    assert_eq!(w.chain, vec![a, b]);
    assert!(w.token(far).is_some_and(|t| !t.selected));
    assert!(w.token(other).is_some_and(|t| !t.selected));
}

#[test]
fn test_reset_yields_forty_tokens_and_keeps_score() {
    let mut w = world();
    let points = row_of_three(&mut w);
    drag(&mut w, &points);
    assert_eq!(w.score, 300);

    handle_input(&mut w, InputEvent::Reset(VIEW));
    assert!(w.tokens.is_empty());
    run_until_spawned(&mut w);
    assert_eq!(w.tokens.len(), 40);
    assert_eq!(w.score, 300);
}

#[test]
fn test_reset_cancels_previous_spawns_by_default() {
    let mut w = world();
    handle_input(&mut w, InputEvent::Reset(VIEW));
    for _ in 0..10 {
        w.tick();
    }
    handle_input(&mut w, InputEvent::Reset(VIEW));
    run_until_spawned(&mut w);
    assert_eq!(w.tokens.len(), 40);
}

#[test]
fn test_uncancelled_spawns_land_after_reset() {
    let config = GameConfig {
        cancel_pending_on_reset: false,
        ..Default::default()
    };
    let mut w = World::new(7, VIEW, config);
    handle_input(&mut w, InputEvent::Reset(VIEW));
    for _ in 0..10 {
        w.tick();
    }
    let landed = w.tokens.len();
    assert!(landed > 0 && landed < 40);

    handle_input(&mut w, InputEvent::Reset(VIEW));
    run_until_spawned(&mut w);
    assert_eq!(w.tokens.len(), 40 + 40 - landed);
}

#[test]
fn test_resize_restarts_at_new_size() {
    let mut w = world();
    handle_input(&mut w, InputEvent::Reset(VIEW));
    run_until_spawned(&mut w);

    let narrow = Viewport::new(300.0, 600.0);
    handle_input(&mut w, InputEvent::Resize(narrow));
    assert_eq!(w.viewport, narrow);
    assert!(w.tokens.is_empty());

    run_until_spawned(&mut w);
    for _ in 0..300 {
        w.tick();
    }
    for t in &w.tokens {
        assert!(t.pos.x >= t.radius && t.pos.x <= 300.0 - t.radius);
        assert!(t.pos.y <= 600.0 - t.radius);
    }
}

#[test]
fn test_full_batch_settles_inside_viewport() {
    let mut w = world();
    handle_input(&mut w, InputEvent::Reset(VIEW));
    run_until_spawned(&mut w);
    for _ in 0..600 {
        w.tick();
    }
    for t in &w.tokens {
        assert_eq!(t.radius, 35.0);
        assert!(t.pos.x >= t.radius && t.pos.x <= VIEW.width - t.radius);
        assert!(t.pos.y <= VIEW.height - t.radius);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_score_only_moves_by_commits(seed in any::<u64>(), taps in prop::collection::vec((0.0f32..480.0, 0.0f32..800.0), 1..20)) {
        let mut w = World::new(seed, VIEW, GameConfig::default());
        handle_input(&mut w, InputEvent::Reset(VIEW));
        for _ in 0..240 {
            w.tick();
        }

        let mut expected = 0;
        for (x, y) in taps {
            let pos = Vec2::new(x, y);
            handle_input(&mut w, InputEvent::PointerDown(pos));
            handle_input(&mut w, InputEvent::PointerMove { pos: pos + Vec2::new(30.0, 0.0), pressed: true });
            let live_before = w.tokens.len();
            match handle_input(&mut w, InputEvent::PointerUp) {
                Some(SelectionOutcome::Committed { count, points }) => {
                    prop_assert_eq!(points, count as u64 * 100);
                    prop_assert_eq!(w.tokens.len(), live_before - count);
                    expected += points;
                }
                _ => {
                    prop_assert_eq!(w.tokens.len(), live_before);
                }
            }
            prop_assert!(w.chain.is_empty());
            prop_assert!(w.tokens.iter().all(|t| !t.selected));
            w.tick();
        }
        prop_assert_eq!(w.score, expected);
    }
}
