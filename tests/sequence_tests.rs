// Host-side tests for the key-sequence detector and the easter egg timers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod sequence {
    include!("../src/core/sequence.rs");
}

use sequence::*;

fn feed(d: &mut SequenceDetector<String>, codes: &[&str]) -> usize {
    codes.iter().filter(|c| d.on_input(c.to_string())).count()
}

#[test]
fn konami_triggers_on_last_key() {
    let mut d = SequenceDetector::konami();
    for (i, code) in KONAMI_CODE.iter().enumerate() {
        let hit = d.on_input(code.to_string());
        assert_eq!(hit, i == KONAMI_CODE.len() - 1, "at key {}", i);
    }
}

#[test]
fn leading_noise_is_ignored() {
    let mut d = SequenceDetector::konami();
    assert_eq!(feed(&mut d, &["KeyX", "Enter", "ArrowUp"]), 0);
    assert_eq!(feed(&mut d, &KONAMI_CODE), 1);
}

#[test]
fn any_single_substitution_never_triggers() {
    for i in 0..KONAMI_CODE.len() {
        let mut codes = KONAMI_CODE;
        codes[i] = "KeyZ";
        let mut d = SequenceDetector::konami();
        assert_eq!(feed(&mut d, &codes), 0, "substituted key {}", i);
    }
}

#[test]
fn back_to_back_sequences_trigger_twice() {
    let mut d = SequenceDetector::konami();
    let mut codes = KONAMI_CODE.to_vec();
    codes.extend_from_slice(&KONAMI_CODE);
    assert_eq!(feed(&mut d, &codes), 2);
}

#[test]
fn reset_forgets_partial_input() {
    let mut d = SequenceDetector::konami();
    feed(&mut d, &KONAMI_CODE[..9]);
    d.reset();
    assert!(!d.on_input("KeyA".to_string()));
}

#[test]
fn empty_target_never_matches() {
    let mut d: SequenceDetector<u8> = SequenceDetector::new(Vec::new());
    assert!(!d.on_input(1));
    assert!(!d.on_input(1));
}

#[test]
fn generic_over_code_type() {
    let mut d = SequenceDetector::new(vec![1u8, 2, 3]);
    let hits: Vec<bool> = [1u8, 2, 1, 2, 3].iter().map(|c| d.on_input(*c)).collect();
    assert_eq!(hits, vec![false, false, false, false, true]);
}

#[test]
fn celebration_lasts_ten_seconds_and_expires_once() {
    let mut c = Celebration::default();
    assert!(!c.is_active(0.0));
    c.activate(5.0);
    assert!(c.is_active(5.0));
    assert!(c.is_active(14.9));
    assert!(!c.poll_expired(14.9));
    assert!(!c.is_active(15.0));
    assert!(c.poll_expired(15.0));
    assert!(!c.poll_expired(16.0));
}

#[test]
fn retrigger_keeps_first_deadline() {
    let mut c = Celebration::new(10.0);
    c.activate(0.0);
    c.activate(8.0);
    assert!(c.is_active(9.9));
    assert!(!c.is_active(12.0));
    assert!(c.poll_expired(12.0));
    assert!(!c.poll_expired(18.0));
}

#[test]
fn stale_deadline_cuts_short_a_later_trigger() {
    let mut c = Celebration::new(10.0);
    c.activate(0.0);
    c.activate(8.0);
    assert!(c.poll_expired(10.0));
    // Pending end at 18 from the second trigger still applies to this one.
    c.activate(12.0);
    assert!(c.is_active(17.9));
    assert!(!c.is_active(18.0));
    assert!(c.poll_expired(18.0));
    assert!(!c.poll_expired(22.0));
    assert!(!c.is_active(21.0));
}

#[test]
fn hint_window_is_thirty_to_thirty_five_seconds() {
    let h = HintSchedule::default();
    assert!(!h.is_visible(29.9, false));
    assert!(h.is_visible(30.0, false));
    assert!(h.is_visible(34.9, false));
    assert!(!h.is_visible(35.0, false));
    assert!(!h.is_visible(31.0, true));
}

#[test]
fn confetti_burst_is_seeded_and_uses_palette() {
    let a = ConfettiBurst::new(constants::CONFETTI_COUNT, 3);
    let b = ConfettiBurst::new(constants::CONFETTI_COUNT, 3);
    assert_eq!(a.pieces, b.pieces);
    assert_eq!(a.pieces.len(), 50);
    for p in &a.pieces {
        assert!(CONFETTI_COLORS.contains(&p.color));
        assert!((0.0..100.0).contains(&p.left_percent));
        assert!((3.0..5.0).contains(&p.duration));
        assert!((0.0..0.5).contains(&p.delay));
    }
}

#[test]
fn confetti_falls_and_fades() {
    let piece = ConfettiPiece {
        left_percent: 50.0,
        color: CONFETTI_COLORS[0],
        duration: 4.0,
        delay: 0.5,
        drift_px: 100.0,
        spin_deg: 360.0,
    };
    let start = piece.sample(0.0, 800.0);
    assert_eq!(start.y_px, -20.0);
    assert_eq!(start.opacity, 1.0);

    let mid = piece.sample(2.5, 800.0);
    assert!((mid.y_px - 415.0).abs() < 1e-3);
    assert!((mid.x_px - 50.0).abs() < 1e-3);
    assert_eq!(mid.opacity, 1.0);

    let end = piece.sample(4.5, 800.0);
    assert_eq!(end.y_px, 850.0);
    assert_eq!(end.rotation_deg, 360.0);
    assert_eq!(end.opacity, 0.0);
    assert!(piece.finished(4.5));
    assert!(!piece.finished(4.4));
}

#[test]
fn easter_egg_celebrates_and_clears() {
    let mut egg = EasterEgg::new(11);
    for code in KONAMI_CODE.iter().take(9) {
        assert!(!egg.on_key(code.to_string(), 1.0));
    }
    assert!(egg.on_key("KeyA".to_string(), 1.0));
    assert_eq!(egg.triggers(), 1);

    let v = egg.tick(2.0);
    assert!(v.celebrating);
    assert_eq!(v.confetti_t, Some(1.0));
    assert!(egg.burst().is_some());

    let v = egg.tick(12.0);
    assert!(!v.celebrating);
    assert_eq!(v.confetti_t, None);
    assert!(egg.burst().is_none());
}

#[test]
fn easter_egg_hint_hidden_while_celebrating() {
    let mut egg = EasterEgg::new(1);
    assert!(egg.tick(31.0).hint_visible);
    for code in KONAMI_CODE {
        egg.on_key(code.to_string(), 31.5);
    }
    assert!(!egg.tick(32.0).hint_visible);
}
