// Host-side tests for the screen flow state machine.

use moodscape_core::{BinauralMode, IntroStep, Phase, PresetKey, Session};

fn at_start() -> Session {
    let mut s = Session::new();
    while s.advance_intro() != IntroStep::Finished {}
    s
}

#[test]
fn intro_walks_every_preset_in_order() {
    let mut s = Session::new();
    assert_eq!(s.phase(), Phase::Intro);
    assert_eq!(s.intro_preset(), Some(PresetKey::Calm));
    let mut shown = vec![PresetKey::Calm];
    loop {
        match s.advance_intro() {
            IntroStep::Show(key) => {
                assert_eq!(s.intro_preset(), Some(key));
                shown.push(key);
            }
            IntroStep::Finished => break,
        }
    }
    assert_eq!(shown, PresetKey::ALL.to_vec());
    assert_eq!(s.phase(), Phase::Start);
    assert_eq!(s.intro_preset(), None);
    assert_eq!(s.selection().preset, PresetKey::Calm);
}

#[test]
fn advancing_after_intro_does_nothing() {
    let mut s = at_start();
    assert_eq!(s.advance_intro(), IntroStep::Finished);
    assert_eq!(s.phase(), Phase::Start);
}

#[test]
fn begin_only_from_start_screen() {
    let mut s = Session::new();
    assert!(s.begin().is_none(), "cannot begin during intro");
    let mut s = at_start();
    s.select_preset(PresetKey::Psilocybin);
    s.select_binaural(BinauralMode::Alpha);
    assert!(s.begin().is_some());
    assert_eq!(s.phase(), Phase::Experience);
    assert!(s.begin().is_none(), "already running");
    assert_eq!(s.selection().preset, PresetKey::Psilocybin);
    assert_eq!(s.selection().binaural, BinauralMode::Alpha);
}

#[test]
fn timer_expiry_ends_the_session() {
    let mut s = at_start();
    let ticket = s.begin().expect("begin");
    assert!(s.expire(ticket));
    assert_eq!(s.phase(), Phase::Ended);
    assert!(!s.expire(ticket), "expires once");
}

#[test]
fn restart_returns_to_calm_and_invalidates_timer() {
    let mut s = at_start();
    s.select_preset(PresetKey::Caapi);
    let old = s.begin().expect("begin");
    assert!(s.restart());
    assert_eq!(s.phase(), Phase::Start);
    assert_eq!(s.selection().preset, PresetKey::Calm);

    let new = s.begin().expect("second run");
    assert_ne!(old, new);
    assert!(!s.expire(old), "stale timer from the first run");
    assert_eq!(s.phase(), Phase::Experience);
    assert!(s.expire(new));
}

#[test]
fn restart_is_ignored_before_a_session() {
    let mut s = Session::new();
    assert!(!s.restart());
    let mut s = at_start();
    assert!(!s.restart());
    assert_eq!(s.phase(), Phase::Start);
}

#[test]
fn restart_from_end_screen() {
    let mut s = at_start();
    let ticket = s.begin().expect("begin");
    s.expire(ticket);
    assert!(s.restart());
    assert_eq!(s.phase(), Phase::Start);
}
