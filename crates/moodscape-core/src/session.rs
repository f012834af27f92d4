//! Screen flow of the experience: intro slideshow, preset selection, the
//! timed session and the end screen.
//!
//! Timers live in the frontend. The state machine hands out a
//! [`SessionTicket`] when a session begins; an expiry only counts if it
//! carries the current ticket, so a timer that outlives a restart is inert.

use crate::preset::{BinauralMode, PresetKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Start,
    Experience,
    Ended,
}

/// Outcome of advancing the intro slideshow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroStep {
    Show(PresetKey),
    Finished,
}

/// Identifies one run of the experience for its end-of-session timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Selection {
    pub preset: PresetKey,
    pub binaural: BinauralMode,
}

pub struct Session {
    phase: Phase,
    intro_step: usize,
    selection: Selection,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            intro_step: 0,
            selection: Selection::default(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Preset shown by the intro slideshow right now, if it is still running.
    pub fn intro_preset(&self) -> Option<PresetKey> {
        match self.phase {
            Phase::Intro => PresetKey::ALL.get(self.intro_step).copied(),
            _ => None,
        }
    }

    /// Move the slideshow on by one slide. After the last slide the start
    /// screen takes over with the calm preset selected.
    pub fn advance_intro(&mut self) -> IntroStep {
        if self.phase != Phase::Intro {
            return IntroStep::Finished;
        }
        self.intro_step += 1;
        match PresetKey::ALL.get(self.intro_step) {
            Some(&key) => IntroStep::Show(key),
            None => {
                self.phase = Phase::Start;
                self.selection.preset = PresetKey::Calm;
                log::info!("[session] intro finished");
                IntroStep::Finished
            }
        }
    }

    pub fn select_preset(&mut self, preset: PresetKey) {
        self.selection.preset = preset;
    }

    pub fn select_binaural(&mut self, mode: BinauralMode) {
        self.selection.binaural = mode;
    }

    /// Enter the experience. Only valid from the start screen.
    pub fn begin(&mut self) -> Option<SessionTicket> {
        if self.phase != Phase::Start {
            log::debug!("[session] begin ignored in {:?}", self.phase);
            return None;
        }
        self.phase = Phase::Experience;
        self.generation += 1;
        log::info!(
            "[session] begin {} binaural={:?}",
            self.selection.preset,
            self.selection.binaural
        );
        Some(SessionTicket(self.generation))
    }

    /// End the running experience if `ticket` is still current.
    pub fn expire(&mut self, ticket: SessionTicket) -> bool {
        if self.phase != Phase::Experience || ticket.0 != self.generation {
            log::debug!("[session] stale timer ignored");
            return false;
        }
        self.phase = Phase::Ended;
        log::info!("[session] ended");
        true
    }

    /// Return to the start screen with calm selected. Any pending ticket
    /// becomes stale.
    pub fn restart(&mut self) -> bool {
        match self.phase {
            Phase::Experience | Phase::Ended => {
                self.phase = Phase::Start;
                self.generation += 1;
                self.selection.preset = PresetKey::Calm;
                log::info!("[session] restart");
                true
            }
            _ => false,
        }
    }
}
