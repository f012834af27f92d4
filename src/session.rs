//! DOM side of the screen flow. `moodscape_core::Session` decides what
//! happens; this module plays the transitions and owns the timers.

use crate::constants::*;
use crate::dom;
use crate::experience::Experience;
use crate::screens;
use moodscape_core::{BinauralMode, IntroStep, Phase, PresetKey, Session, SessionTicket};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone)]
pub struct SessionWiring {
    pub document: web::Document,
    pub experience: Experience,
    pub session: Rc<RefCell<Session>>,
    pub end_timer: Rc<Cell<Option<i32>>>,
    /// Set while a screen transition is running; clicks are ignored meanwhile.
    pub busy: Rc<Cell<bool>>,
}

impl SessionWiring {
    pub fn new(document: web::Document, experience: Experience) -> Self {
        Self {
            document,
            experience,
            session: Rc::new(RefCell::new(Session::new())),
            end_timer: Rc::new(Cell::new(None)),
            busy: Rc::new(Cell::new(false)),
        }
    }
}

pub fn wire_session(w: SessionWiring) {
    if let Some(key) = w.session.borrow().intro_preset() {
        show_intro_slide(&w.document, key);
    }
    wire_intro(&w);
    wire_preset_radios(&w);
    wire_start(&w);
    wire_restart(&w);
}

fn show_intro_slide(document: &web::Document, key: PresetKey) {
    let preset = key.preset();
    dom::set_body_background(document, preset.background);
    dom::set_text(document, INTRO_TITLE_ID, preset.title);
    dom::set_html(document, INTRO_SUBTITLE_ID, preset.subtitle);
    screens::fade_text(document, INTRO_TEXT_ID, true);
}

fn wire_intro(w: &SessionWiring) {
    let w = w.clone();
    let document = w.document.clone();
    dom::add_click_listener(&document, INTRO_SCREEN_ID, move || {
        if w.busy.get() || w.session.borrow().intro_preset().is_none() {
            return;
        }
        w.busy.set(true);
        screens::fade_text(&w.document, INTRO_TEXT_ID, false);
        let w2 = w.clone();
        _ = dom::set_timeout(INTRO_FADE_MS, move || {
            let step = w2.session.borrow_mut().advance_intro();
            match step {
                IntroStep::Show(key) => {
                    show_intro_slide(&w2.document, key);
                    w2.busy.set(false);
                }
                IntroStep::Finished => leave_intro(&w2),
            }
        });
    });
}

fn leave_intro(w: &SessionWiring) {
    screens::fade_out(&w.document, INTRO_SCREEN_ID);
    let w = w.clone();
    _ = dom::set_timeout(INTRO_FADE_MS, move || {
        screens::hide(&w.document, INTRO_SCREEN_ID);
        screens::show(&w.document, START_SCREEN_ID);
        reset_start_screen(&w);
        w.busy.set(false);
    });
}

fn reset_start_screen(w: &SessionWiring) {
    dom::check_radio(&w.document, DEFAULT_PRESET_RADIO_ID);
    update_trip_info(w);
}

/// Mirror the checked preset radio into the session and the start screen copy.
fn update_trip_info(w: &SessionWiring) {
    let preset = dom::checked_radio_value(&w.document, PRESET_RADIO_NAME)
        .and_then(|v| v.parse::<PresetKey>().ok())
        .unwrap_or_default();
    w.session.borrow_mut().select_preset(preset);
    let p = preset.preset();
    dom::set_text(&w.document, MAIN_TITLE_ID, p.title);
    dom::set_html(&w.document, MAIN_SUBTITLE_ID, p.subtitle);
    dom::set_body_background(&w.document, p.background);
}

fn wire_preset_radios(w: &SessionWiring) {
    let w2 = w.clone();
    dom::on_radio_change(&w.document, PRESET_RADIO_NAME, move || {
        if w2.session.borrow().phase() == Phase::Start {
            update_trip_info(&w2);
        }
    });
}

fn wire_start(w: &SessionWiring) {
    let w = w.clone();
    let document = w.document.clone();
    dom::add_click_listener(&document, START_BUTTON_ID, move || {
        if w.busy.get() || w.session.borrow().phase() != Phase::Start {
            return;
        }
        w.busy.set(true);
        screens::fade_out(&w.document, START_SCREEN_ID);
        let w2 = w.clone();
        spawn_local(async move {
            w2.experience.initialize_audio().await;
            let w3 = w2.clone();
            _ = dom::set_timeout(SCREEN_TRANSITION_MS, move || begin_experience(&w3));
        });
    });
}

fn begin_experience(w: &SessionWiring) {
    w.busy.set(false);
    let mode = dom::checked_radio_value(&w.document, BINAURAL_RADIO_NAME)
        .map(|v| BinauralMode::from_key(&v))
        .unwrap_or_default();
    let ticket = {
        let mut session = w.session.borrow_mut();
        session.select_binaural(mode);
        session.begin()
    };
    let Some(ticket) = ticket else {
        return;
    };
    let selection = w.session.borrow().selection();

    screens::hide(&w.document, START_SCREEN_ID);
    screens::show(&w.document, EXPERIENCE_SCREEN_ID);
    w.experience.fit_to_layout();
    w.experience.select(selection.preset);
    w.experience.play(selection.preset, selection.binaural);

    let w2 = w.clone();
    let handle = dom::set_timeout(SESSION_MS, move || end_experience(&w2, ticket));
    w.end_timer.set(handle);
}

fn end_experience(w: &SessionWiring, ticket: SessionTicket) {
    if !w.session.borrow_mut().expire(ticket) {
        return;
    }
    w.end_timer.set(None);
    screens::fade_out(&w.document, EXPERIENCE_SCREEN_ID);
    w.experience.stop_audio();
    let w = w.clone();
    _ = dom::set_timeout(SCREEN_TRANSITION_MS, move || {
        screens::hide(&w.document, EXPERIENCE_SCREEN_ID);
        screens::show(&w.document, END_SCREEN_ID);
    });
}

fn wire_restart(w: &SessionWiring) {
    let w = w.clone();
    let document = w.document.clone();
    dom::add_click_listener(&document, RESTART_BUTTON_ID, move || {
        if w.busy.get() || !w.session.borrow_mut().restart() {
            return;
        }
        if let Some(handle) = w.end_timer.take() {
            dom::clear_timeout(handle);
        }
        w.experience.stop_audio();
        w.busy.set(true);
        screens::fade_out(&w.document, END_SCREEN_ID);
        let w2 = w.clone();
        _ = dom::set_timeout(SCREEN_TRANSITION_MS, move || {
            screens::hide(&w2.document, END_SCREEN_ID);
            screens::hide(&w2.document, EXPERIENCE_SCREEN_ID);
            screens::show(&w2.document, START_SCREEN_ID);
            reset_start_screen(&w2);
            w2.busy.set(false);
        });
    });
}
