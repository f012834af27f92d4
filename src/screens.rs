use crate::constants::{HIDDEN_CLASS, SCREEN_FADE_IN, SCREEN_FADE_OUT, TEXT_FADE_IN, TEXT_FADE_OUT};
use web_sys as web;

/// Unhide a screen and play its fade-in.
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.remove_1(HIDDEN_CLASS);
        _ = cl.remove_1(SCREEN_FADE_OUT);
        _ = cl.add_1(SCREEN_FADE_IN);
    }
}

pub fn fade_out(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.remove_1(SCREEN_FADE_IN);
        _ = cl.add_1(SCREEN_FADE_OUT);
    }
}

pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
    }
}

/// Swap the text fade classes on the intro copy.
pub fn fade_text(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        let (from, to) = if visible {
            (TEXT_FADE_OUT, TEXT_FADE_IN)
        } else {
            (TEXT_FADE_IN, TEXT_FADE_OUT)
        };
        _ = cl.remove_1(from);
        _ = cl.add_1(to);
    }
}
