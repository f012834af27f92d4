use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
}

/// Track the primary pointer. Mouse buttons and the first touch both count
/// as "pressed"; extra touches are ignored.
pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointer_release(&w, "pointerup");
    wire_pointer_release(&w, "pointercancel");
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        {
            let mut ps = w.pointer.borrow_mut();
            ps.x = pos.x;
            ps.y = pos.y;
            ps.down = true;
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        let mut ps = w.pointer.borrow_mut();
        ps.x = pos.x;
        ps.y = pos.y;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointer_release(w: &PointerWiring, event: &str) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        w.pointer.borrow_mut().down = false;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
