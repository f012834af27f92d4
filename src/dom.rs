use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        add_listener(&el, "click", handler);
    } else {
        log::warn!("[dom] missing #{}", element_id);
    }
}

pub fn add_listener(target: &web::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `f` once after `ms` milliseconds. Returns the handle for `clear_timeout`.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web::window()?;
    let callback = Closure::once_into_js(f);
    match window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("[dom] setTimeout error: {:?}", e);
            None
        }
    }
}

pub fn clear_timeout(handle: i32) {
    if let Some(w) = web::window() {
        w.clear_timeout_with_handle(handle);
    }
}

/// Value of the checked radio button in group `name`.
pub fn checked_radio_value(document: &web::Document, name: &str) -> Option<String> {
    let selector = format!("input[name=\"{}\"]:checked", name);
    let el = document.query_selector(&selector).ok().flatten()?;
    el.dyn_into::<web::HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}

pub fn check_radio(document: &web::Document, element_id: &str) {
    if let Some(input) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_checked(true);
    }
}

/// Attach `handler` to the `change` event of every radio in group `name`.
pub fn on_radio_change(document: &web::Document, name: &str, handler: impl Fn() + 'static) {
    let selector = format!("input[name=\"{}\"]", name);
    let Ok(radios) = document.query_selector_all(&selector) else {
        return;
    };
    let handler = std::rc::Rc::new(handler);
    for i in 0..radios.length() {
        if let Some(node) = radios.get(i) {
            let h = handler.clone();
            add_listener(&node, "change", move || h());
        }
    }
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        el.set_inner_text(text);
    }
}

pub fn set_html(document: &web::Document, element_id: &str, html: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_inner_html(html);
    }
}

pub fn set_body_background(document: &web::Document, image: &str) {
    if let Some(body) = document.body() {
        _ = body
            .style()
            .set_property("background-image", &format!("url('{}')", image));
    }
}

/// Size the canvas backing store to `width` x `height` CSS pixels times the
/// device pixel ratio. Returns the ratio used.
pub fn set_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: f32, height: f32) -> f64 {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let w_px = (width as f64 * dpr) as u32;
    let h_px = (height as f64 * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    dpr
}
