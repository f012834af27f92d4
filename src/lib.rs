#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod dom;
mod events;
mod experience;
mod frame;
mod input;
mod screens;
mod session;

pub use experience::{current_experience, Experience};

fn wire_canvas_resize(experience: &Experience) {
    let experience = experience.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        experience.fit_to_layout();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("moodscape starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let experience = Experience::from_canvas(&canvas)?;
    experience.install();
    wire_canvas_resize(&experience);

    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        experience.clone(),
        pointer,
    )));
    frame::start_loop(frame_ctx);

    session::wire_session(session::SessionWiring::new(document, experience));
    Ok(())
}
