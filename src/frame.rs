use crate::constants::FRAME_REPORT_SEC;
use crate::experience::Experience;
use crate::input::PointerState;
use instant::Instant;
use moodscape_core::FrameDriver;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub experience: Experience,
    pub pointer: Rc<RefCell<PointerState>>,
    pub last_report: Instant,
    pub frames_since_report: u32,
}

impl FrameContext {
    pub fn new(experience: Experience, pointer: Rc<RefCell<PointerState>>) -> Self {
        Self {
            experience,
            pointer,
            last_report: Instant::now(),
            frames_since_report: 0,
        }
    }

    pub fn frame(&mut self) {
        let pointer = *self.pointer.borrow();
        if !self
            .experience
            .step(FrameDriver::Internal, pointer.active_position())
        {
            return;
        }

        self.frames_since_report += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= FRAME_REPORT_SEC {
            log::debug!(
                "[frame] fps={:.1} particles={} preset={}",
                self.frames_since_report as f32 / elapsed,
                self.experience.particle_count(),
                self.experience.current_preset()
            );
            self.last_report = Instant::now();
            self.frames_since_report = 0;
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
