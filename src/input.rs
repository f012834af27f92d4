use glam::Vec2;
use web_sys as web;

/// Latest primary pointer, in CSS pixels relative to the canvas.
#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

impl PointerState {
    /// Spawn origin for this frame: the pointer position while pressed.
    #[inline]
    pub fn active_position(&self) -> Option<Vec2> {
        self.down.then(|| Vec2::new(self.x, self.y))
    }
}

#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Vec2::new(x_css, y_css)
}
