use glam::Vec2;
use moodscape_core::{Hsba, Painter};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// `Painter` over a 2D canvas context. Coordinates are CSS pixels; the
/// device pixel ratio is folded into the context transform.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.set_line_cap("round");
        Ok(Self { ctx })
    }

    /// Reapply the pixel-ratio transform. Resizing a canvas resets it.
    pub fn set_pixel_ratio(&self, dpr: f64) {
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.set_line_cap("round");
    }

    #[allow(deprecated)]
    fn set_fill(&self, css: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(css));
    }

    #[allow(deprecated)]
    fn set_stroke(&self, css: &str) {
        self.ctx.set_stroke_style(&JsValue::from_str(css));
    }
}

impl Painter for CanvasPainter {
    fn fade(&mut self, width: f32, height: f32, alpha: f32) {
        self.set_fill(&format!("rgba(0,0,0,{:.3})", alpha));
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Hsba) {
        self.ctx.begin_path();
        let radius = (diameter * 0.5).max(0.0) as f64;
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.set_fill(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, weight: f32, color: Hsba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_line_width(weight as f64);
        self.set_stroke(&color.to_css());
        self.ctx.stroke();
    }
}
