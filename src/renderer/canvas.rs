//! Canvas 2D painter

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{Scene, Sprite, css_color};

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Grab the canvas' 2D context; `None` if the browser refuses one
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Clear the surface and draw `scene` on it
    pub fn paint(&self, scene: &Scene) {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            scene.surface.width as f64,
            scene.surface.height as f64,
        );

        self.fill(&scene.player);
        for sprite in &scene.obstacles {
            self.fill(sprite);
        }

        for label in &scene.labels {
            ctx.set_fill_style_str(&css_color(label.color));
            ctx.set_font(label.font);
            if let Err(e) = ctx.fill_text(&label.text, label.pos.x as f64, label.pos.y as f64) {
                log::warn!("fill_text failed: {:?}", e);
            }
        }
    }

    fn fill(&self, sprite: &Sprite) {
        let r = &sprite.rect;
        self.ctx.set_fill_style_str(&css_color(sprite.color));
        self.ctx.fill_rect(
            r.left() as f64,
            r.top() as f64,
            r.size.x as f64,
            r.size.y as f64,
        );
    }
}
