//! Canvas 2D backend
//!
//! Sprites are plain `<img>` elements created up front; until an image has
//! finished loading (or if it fails to) the entity is drawn as a flat shape.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Scene, SpriteKind, TextAlign};
use crate::sim::Bounds;

const SHIP_IMAGE: &str = "images/spaceship.png";
const ASTEROID_IMAGE: &str = "images/asteroid.png";
const BOSS_IMAGE: &str = "images/boss.webp";

const SHIP_FALLBACK: Color = [0.3, 0.7, 1.0, 1.0];
const ASTEROID_FALLBACK: Color = [0.55, 0.45, 0.35, 1.0];
const BOSS_FALLBACK: Color = [0.7, 0.1, 0.6, 1.0];
const BOSS_SHOT_COLOR: Color = [1.0, 0.3, 0.1, 1.0];

struct Sprites {
    ship: Option<HtmlImageElement>,
    asteroid: Option<HtmlImageElement>,
    boss: Option<HtmlImageElement>,
}

impl Sprites {
    fn load() -> Self {
        Self {
            ship: load_image(SHIP_IMAGE),
            asteroid: load_image(ASTEROID_IMAGE),
            boss: load_image(BOSS_IMAGE),
        }
    }

    fn get(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
        let image = match kind {
            SpriteKind::Ship => self.ship.as_ref(),
            SpriteKind::Asteroid => self.asteroid.as_ref(),
            SpriteKind::Boss => self.boss.as_ref(),
            SpriteKind::BossShot => None,
        }?;
        (image.complete() && image.natural_width() > 0).then_some(image)
    }
}

fn load_image(src: &str) -> Option<HtmlImageElement> {
    match HtmlImageElement::new() {
        Ok(image) => {
            image.set_src(src);
            Some(image)
        }
        Err(e) => {
            log::warn!("Could not create image for {}: {:?}", src, e);
            None
        }
    }
}

fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Draws into a `<canvas>` scaled so the playfield fills it
pub struct CanvasScene {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    /// Canvas pixels per playfield unit
    scale: f64,
    size: (f64, f64),
}

impl CanvasScene {
    pub fn new(canvas: &HtmlCanvasElement, playfield: Vec2) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let size = (f64::from(canvas.width()), f64::from(canvas.height()));
        let scale = (size.0 / f64::from(playfield.x)).min(size.1 / f64::from(playfield.y));
        log::info!("Canvas {}x{} (scale {:.2})", size.0, size.1, scale);

        Ok(Self {
            ctx,
            sprites: Sprites::load(),
            scale,
            size,
        })
    }

    /// Top-left corner and size in canvas pixels
    fn to_canvas(&self, bounds: Bounds) -> (f64, f64, f64, f64) {
        let min = bounds.min();
        (
            f64::from(min.x) * self.scale,
            f64::from(min.y) * self.scale,
            f64::from(bounds.size.x) * self.scale,
            f64::from(bounds.size.y) * self.scale,
        )
    }

    fn fill_circle(&self, bounds: Bounds, color: Color) {
        let center = bounds.center;
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            f64::from(center.x) * self.scale,
            f64::from(center.y) * self.scale,
            f64::from(bounds.hit_radius()) * self.scale,
            0.0,
            TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }
}

impl Scene for CanvasScene {
    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(0.0, 0.0, self.size.0, self.size.1);
    }

    fn draw_sprite(&mut self, kind: SpriteKind, bounds: Bounds) {
        if let Some(image) = self.sprites.get(kind) {
            let (x, y, w, h) = self.to_canvas(bounds);
            if self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
                .is_ok()
            {
                return;
            }
        }

        match kind {
            SpriteKind::Ship => self.fill_rect(bounds, SHIP_FALLBACK),
            SpriteKind::Boss => self.fill_rect(bounds, BOSS_FALLBACK),
            SpriteKind::Asteroid => self.fill_circle(bounds, ASTEROID_FALLBACK),
            SpriteKind::BossShot => self.fill_circle(bounds, BOSS_SHOT_COLOR),
        }
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        let (x, y, w, h) = self.to_canvas(bounds);
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(x, y, w, h);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color) {
        let align = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        self.ctx
            .set_font(&format!("bold {}px sans-serif", (f64::from(size_px) * self.scale).round()));
        self.ctx.set_text_align(align);
        self.ctx.set_fill_style_str(&css(color));
        if let Err(e) = self.ctx.fill_text(
            text,
            f64::from(pos.x) * self.scale,
            f64::from(pos.y) * self.scale,
        ) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
