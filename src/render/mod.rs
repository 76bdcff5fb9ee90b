//! Presentation layer
//!
//! The sim never touches pixels. A [`Scene`] is the drawing surface;
//! [`draw_frame`] walks the game state and the HUD snapshot and issues draw
//! calls in back-to-front order.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasScene;

use glam::Vec2;

use crate::hud::HudSnapshot;
use crate::sim::{Bounds, GameState, HasBounds};

/// RGBA, 0..=1 per channel
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [0.02, 0.02, 0.08, 1.0];
pub const BULLET_COLOR: Color = [1.0, 0.9, 0.2, 1.0];
pub const HUD_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
pub const HP_BAR_BACK: Color = [0.3, 0.05, 0.05, 1.0];
pub const HP_BAR_FILL: Color = [0.9, 0.15, 0.15, 1.0];
pub const BANNER_COLOR: Color = [1.0, 0.85, 0.1, 1.0];

const HUD_FONT_PX: f32 = 24.0;
const HUD_MARGIN: f32 = 20.0;
const BANNER_FONT_PX: f32 = 72.0;
const HINT_FONT_PX: f32 = 24.0;

/// Entities drawn from an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Ship,
    Asteroid,
    Boss,
    BossShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A 2D drawing surface in playfield coordinates
pub trait Scene {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    /// Draw the sprite for `kind` stretched over `bounds`
    fn draw_sprite(&mut self, kind: SpriteKind, bounds: Bounds);

    fn fill_rect(&mut self, bounds: Bounds, color: Color);

    /// `pos` is the text baseline anchor
    fn draw_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color);
}

/// Draw one complete frame
pub fn draw_frame(scene: &mut impl Scene, state: &GameState, hud: &HudSnapshot) {
    scene.clear(BACKGROUND);

    for asteroid in &state.asteroids {
        scene.draw_sprite(SpriteKind::Asteroid, asteroid.bounds());
    }

    if state.boss.is_engaged() {
        scene.draw_sprite(SpriteKind::Boss, state.boss.bounds());
    }

    for shot in &state.boss_shots {
        scene.draw_sprite(SpriteKind::BossShot, shot.bounds());
    }

    for bullet in &state.bullets {
        scene.fill_rect(bullet.bounds(), BULLET_COLOR);
    }

    scene.draw_sprite(SpriteKind::Ship, state.ship.bounds());

    draw_hud(scene, state.screen(), hud);
}

fn draw_hud(scene: &mut impl Scene, screen: Vec2, hud: &HudSnapshot) {
    let top = HUD_MARGIN + HUD_FONT_PX;
    scene.draw_text(
        &hud.shots_text(),
        Vec2::new(HUD_MARGIN, top),
        HUD_FONT_PX,
        TextAlign::Left,
        HUD_TEXT,
    );
    scene.draw_text(
        &hud.time_text(),
        Vec2::new(screen.x - HUD_MARGIN, top),
        HUD_FONT_PX,
        TextAlign::Right,
        HUD_TEXT,
    );

    if let Some(bar) = &hud.hp_bar {
        scene.fill_rect(bar.frame, HP_BAR_BACK);
        if bar.fraction > 0.0 {
            scene.fill_rect(bar.fill(), HP_BAR_FILL);
        }
    }

    if let Some(banner) = hud.banner {
        let center = screen / 2.0;
        scene.draw_text(
            banner.text(),
            center,
            BANNER_FONT_PX,
            TextAlign::Center,
            BANNER_COLOR,
        );
        if let Some(hint) = hud.hint {
            scene.draw_text(
                hint,
                center + Vec2::new(0.0, BANNER_FONT_PX),
                HINT_FONT_PX,
                TextAlign::Center,
                HUD_TEXT,
            );
        }
    }
}
