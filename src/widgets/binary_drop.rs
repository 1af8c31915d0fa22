use super::TextDisplay;
use crate::config::PaletteRole;
use crate::context::Context;
use crate::element::{ElementBase, SceneElement};
use crate::font::FontSettings;
use crate::geometry::{Anchor, WrapFlags};
use crate::render::{lerp_color, Color, Surface};
use glam::Vec2;
use rand::Rng;
use std::ops::RangeInclusive;

pub const DROP_SPEED: RangeInclusive<f32> = 50.0..=250.0;
pub const DROP_ZOOM: RangeInclusive<f32> = 0.3..=1.2;
pub const CHAIN_LENGTH: RangeInclusive<usize> = 5..=15;

/// Falling column of random bits used as a backdrop. Leaving the bottom of
/// its holder respawns it above the top with a new depth.
pub struct BinaryDropText {
    text: TextDisplay,
    depth: f32,
    speed: f32,
    near: Color,
    far: Color,
}

fn lerp(range: &RangeInclusive<f32>, t: f32) -> f32 {
    range.start() + t * (range.end() - range.start())
}

impl BinaryDropText {
    pub fn new(font: FontSettings, ctx: &Context) -> Self {
        let mut text = TextDisplay::new(font, "", ctx);
        text.base_mut().set_anchor(Anchor::MidTop);
        let mut drop = Self {
            text,
            depth: 0.0,
            speed: 0.0,
            near: ctx.color(PaletteRole::ForegroundAlt),
            far: ctx.color(PaletteRole::Background),
        };
        drop.respawn();
        drop
    }

    /// 0 is far away (small, slow, faded), 1 is close.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn display(&self) -> &TextDisplay {
        &self.text
    }

    pub fn respawn(&mut self) {
        let mut rng = rand::thread_rng();
        self.depth = rng.gen::<f32>();
        let length = rng.gen_range(CHAIN_LENGTH);
        let bits: Vec<&str> = (0..length).map(|_| if rng.gen_bool(0.5) { "1" } else { "0" }).collect();
        self.text.set_content(bits.join("\n"));

        let zoom = lerp(&DROP_ZOOM, self.depth);
        self.text.base_mut().set_zoom(Vec2::splat(zoom));

        let width = self.text.base().canvas().width().max(0.0);
        let x = rng.gen_range(0.0..=width).round();
        let height = self.text.base().size().y;
        self.text.base_mut().set_position(Vec2::new(x, -height));

        self.speed = lerp(&DROP_SPEED, self.depth);
        let color = lerp_color(self.far, self.near, self.depth);
        self.text.font_mut().set_color(color);
    }
}

impl SceneElement for BinaryDropText {
    fn base(&self) -> &ElementBase {
        self.text.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.text.base_mut()
    }

    fn render(&self) -> Vec<Surface> {
        self.text.render()
    }

    fn refresh(&mut self) {
        self.text.refresh();
    }

    fn tick(&mut self, dt: f32, _ctx: &Context) {
        self.text.base_mut().update(dt);
        let wrapped = self.text.move_by(Vec2::new(0.0, self.speed * dt), WrapFlags::Y, None);
        if wrapped.contains(WrapFlags::Y) {
            self.respawn();
        }
    }

    fn drawing_position(&self, index: usize) -> Vec2 {
        self.text.drawing_position(index)
    }
}
