use crate::context::Context;
use crate::element::{ElementBase, Pulsing, SceneElement};
use crate::render::Surface;
use crate::sprite_sheet::SpriteAnimation;

/// Shows the current frame of a sprite sheet.
pub struct Sprite {
    base: ElementBase,
    sheet: SpriteAnimation,
}

pub type PulsingImage = Pulsing<Sprite>;

impl Sprite {
    pub fn new(sheet: SpriteAnimation, ctx: &Context) -> Self {
        let base = ElementBase::new(sheet.frame_size().as_vec2(), ctx);
        Self { base, sheet }
    }

    pub fn sheet(&self) -> &SpriteAnimation {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut SpriteAnimation {
        &mut self.sheet
    }

    /// Swaps the sheet. The element keeps its current size.
    pub fn set_sheet(&mut self, sheet: SpriteAnimation) -> &mut Self {
        self.sheet = sheet;
        self
    }
}

impl SceneElement for Sprite {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn render(&self) -> Vec<Surface> {
        vec![self.sheet.extract()]
    }

    fn tick(&mut self, dt: f32, _ctx: &Context) {
        self.base.update(dt);
        self.sheet.tick(dt);
    }
}
