use super::Sprite;
use crate::animation::{Animation, EndBehavior};
use crate::context::Context;
use crate::element::hover::{click, enter, leave};
use crate::element::{ElementBase, HoverState, Hoverable, SceneElement};
use crate::geometry::Rect;
use crate::input::MouseButton;
use crate::render::Surface;
use crate::sprite_sheet::SpriteAnimation;
use glam::Vec2;
use std::f32::consts::PI;

pub const HOVER_ANIMATION: &str = "hover";
pub const CLICK_ANIMATION: &str = "click";

/// Clickable sprite. Grows while hovered, bounces on click and runs its
/// callback once the bounce finishes.
pub struct Button {
    sprite: Sprite,
    hover: HoverState,
    base_scale: Vec2,
    amplify: f32,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(sheet: SpriteAnimation, ctx: &Context) -> Self {
        let settings = ctx.button();
        let mut sprite = Sprite::new(sheet, ctx);
        sprite
            .base_mut()
            .add_animation(HOVER_ANIMATION, Animation::new(settings.hover_duration).with_end_behavior(EndBehavior::Pause))
            .add_animation(CLICK_ANIMATION, Animation::new(settings.click_duration).with_end_behavior(EndBehavior::Reset));
        Self { sprite, hover: HoverState::default(), base_scale: Vec2::ONE, amplify: settings.hover_amplify, on_click: None }
    }

    pub fn with_callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_callback(callback);
        self
    }

    pub fn set_callback(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    /// Zoom the hover and click effects are added on top of.
    pub fn base_scale(&self) -> Vec2 {
        self.base_scale
    }

    pub fn set_base_scale(&mut self, scale: Vec2) -> &mut Self {
        self.base_scale = scale;
        self.sprite.base_mut().set_zoom(scale);
        self
    }

    pub fn amplify(&self) -> f32 {
        self.amplify
    }

    pub fn set_amplify(&mut self, amplify: f32) -> &mut Self {
        self.amplify = amplify;
        self
    }

    fn effect_scale(&self) -> Option<f32> {
        let base = self.sprite.base();
        let hover = base.animation(HOVER_ANIMATION)?;
        if !self.hover.is_hovered() && !hover.is_running() {
            return None;
        }
        match base.animation(CLICK_ANIMATION) {
            Some(click) if click.is_running() => {
                Some(self.amplify - self.amplify * (PI * click.progress_percent()).sin())
            }
            _ => Some(hover.progress_percent() * self.amplify),
        }
    }
}

impl SceneElement for Button {
    fn base(&self) -> &ElementBase {
        self.sprite.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.sprite.base_mut()
    }

    fn render(&self) -> Vec<Surface> {
        self.sprite.render()
    }

    fn tick(&mut self, dt: f32, _ctx: &Context) {
        let completed = self.sprite.base_mut().update(dt);
        self.sprite.sheet_mut().tick(dt);

        if completed.iter().any(|name| name == CLICK_ANIMATION) {
            if let Some(callback) = self.on_click.as_mut() {
                callback();
            }
        }
        let shrunk_back = completed.iter().any(|name| name == HOVER_ANIMATION)
            && self.sprite.base().animation(HOVER_ANIMATION).is_some_and(|anim| anim.speed() < 0.0);
        if shrunk_back {
            let scale = self.base_scale;
            self.sprite.base_mut().set_zoom(scale);
        }

        if let Some(extra) = self.effect_scale() {
            let scale = self.base_scale + Vec2::splat(extra);
            self.sprite.base_mut().set_zoom(scale);
        }
    }

    fn set_relative_width(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.sprite.set_relative_width(rel, keep_ratio, holder);
        self.base_scale = self.sprite.base().zoom();
    }

    fn set_relative_height(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.sprite.set_relative_height(rel, keep_ratio, holder);
        self.base_scale = self.sprite.base().zoom();
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        Some(self)
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }
}

impl Hoverable for Button {
    fn hover(&self) -> &HoverState {
        &self.hover
    }

    fn hover_mut(&mut self) -> &mut HoverState {
        &mut self.hover
    }

    fn on_mouse_enter(&mut self) {
        enter(self);
        if self.hover.is_hovered() && self.amplify != 0.0 {
            if let Some(anim) = self.sprite.base_mut().animation_mut(HOVER_ANIMATION) {
                anim.set_speed(1.0).start();
            }
        }
    }

    fn on_mouse_leave(&mut self) {
        leave(self);
        if self.hover.is_enabled() && self.amplify != 0.0 {
            if let Some(anim) = self.sprite.base_mut().animation_mut(HOVER_ANIMATION) {
                anim.set_speed(-1.0).start();
            }
        }
    }

    fn on_mouse_click(&mut self, pos: Vec2, button: MouseButton, frame: u64) -> bool {
        let accepted = click(self, pos, button, frame);
        if accepted {
            if let Some(anim) = self.sprite.base_mut().animation_mut(CLICK_ANIMATION) {
                anim.start();
            }
        }
        accepted
    }
}
