use super::{ElementBase, ElementGroup, Hoverable, SceneElement, Typable};
use crate::animation::{Animation, EndBehavior};
use crate::context::Context;
use crate::geometry::{Rect, WrapFlags};
use crate::pulse::PulseSettings;
use crate::render::{Canvas, Surface};
use glam::Vec2;
use std::ops::{Deref, DerefMut};

pub const PULSE_ANIMATION: &str = "pulse";

/// Elements whose zoom is driven by a periodic pulse.
pub trait Pulsable: SceneElement {
    fn pulse_settings(&self) -> &PulseSettings;
    fn set_pulse_settings(&mut self, settings: PulseSettings);
}

/// Wraps any element and overwrites its zoom every tick with
/// `settings.compute(progress)`.
pub struct Pulsing<E> {
    inner: E,
    settings: PulseSettings,
}

fn pulse_animation(settings: &PulseSettings) -> Animation {
    Animation::new(settings.period()).with_end_behavior(EndBehavior::Reverse).started()
}

impl<E: SceneElement> Pulsing<E> {
    pub fn new(inner: E) -> Self {
        Self::with_settings(inner, PulseSettings::default())
    }

    pub fn with_settings(mut inner: E, settings: PulseSettings) -> Self {
        inner.base_mut().add_animation(PULSE_ANIMATION, pulse_animation(&settings));
        Self { inner, settings }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }

    fn rebind_base(&mut self) {
        let zoom = self.inner.base().zoom();
        self.settings.set_base(zoom);
    }
}

impl<E> Deref for Pulsing<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.inner
    }
}

impl<E> DerefMut for Pulsing<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.inner
    }
}

impl<E: SceneElement + 'static> Pulsable for Pulsing<E> {
    fn pulse_settings(&self) -> &PulseSettings {
        &self.settings
    }

    /// Restarts the pulse clock with the new period.
    fn set_pulse_settings(&mut self, settings: PulseSettings) {
        self.inner.base_mut().add_animation(PULSE_ANIMATION, pulse_animation(&settings));
        self.settings = settings;
    }
}

impl<E: SceneElement + 'static> SceneElement for Pulsing<E> {
    fn base(&self) -> &ElementBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.inner.base_mut()
    }

    fn render(&self) -> Vec<Surface> {
        self.inner.render()
    }

    fn refresh(&mut self) {
        self.inner.refresh();
    }

    fn tick(&mut self, dt: f32, ctx: &Context) {
        self.inner.tick(dt, ctx);
        let t = self.inner.base().animation(PULSE_ANIMATION).map_or(0.0, Animation::progress);
        let zoom = self.settings.compute(t);
        self.inner.base_mut().set_zoom(zoom);
    }

    fn drawing_position(&self, index: usize) -> Vec2 {
        self.inner.drawing_position(index)
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.inner.draw(canvas);
    }

    fn move_by(&mut self, delta: Vec2, wrap: WrapFlags, holder: Option<Rect>) -> WrapFlags {
        self.inner.move_by(delta, wrap, holder)
    }

    fn set_relative_pos(&mut self, rel: Vec2, holder: Option<Rect>) {
        self.inner.set_relative_pos(rel, holder);
    }

    fn set_relative_width(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.inner.set_relative_width(rel, keep_ratio, holder);
        self.rebind_base();
    }

    fn set_relative_height(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.inner.set_relative_height(rel, keep_ratio, holder);
        self.rebind_base();
    }

    fn set_holder(&mut self, holder: Option<Rect>) {
        self.inner.set_holder(holder);
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        self.inner.as_hoverable()
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        self.inner.as_hoverable_mut()
    }

    fn as_typable_mut(&mut self) -> Option<&mut dyn Typable> {
        self.inner.as_typable_mut()
    }

    fn as_pulsable_mut(&mut self) -> Option<&mut dyn Pulsable> {
        Some(self)
    }

    fn as_group(&self) -> Option<&ElementGroup> {
        self.inner.as_group()
    }

    fn as_group_mut(&mut self) -> Option<&mut ElementGroup> {
        self.inner.as_group_mut()
    }
}
