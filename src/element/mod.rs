//! Positioned-element model shared by every widget.

mod group;
pub mod hover;
mod pulsing;
mod typing;

pub use group::ElementGroup;
pub use hover::{HoverState, Hoverable};
pub use pulsing::{Pulsable, Pulsing, PULSE_ANIMATION};
pub use typing::Typable;

use crate::animation::Animation;
use crate::context::Context;
use crate::error::{SceneError, SceneResult};
use crate::events::{ElementEvent, Listener, Listeners};
use crate::geometry::{anchor_point, set_anchor_point, wrap_within, Anchor, Rect, WrapFlags};
use crate::render::{Canvas, Surface};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::any::Any;
use std::f32::consts::PI;
use std::fmt;

pub const SHAKE_ANIMATION: &str = "shake";

/// Names of the animations that reached a bound during one update.
pub type CompletedAnimations = SmallVec<[String; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        ElementId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShakeMode {
    #[default]
    SmoothInOut,
    SmoothIn,
    Instant,
}

impl ShakeMode {
    /// Scales the shake offset as a function of animation progress in `[0, 1]`.
    pub fn envelope(self, progress: f32) -> f32 {
        match self {
            ShakeMode::SmoothInOut => (progress * PI).sin(),
            ShakeMode::SmoothIn => ((progress * 1.5).min(1.0) * PI / 2.0).sin(),
            ShakeMode::Instant => 1.0,
        }
    }
}

struct ShakeState {
    force: f32,
    mode: ShakeMode,
    return_pos: Vec2,
    then: Option<Box<dyn FnOnce()>>,
}

/// State every element carries: its anchored rectangle, zoom baseline, owned
/// animations and listeners.
pub struct ElementBase {
    id: ElementId,
    rect: Rect,
    original_size: Vec2,
    anchor: Anchor,
    canvas: Rect,
    holder: Option<Rect>,
    animations: Vec<(String, Animation)>,
    listeners: Listeners,
    shake: Option<ShakeState>,
}

impl ElementBase {
    /// New element centered on the canvas origin.
    pub fn new(size: Vec2, ctx: &Context) -> Self {
        let mut rect = Rect::from_size(size);
        set_anchor_point(&mut rect, Anchor::Center, Vec2::ZERO);
        Self {
            id: ctx.next_element_id(),
            rect,
            original_size: size,
            anchor: Anchor::Center,
            canvas: ctx.display(),
            holder: None,
            animations: Vec::new(),
            listeners: Listeners::default(),
            shake: None,
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.set_anchor(anchor);
        self
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        set_anchor_point(&mut self.rect, self.anchor, pos);
        self
    }

    pub fn at_relative(mut self, rel: Vec2) -> Self {
        let holder = self.holder();
        set_anchor_point(&mut self.rect, self.anchor, holder.min + rel * holder.size);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn size(&self) -> Vec2 {
        self.rect.size
    }

    pub fn original_size(&self) -> Vec2 {
        self.original_size
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Coordinate space for relative sizing and positioning. Falls back to the
    /// canvas when the element is not held by a group.
    pub fn holder(&self) -> Rect {
        self.holder.unwrap_or(self.canvas)
    }

    pub fn set_holder(&mut self, holder: Option<Rect>) -> &mut Self {
        self.holder = holder;
        self
    }

    pub fn has_holder(&self) -> bool {
        self.holder.is_some()
    }

    // ---------- listeners ----------

    pub fn on(&mut self, event: ElementEvent, listener: impl FnMut(&mut ElementBase) + 'static) -> &mut Self {
        let listener: Listener = Box::new(listener);
        self.listeners.on(event, listener);
        self
    }

    pub fn clear_listeners(&mut self, event: ElementEvent) -> &mut Self {
        self.listeners.clear(event);
        self
    }

    pub fn listener_count(&self, event: ElementEvent) -> usize {
        self.listeners.count(event)
    }

    pub fn emit(&mut self, event: ElementEvent) {
        let mut list = self.listeners.take(event);
        for listener in list.iter_mut() {
            listener(self);
        }
        self.listeners.restore(event, list);
    }

    // ---------- animations ----------

    /// Registers `animation` under `name`, replacing any previous one.
    pub fn add_animation(&mut self, name: impl Into<String>, animation: Animation) -> &mut Self {
        let name = name.into();
        match self.animations.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = animation,
            None => self.animations.push((name, animation)),
        }
        self
    }

    pub fn remove_animation(&mut self, name: &str) -> Option<Animation> {
        let index = self.animations.iter().position(|(n, _)| n == name)?;
        Some(self.animations.remove(index).1)
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn animation_mut(&mut self, name: &str) -> Option<&mut Animation> {
        self.animations.iter_mut().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    // ---------- position ----------

    /// Absolute canvas coordinates of the current anchor point.
    pub fn position(&self) -> Vec2 {
        anchor_point(&self.rect, self.anchor)
    }

    /// Anchor point relative to `holder` (defaults to the element's holder).
    pub fn position_in(&self, holder: Option<Rect>) -> Vec2 {
        let holder = holder.unwrap_or(self.holder());
        self.position() - holder.min
    }

    /// Changes the reference point without moving the element on screen.
    pub fn set_anchor(&mut self, anchor: Anchor) -> &mut Self {
        self.anchor = anchor;
        self.emit(ElementEvent::Move);
        self
    }

    pub fn set_position(&mut self, pos: Vec2) -> &mut Self {
        set_anchor_point(&mut self.rect, self.anchor, pos);
        self.emit(ElementEvent::Move);
        self
    }

    pub fn set_relative_pos(&mut self, rel: Vec2, holder: Option<Rect>) -> &mut Self {
        let holder = holder.unwrap_or(self.holder());
        self.set_position(holder.min + rel * holder.size)
    }

    pub fn set_absolute_pos(&mut self, pos: Vec2, holder: Option<Rect>) -> &mut Self {
        let holder = holder.unwrap_or(self.holder());
        self.set_position(holder.min + pos)
    }

    /// Runs `op` on the rectangle, then puts the anchor point back where it
    /// was.
    pub fn lock_position(&mut self, op: impl FnOnce(&mut Rect)) {
        let pos = anchor_point(&self.rect, self.anchor);
        op(&mut self.rect);
        set_anchor_point(&mut self.rect, self.anchor, pos);
    }

    /// Translates the element. Returns the axes on which it wrapped around
    /// `holder`.
    pub fn move_by(&mut self, delta: Vec2, wrap: WrapFlags, holder: Option<Rect>) -> WrapFlags {
        let holder = holder.unwrap_or(self.holder());
        self.rect.translate(delta);
        let wrapped = wrap_within(&mut self.rect, &holder, delta, wrap);
        self.emit(ElementEvent::Move);
        wrapped
    }

    // ---------- size ----------

    pub fn set_relative_width(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) -> &mut Self {
        let holder = holder.unwrap_or(self.holder());
        self.lock_position(|rect| {
            let old = rect.size.x;
            rect.size.x = rel * holder.width();
            if keep_ratio && old != 0.0 {
                rect.size.y *= rect.size.x / old;
            }
        });
        self.emit(ElementEvent::Resize);
        self
    }

    pub fn set_relative_height(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) -> &mut Self {
        let holder = holder.unwrap_or(self.holder());
        self.lock_position(|rect| {
            let old = rect.size.y;
            rect.size.y = rel * holder.height();
            if keep_ratio && old != 0.0 {
                rect.size.x *= rect.size.y / old;
            }
        });
        self.emit(ElementEvent::Resize);
        self
    }

    /// Size becomes `original_size * scale`. Negative results clamp to zero.
    pub fn set_zoom(&mut self, scale: Vec2) -> &mut Self {
        let size = (self.original_size * scale).max(Vec2::ZERO);
        self.lock_position(|rect| rect.size = size);
        self.emit(ElementEvent::Resize);
        self
    }

    pub fn zoom_by(&mut self, factor: Vec2) -> &mut Self {
        self.lock_position(|rect| rect.size = (rect.size * factor).max(Vec2::ZERO));
        self.emit(ElementEvent::Resize);
        self
    }

    pub fn zoom(&self) -> Vec2 {
        if self.original_size.x == 0.0 || self.original_size.y == 0.0 {
            return Vec2::ONE;
        }
        self.rect.size / self.original_size
    }

    /// Replaces the zoom baseline while keeping the current zoom factor.
    pub fn set_original_size(&mut self, size: Vec2) -> &mut Self {
        let zoom = self.zoom();
        self.original_size = size;
        self.set_zoom(zoom)
    }

    // ---------- shake ----------

    /// Jitters the element around its current position for `duration`
    /// seconds, then snaps it back and runs `then`. Calling again while a
    /// shake is registered re-arms the same animation.
    pub fn shake(
        &mut self,
        amplitude: f32,
        duration: f32,
        mode: ShakeMode,
        then: Option<Box<dyn FnOnce()>>,
    ) -> SceneResult<()> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(SceneError::InvalidDuration(duration));
        }
        let rearm = self.shake.as_ref().map(|state| state.return_pos);
        let return_pos = match (rearm, self.animation_mut(SHAKE_ANIMATION)) {
            (Some(pos), Some(anim)) => {
                let speed = anim.duration() / duration;
                anim.reset().set_speed(speed).start();
                pos
            }
            _ => {
                self.add_animation(SHAKE_ANIMATION, Animation::try_new(duration)?.started());
                self.position_in(None)
            }
        };
        self.shake = Some(ShakeState { force: amplitude, mode, return_pos, then });
        Ok(())
    }

    pub fn is_shaking(&self) -> bool {
        self.animation(SHAKE_ANIMATION).is_some_and(Animation::is_running)
    }

    /// Cancels a running shake and puts the element back in place. The
    /// pending callback is dropped.
    pub fn stop_shaking(&mut self) {
        let Some(anim) = self.animation_mut(SHAKE_ANIMATION) else {
            return;
        };
        let was_running = anim.is_running();
        anim.reset();
        if was_running {
            if let Some(state) = self.shake.as_mut() {
                state.then = None;
                let pos = state.return_pos;
                self.set_absolute_pos(pos, None);
            }
        }
    }

    // ---------- frame update ----------

    /// Advances owned animations, applies the shake offset and emits `Tick`.
    pub fn update(&mut self, dt: f32) -> CompletedAnimations {
        let mut completed = CompletedAnimations::new();
        for (name, animation) in self.animations.iter_mut() {
            if animation.tick(dt) {
                completed.push(name.clone());
            }
        }

        if completed.iter().any(|name| name == SHAKE_ANIMATION) {
            self.finish_shake();
        } else if let Some(target) = self.shake_target() {
            self.set_absolute_pos(target, None);
        }

        self.emit(ElementEvent::Tick);
        completed
    }

    fn shake_target(&self) -> Option<Vec2> {
        let anim = self.animation(SHAKE_ANIMATION).filter(|anim| anim.is_running())?;
        let state = self.shake.as_ref()?;
        let strength = state.force * state.mode.envelope(anim.progress_percent());
        let mut rng = rand::thread_rng();
        let jitter = Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)) * strength;
        Some(state.return_pos + jitter)
    }

    fn finish_shake(&mut self) {
        if let Some(anim) = self.animation_mut(SHAKE_ANIMATION) {
            anim.pause();
        }
        let Some(state) = self.shake.as_mut() else {
            return;
        };
        let pos = state.return_pos;
        let then = state.then.take();
        self.set_absolute_pos(pos, None);
        if let Some(callback) = then {
            callback();
        }
    }
}

impl fmt::Debug for ElementBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBase")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("original_size", &self.original_size)
            .field("anchor", &self.anchor)
            .field("holder", &self.holder)
            .field("animations", &self.animations.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>())
            .field("listeners", &self.listeners)
            .finish()
    }
}

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Render/tick/draw contract plus capability queries. Concrete widgets opt
/// into `Hoverable`, `Typable` and `Pulsable` by overriding the matching
/// `as_*` accessor.
pub trait SceneElement: AsAny {
    fn base(&self) -> &ElementBase;
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Surfaces to blit this frame, unscaled.
    fn render(&self) -> Vec<Surface>;

    /// Rebuilds cached state that `render` depends on. Called before every draw.
    fn refresh(&mut self) {}

    fn tick(&mut self, dt: f32, _ctx: &Context) {
        self.base_mut().update(dt);
    }

    fn drawing_position(&self, _index: usize) -> Vec2 {
        self.base().rect().min
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        draw_surfaces(self, canvas);
    }

    fn move_by(&mut self, delta: Vec2, wrap: WrapFlags, holder: Option<Rect>) -> WrapFlags {
        self.base_mut().move_by(delta, wrap, holder)
    }

    fn set_relative_pos(&mut self, rel: Vec2, holder: Option<Rect>) {
        self.base_mut().set_relative_pos(rel, holder);
    }

    fn set_relative_width(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.base_mut().set_relative_width(rel, keep_ratio, holder);
    }

    fn set_relative_height(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.base_mut().set_relative_height(rel, keep_ratio, holder);
    }

    fn set_holder(&mut self, holder: Option<Rect>) {
        self.base_mut().set_holder(holder);
    }

    fn id(&self) -> ElementId {
        self.base().id()
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        None
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        None
    }

    fn as_typable_mut(&mut self) -> Option<&mut dyn Typable> {
        None
    }

    fn as_pulsable_mut(&mut self) -> Option<&mut dyn Pulsable> {
        None
    }

    fn as_group(&self) -> Option<&ElementGroup> {
        None
    }

    fn as_group_mut(&mut self) -> Option<&mut ElementGroup> {
        None
    }
}

impl dyn SceneElement {
    pub fn downcast_ref<T: SceneElement + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: SceneElement + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Default draw: refresh, render, then blit every surface at its drawing
/// position scaled by the current zoom.
pub fn draw_surfaces<E: SceneElement + ?Sized>(element: &mut E, canvas: &mut dyn Canvas) {
    element.refresh();
    let scale = element.base().zoom();
    for (index, surface) in element.render().iter().enumerate() {
        canvas.blit(surface, element.drawing_position(index), scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_context;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn base(size: Vec2) -> ElementBase {
        ElementBase::new(size, &test_context())
    }

    #[test]
    fn ids_are_unique_within_a_context() {
        let ctx = test_context();
        let a = ElementBase::new(Vec2::ONE, &ctx);
        let b = ElementBase::new(Vec2::ONE, &ctx);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn set_anchor_keeps_rect_in_place() {
        let mut el = base(Vec2::new(40.0, 20.0)).at(Vec2::new(100.0, 100.0));
        let before = el.rect();
        el.set_anchor(Anchor::TopLeft);
        assert_eq!(el.rect(), before);
        assert_eq!(el.position(), Vec2::new(80.0, 90.0));
        el.set_position(Vec2::new(0.0, 0.0));
        assert_eq!(el.rect().min, Vec2::ZERO);
    }

    #[test]
    fn every_anchor_reexpresses_the_same_rect() {
        let cases = [
            (Anchor::TopLeft, Vec2::new(80.0, 90.0)),
            (Anchor::MidTop, Vec2::new(100.0, 90.0)),
            (Anchor::TopRight, Vec2::new(120.0, 90.0)),
            (Anchor::MidLeft, Vec2::new(80.0, 100.0)),
            (Anchor::Center, Vec2::new(100.0, 100.0)),
            (Anchor::MidRight, Vec2::new(120.0, 100.0)),
            (Anchor::BottomLeft, Vec2::new(80.0, 110.0)),
            (Anchor::MidBottom, Vec2::new(100.0, 110.0)),
            (Anchor::BottomRight, Vec2::new(120.0, 110.0)),
        ];
        let mut el = base(Vec2::new(40.0, 20.0)).at(Vec2::new(100.0, 100.0));
        let before = el.rect();
        for (anchor, point) in cases {
            el.set_anchor(anchor);
            assert_eq!(el.rect(), before, "{anchor:?}");
            assert_eq!(el.position(), point, "{anchor:?}");
            el.set_position(point);
            assert_eq!(el.rect(), before, "{anchor:?}");
        }
    }

    #[test]
    fn zoom_is_relative_to_original_size() {
        let mut el = base(Vec2::new(40.0, 20.0)).at(Vec2::new(50.0, 50.0));
        el.set_zoom(Vec2::splat(2.0));
        el.zoom_by(Vec2::splat(1.5));
        el.set_relative_width(0.5, true, None);
        assert_eq!(el.position(), Vec2::new(50.0, 50.0));
        el.set_zoom(Vec2::ONE);
        assert_eq!(el.size(), el.original_size());
        assert_eq!(el.zoom(), Vec2::ONE);
    }

    #[test]
    fn negative_zoom_collapses_to_zero() {
        let mut el = base(Vec2::new(10.0, 10.0));
        el.set_zoom(Vec2::new(-1.0, 0.5));
        assert_eq!(el.size(), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn relative_width_keeps_ratio() {
        let mut el = base(Vec2::new(40.0, 20.0)).with_anchor(Anchor::TopLeft);
        el.set_relative_width(0.1, true, Some(Rect::from_size(Vec2::new(800.0, 600.0))));
        assert_eq!(el.size(), Vec2::new(80.0, 40.0));
        el.set_relative_height(0.1, false, None);
        assert_eq!(el.size(), Vec2::new(80.0, 60.0));
        assert_eq!(el.zoom(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn set_original_size_preserves_zoom() {
        let mut el = base(Vec2::new(10.0, 10.0));
        el.set_zoom(Vec2::splat(2.0));
        el.set_original_size(Vec2::new(30.0, 5.0));
        assert_eq!(el.size(), Vec2::new(60.0, 10.0));
    }

    #[test]
    fn relative_pos_uses_holder() {
        let mut el = base(Vec2::new(10.0, 10.0)).with_anchor(Anchor::TopLeft);
        el.set_holder(Some(Rect::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0))));
        el.set_relative_pos(Vec2::new(0.5, 0.5), None);
        assert_eq!(el.position(), Vec2::new(200.0, 150.0));
        assert_eq!(el.position_in(None), Vec2::new(100.0, 50.0));
        el.set_absolute_pos(Vec2::new(10.0, 0.0), None);
        assert_eq!(el.position(), Vec2::new(110.0, 100.0));
    }

    #[test]
    fn listeners_fire_in_order_with_element_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut el = base(Vec2::new(10.0, 10.0)).with_anchor(Anchor::TopLeft);
        let first = Rc::clone(&seen);
        el.on(ElementEvent::Move, move |b| first.borrow_mut().push(("first", b.position())));
        let second = Rc::clone(&seen);
        el.on(ElementEvent::Move, move |b| second.borrow_mut().push(("second", b.position())));
        el.set_position(Vec2::new(5.0, 6.0));
        assert_eq!(
            *seen.borrow(),
            vec![("first", Vec2::new(5.0, 6.0)), ("second", Vec2::new(5.0, 6.0))]
        );
        assert_eq!(el.listener_count(ElementEvent::Move), 2);
    }

    #[test]
    fn listeners_may_change_their_element() {
        let mut el = base(Vec2::new(10.0, 10.0)).with_anchor(Anchor::TopLeft);
        el.on(ElementEvent::Click, |b| {
            b.zoom_by(Vec2::splat(2.0));
        });
        el.on(ElementEvent::Move, |b| {
            let pos = b.position();
            b.set_position(pos.round());
        });
        el.emit(ElementEvent::Click);
        assert_eq!(el.size(), Vec2::new(20.0, 20.0));
        el.set_position(Vec2::new(3.4, 5.6));
        assert_eq!(el.position(), Vec2::new(3.0, 6.0));
        assert_eq!(el.listener_count(ElementEvent::Move), 1);
    }

    #[test]
    fn move_wraps_and_reports_axis() {
        let mut el = base(Vec2::new(20.0, 20.0)).with_anchor(Anchor::TopLeft);
        let holder = Rect::from_size(Vec2::new(100.0, 100.0));
        el.set_position(Vec2::new(95.0, 10.0));
        assert!(el.move_by(Vec2::new(4.0, 0.0), WrapFlags::X, Some(holder)).is_empty());
        assert_eq!(el.move_by(Vec2::new(4.0, 0.0), WrapFlags::X, Some(holder)), WrapFlags::X);
        assert_eq!(el.rect().left(), -20.0);
    }

    #[test]
    fn shake_returns_to_start_and_runs_callback() {
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        let mut el = base(Vec2::new(10.0, 10.0)).at(Vec2::new(50.0, 50.0));
        el.shake(8.0, 0.5, ShakeMode::Instant, Some(Box::new(move || flag.set(true)))).expect("shake");
        el.update(0.25);
        assert!(el.is_shaking());
        let offset = el.position() - Vec2::new(50.0, 50.0);
        assert!(offset.abs().max_element() <= 4.0);
        let completed = el.update(0.5);
        assert!(completed.iter().any(|n| n == SHAKE_ANIMATION));
        assert_eq!(el.position(), Vec2::new(50.0, 50.0));
        assert!(done.get());
        assert!(!el.is_shaking());
    }

    #[test]
    fn shake_rearms_with_adjusted_speed() {
        let mut el = base(Vec2::new(10.0, 10.0)).at(Vec2::new(50.0, 50.0));
        el.shake(4.0, 1.0, ShakeMode::SmoothInOut, None).expect("shake");
        el.update(0.5);
        el.shake(4.0, 0.25, ShakeMode::SmoothIn, None).expect("shake");
        let anim = el.animation(SHAKE_ANIMATION).expect("shake animation");
        assert_eq!(anim.speed(), 4.0);
        assert_eq!(anim.progress(), 0.0);
        el.update(0.25);
        assert_eq!(el.position(), Vec2::new(50.0, 50.0));
        assert!(el.shake(1.0, 0.0, ShakeMode::Instant, None).is_err());
    }

    #[test]
    fn stop_shaking_restores_position() {
        let mut el = base(Vec2::new(10.0, 10.0)).at(Vec2::new(50.0, 50.0));
        el.shake(100.0, 1.0, ShakeMode::Instant, None).expect("shake");
        el.update(0.125);
        el.stop_shaking();
        assert_eq!(el.position(), Vec2::new(50.0, 50.0));
        assert!(!el.is_shaking());
    }

    #[test]
    fn envelopes() {
        assert!((ShakeMode::SmoothInOut.envelope(0.5) - 1.0).abs() < 1e-6);
        assert!(ShakeMode::SmoothInOut.envelope(0.0).abs() < 1e-6);
        assert!((ShakeMode::SmoothIn.envelope(0.8) - 1.0).abs() < 1e-6);
        assert_eq!(ShakeMode::Instant.envelope(0.1), 1.0);
    }
}
