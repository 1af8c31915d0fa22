use super::SceneElement;
use crate::events::ElementEvent;
use crate::geometry::WrapFlags;
use crate::input::MouseButton;
use glam::Vec2;

/// Pointer bookkeeping for an element that reacts to the mouse.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    enabled: bool,
    draggable: bool,
    one_click_per_frame: bool,
    last_clicked_frame: Option<u64>,
    hovered: bool,
    clicked: bool,
    dragging: bool,
    last_pointer: Vec2,
}

impl Default for HoverState {
    fn default() -> Self {
        Self {
            enabled: true,
            draggable: false,
            one_click_per_frame: false,
            last_clicked_frame: None,
            hovered: false,
            clicked: false,
            dragging: false,
            last_pointer: Vec2::ZERO,
        }
    }
}

impl HoverState {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling ignores clicks and drags but leaves hover bookkeeping alone.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    pub fn set_draggable(&mut self, draggable: bool) -> &mut Self {
        self.draggable = draggable;
        if !draggable {
            self.dragging = false;
        }
        self
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable && self.enabled
    }

    pub fn set_one_click_per_frame(&mut self, value: bool) -> &mut Self {
        self.one_click_per_frame = value;
        self
    }

    pub fn is_one_click_per_frame(&self) -> bool {
        self.one_click_per_frame
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_clicked(&self) -> bool {
        self.clicked
    }

    pub fn is_being_dragged(&self) -> bool {
        self.dragging && self.enabled
    }
}

/// Mouse capability. Default handlers implement the
/// idle / hovered / clicked / dragging state machine; widgets override them
/// to add feedback and call the free functions below for the shared part.
pub trait Hoverable: SceneElement {
    fn hover(&self) -> &HoverState;
    fn hover_mut(&mut self) -> &mut HoverState;

    fn hit_test(&self, pos: Vec2) -> bool {
        self.base().rect().contains(pos)
    }

    fn on_mouse_enter(&mut self) {
        enter(self);
    }

    fn on_mouse_leave(&mut self) {
        leave(self);
    }

    /// Returns whether the click was accepted.
    fn on_mouse_click(&mut self, pos: Vec2, button: MouseButton, frame: u64) -> bool {
        click(self, pos, button, frame)
    }

    fn on_mouse_move(&mut self, pos: Vec2) {
        pointer_move(self, pos);
    }

    fn on_mouse_release(&mut self, button: MouseButton) {
        release(self, button);
    }
}

pub fn enter<H: Hoverable + ?Sized>(el: &mut H) {
    if !el.hover().is_enabled() {
        return;
    }
    el.hover_mut().hovered = true;
    el.base_mut().emit(ElementEvent::MouseEnter);
}

pub fn leave<H: Hoverable + ?Sized>(el: &mut H) {
    let state = el.hover_mut();
    state.hovered = false;
    state.clicked = false;
    state.dragging = false;
    el.base_mut().emit(ElementEvent::MouseLeave);
}

/// Accepts a primary click on a hovered, enabled element, at most once per
/// frame when rate limiting is on.
pub fn click<H: Hoverable + ?Sized>(el: &mut H, pos: Vec2, button: MouseButton, frame: u64) -> bool {
    let state = el.hover();
    if !state.hovered || button != MouseButton::Primary || !state.enabled {
        return false;
    }
    if state.one_click_per_frame && state.last_clicked_frame == Some(frame) {
        return false;
    }
    el.base_mut().emit(ElementEvent::Click);
    let state = el.hover_mut();
    state.clicked = true;
    state.last_pointer = pos;
    state.last_clicked_frame = Some(frame);
    true
}

pub fn pointer_move<H: Hoverable + ?Sized>(el: &mut H, pos: Vec2) {
    let state = el.hover();
    if !state.is_draggable() || !state.clicked {
        return;
    }
    let delta = pos - state.last_pointer;
    let state = el.hover_mut();
    state.dragging = true;
    state.last_pointer = pos;
    el.move_by(delta, WrapFlags::empty(), None);
    el.base_mut().emit(ElementEvent::Drag);
}

pub fn release<H: Hoverable + ?Sized>(el: &mut H, button: MouseButton) {
    let state = el.hover_mut();
    if !state.clicked || button != MouseButton::Primary {
        return;
    }
    state.clicked = false;
    state.dragging = false;
}
