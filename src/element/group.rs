use super::{CompletedAnimations, ElementBase, ElementId, HoverState, Hoverable, SceneElement};
use crate::config::PaletteRole;
use crate::context::Context;
use crate::geometry::{anchor_point, Rect, WrapFlags};
use crate::render::{solid_surface, stroke_border, Canvas, Color, Surface};
use glam::Vec2;

const BORDER_THICKNESS: u32 = 5;

/// Composite element. Owns its children, forwards ticks, moves and draws to
/// them, and acts as their holder.
pub struct ElementGroup {
    base: ElementBase,
    hover: HoverState,
    children: Vec<Box<dyn SceneElement>>,
    // Group rectangle the children were last laid out against.
    aligned: Rect,
    background: Option<Color>,
    fill: Color,
}

impl ElementGroup {
    pub fn new(children: Vec<Box<dyn SceneElement>>, ctx: &Context) -> Self {
        let base = ElementBase::new(Vec2::ZERO, ctx);
        let mut group = Self {
            aligned: base.rect(),
            base,
            hover: HoverState::default(),
            children,
            background: None,
            fill: ctx.color(PaletteRole::Background),
        };
        group.sync_holders();
        group
    }

    pub fn with_base(mut self, base: ElementBase) -> Self {
        self.base = base;
        self.sync_holders();
        self
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Draws a framed panel behind the children when set.
    pub fn set_background(&mut self, color: Option<Color>) -> &mut Self {
        self.background = color;
        self
    }

    pub fn children(&self) -> &[Box<dyn SceneElement>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn SceneElement>] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_element(&mut self, mut element: Box<dyn SceneElement>) -> ElementId {
        element.set_holder(Some(self.base.rect()));
        let id = element.id();
        self.children.push(element);
        id
    }

    /// Removes a direct child and detaches it from this group.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Box<dyn SceneElement>> {
        let index = self.children.iter().position(|child| child.id() == id)?;
        let mut element = self.children.remove(index);
        element.set_holder(None);
        Some(element)
    }

    /// Like [`remove_element`](Self::remove_element) but searches nested
    /// groups too.
    pub fn remove_nested(&mut self, id: ElementId) -> Option<Box<dyn SceneElement>> {
        if let Some(element) = self.remove_element(id) {
            return Some(element);
        }
        self.children.iter_mut().find_map(|child| child.as_group_mut()?.remove_nested(id))
    }

    pub fn clear_elements(&mut self) -> Vec<Box<dyn SceneElement>> {
        let mut removed: Vec<_> = self.children.drain(..).collect();
        for element in removed.iter_mut() {
            element.set_holder(None);
        }
        removed
    }

    pub fn find(&self, id: ElementId) -> Option<&(dyn SceneElement + 'static)> {
        for child in &self.children {
            if child.id() == id {
                return Some(child.as_ref());
            }
            if let Some(found) = child.as_group().and_then(|group| group.find(id)) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first lookup through nested groups.
    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut (dyn SceneElement + 'static)> {
        for child in self.children.iter_mut() {
            if child.id() == id {
                return Some(child.as_mut());
            }
            if let Some(group) = child.as_group_mut() {
                if let Some(found) = group.find_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Left/top/right/bottom envelope of `elements`, or `None` when empty.
    pub fn bounds_of(elements: &[Box<dyn SceneElement>]) -> Option<Rect> {
        elements.iter().map(|el| el.base().rect()).reduce(|acc, rect| acc.union(&rect))
    }

    /// Resizes the group to the envelope of its children.
    pub fn fit_to_children(&mut self) -> &mut Self {
        self.sync_children();
        if let Some(bounds) = Self::bounds_of(&self.children) {
            self.base.set_original_size(bounds.size);
            self.base.set_zoom(Vec2::ONE);
            let offset = bounds.min - self.base.rect().min;
            self.base.move_by(offset, WrapFlags::empty(), None);
            self.sync_holders();
        }
        self
    }

    /// Group update followed by every child. Returns the group's own
    /// completed animations.
    pub fn advance(&mut self, dt: f32, ctx: &Context) -> CompletedAnimations {
        let completed = self.base.update(dt);
        self.sync_children();
        for child in self.children.iter_mut() {
            child.tick(dt, ctx);
        }
        completed
    }

    /// Children see the group rectangle as their holder.
    pub fn sync_holders(&mut self) {
        let rect = self.base.rect();
        self.aligned = rect;
        for child in self.children.iter_mut() {
            child.set_holder(Some(rect));
        }
    }

    /// Catches the children up with moves made directly on the group's base
    /// (`set_position`, drags, shake). Children shift by the displacement of
    /// the group's anchor point since the last alignment.
    pub fn sync_children(&mut self) {
        let rect = self.base.rect();
        if rect == self.aligned {
            return;
        }
        let delta = self.base.position() - anchor_point(&self.aligned, self.base.anchor());
        if delta != Vec2::ZERO {
            for child in self.children.iter_mut() {
                child.move_by(delta, WrapFlags::empty(), Some(rect));
            }
        }
        self.sync_holders();
    }

    pub fn set_original_size(&mut self, size: Vec2) -> &mut Self {
        self.base.set_original_size(size);
        self.sync_holders();
        self
    }
}

impl SceneElement for ElementGroup {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn render(&self) -> Vec<Surface> {
        let Some(color) = self.background else {
            return Vec::new();
        };
        let mut panel = solid_surface(self.base.original_size(), self.fill);
        stroke_border(&mut panel, color, BORDER_THICKNESS);
        vec![panel]
    }

    fn refresh(&mut self) {
        self.sync_children();
    }

    fn tick(&mut self, dt: f32, ctx: &Context) {
        self.advance(dt, ctx);
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        super::draw_surfaces(self, canvas);
        for child in self.children.iter_mut() {
            child.draw(canvas);
        }
    }

    fn move_by(&mut self, delta: Vec2, wrap: WrapFlags, holder: Option<Rect>) -> WrapFlags {
        self.sync_children();
        let wrapped = self.base.move_by(delta, wrap, holder);
        let rect = self.base.rect();
        for child in self.children.iter_mut() {
            child.move_by(delta, wrap, Some(rect));
        }
        self.sync_holders();
        wrapped
    }

    /// Shifts every child by the displacement of the group's own anchor.
    fn set_relative_pos(&mut self, rel: Vec2, holder: Option<Rect>) {
        self.sync_children();
        let before = self.base.position();
        self.base.set_relative_pos(rel, holder);
        let delta = self.base.position() - before;
        self.sync_holders();
        for child in self.children.iter_mut() {
            child.move_by(delta, WrapFlags::empty(), None);
        }
    }

    fn set_relative_width(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.sync_children();
        self.base.set_relative_width(rel, keep_ratio, holder);
        self.sync_holders();
    }

    fn set_relative_height(&mut self, rel: f32, keep_ratio: bool, holder: Option<Rect>) {
        self.sync_children();
        self.base.set_relative_height(rel, keep_ratio, holder);
        self.sync_holders();
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        Some(self)
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }

    fn as_group(&self) -> Option<&ElementGroup> {
        Some(self)
    }

    fn as_group_mut(&mut self) -> Option<&mut ElementGroup> {
        Some(self)
    }
}

impl Hoverable for ElementGroup {
    fn hover(&self) -> &HoverState {
        &self.hover
    }

    fn hover_mut(&mut self) -> &mut HoverState {
        &mut self.hover
    }
}
