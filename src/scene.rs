use crate::config::PaletteRole;
use crate::context::Context;
use crate::element::{ElementId, Hoverable, SceneElement};
use crate::events::ElementEvent;
use crate::input::{normalize_typed, InputEvent, MouseButton};
use crate::render::{Canvas, Color};
use glam::Vec2;
use std::collections::HashMap;

/// Pre-order over the element tree: a group comes before its children.
fn walk(elements: &mut [Box<dyn SceneElement>], f: &mut dyn FnMut(&mut dyn SceneElement)) {
    for element in elements.iter_mut() {
        f(element.as_mut());
        if let Some(group) = element.as_group_mut() {
            walk(group.children_mut(), f);
        }
    }
}

/// Reverse of [`walk`]: topmost first. Stops once `f` returns `true`.
/// Groups catch their children up before those are hit-tested.
fn walk_back_to_front(elements: &mut [Box<dyn SceneElement>], f: &mut dyn FnMut(&mut dyn SceneElement) -> bool) -> bool {
    for element in elements.iter_mut().rev() {
        if let Some(group) = element.as_group_mut() {
            group.sync_children();
            if walk_back_to_front(group.children_mut(), f) {
                return true;
            }
        }
        if f(element.as_mut()) {
            return true;
        }
    }
    false
}

/// The live set of top-level elements plus pointer and keyboard routing.
///
/// Elements later in the list draw on top and receive pointer input first.
/// Groups tick and draw their own children; input routing walks into them.
pub struct Scene {
    elements: Vec<Box<dyn SceneElement>>,
    hovered: Option<ElementId>,
    cursor: Option<Vec2>,
    background: Color,
}

impl Scene {
    pub fn new(ctx: &Context) -> Self {
        Self { elements: Vec::new(), hovered: None, cursor: None, background: ctx.color(PaletteRole::Background) }
    }

    // ---------- element set ----------

    pub fn add<E: SceneElement + 'static>(&mut self, element: E) -> ElementId {
        self.add_boxed(Box::new(element))
    }

    pub fn add_boxed(&mut self, mut element: Box<dyn SceneElement>) -> ElementId {
        let id = element.id();
        element.base_mut().emit(ElementEvent::Create);
        tracing::debug!(element = %id, "element added to scene");
        self.elements.push(element);
        id
    }

    pub fn add_all(&mut self, elements: impl IntoIterator<Item = Box<dyn SceneElement>>) -> Vec<ElementId> {
        elements.into_iter().map(|element| self.add_boxed(element)).collect()
    }

    /// Removes a top-level element, or detaches a nested one from its group.
    /// A hovered element inside the removed subtree gets its mouse leave
    /// before it is handed back.
    pub fn remove(&mut self, id: ElementId) -> Option<Box<dyn SceneElement>> {
        let mut removed = match self.elements.iter().position(|element| element.id() == id) {
            Some(index) => Some(self.elements.remove(index)),
            None => self.elements.iter_mut().find_map(|element| element.as_group_mut()?.remove_nested(id)),
        }?;
        if let Some(hovered) = self.hovered {
            let target = if removed.id() == hovered {
                Some(removed.as_mut())
            } else {
                removed.as_group_mut().and_then(|group| group.find_mut(hovered))
            };
            if let Some(target) = target {
                self.hovered = None;
                tracing::trace!(element = %hovered, "mouse leave on removal");
                if let Some(hoverable) = target.as_hoverable_mut() {
                    hoverable.on_mouse_leave();
                }
            }
        }
        tracing::debug!(element = %id, "element removed from scene");
        Some(removed)
    }

    pub fn clear(&mut self) -> Vec<Box<dyn SceneElement>> {
        self.hovered = None;
        std::mem::take(&mut self.elements)
    }

    pub fn elements(&self) -> &[Box<dyn SceneElement>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: ElementId) -> Option<&(dyn SceneElement + 'static)> {
        self.elements.iter().find_map(|element| {
            if element.id() == id {
                Some(element.as_ref())
            } else {
                element.as_group()?.find(id)
            }
        })
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut (dyn SceneElement + 'static)> {
        for element in self.elements.iter_mut() {
            if element.id() == id {
                return Some(element.as_mut());
            }
            if let Some(group) = element.as_group_mut() {
                if let Some(found) = group.find_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn get<T: SceneElement + 'static>(&self, id: ElementId) -> Option<&T> {
        self.find(id)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: SceneElement + 'static>(&mut self, id: ElementId) -> Option<&mut T> {
        self.find_mut(id)?.downcast_mut::<T>()
    }

    // ---------- frame ----------

    pub fn update(&mut self, dt: f32, ctx: &Context) {
        for element in self.elements.iter_mut() {
            element.tick(dt, ctx);
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        canvas.fill(self.background);
        for element in self.elements.iter_mut() {
            element.draw(canvas);
        }
    }

    // ---------- input ----------

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    fn hoverable_mut(&mut self, id: ElementId) -> Option<&mut dyn Hoverable> {
        self.find_mut(id)?.as_hoverable_mut()
    }

    fn leave_hovered(&mut self) {
        if let Some(id) = self.hovered.take() {
            tracing::trace!(element = %id, "mouse leave");
            if let Some(element) = self.hoverable_mut(id) {
                element.on_mouse_leave();
            }
        }
    }

    /// Drag forwarding, then the hover sweep: the topmost hoverable under the
    /// cursor becomes the single hovered element.
    pub fn set_cursor(&mut self, pos: Vec2) {
        self.cursor = Some(pos);
        if let Some(id) = self.hovered {
            if let Some(element) = self.hoverable_mut(id) {
                if element.hover().is_being_dragged() {
                    element.on_mouse_move(pos);
                    return;
                }
            }
        }

        let mut hit: Option<(ElementId, bool)> = None;
        walk_back_to_front(&mut self.elements, &mut |element| {
            let Some(hoverable) = element.as_hoverable_mut() else {
                return false;
            };
            hoverable.on_mouse_move(pos);
            if !hoverable.hit_test(pos) {
                return false;
            }
            hit = Some((hoverable.id(), hoverable.hover().is_hovered()));
            true
        });

        match hit {
            Some((id, true)) if self.hovered == Some(id) => {}
            Some((id, _)) => {
                self.leave_hovered();
                self.hovered = Some(id);
                tracing::trace!(element = %id, "mouse enter");
                if let Some(element) = self.hoverable_mut(id) {
                    element.on_mouse_enter();
                }
            }
            None => self.leave_hovered(),
        }
    }

    /// Offers the click to every hoverable, topmost first. Returns how many
    /// accepted it.
    pub fn handle_click(&mut self, pos: Vec2, button: MouseButton, ctx: &Context) -> usize {
        let frame = ctx.frame();
        let mut accepted = 0;
        walk_back_to_front(&mut self.elements, &mut |element| {
            if let Some(hoverable) = element.as_hoverable_mut() {
                if hoverable.on_mouse_click(pos, button, frame) {
                    tracing::debug!(element = %hoverable.id(), ?button, "click accepted");
                    accepted += 1;
                }
            }
            false
        });
        accepted
    }

    pub fn handle_release(&mut self, button: MouseButton) {
        if let Some(id) = self.hovered {
            if let Some(element) = self.hoverable_mut(id) {
                element.on_mouse_release(button);
            }
        }
    }

    /// Sends one character to every typable element.
    pub fn type_char(&mut self, ch: char) {
        let ch = normalize_typed(ch);
        walk(&mut self.elements, &mut |element| {
            if let Some(typable) = element.as_typable_mut() {
                typable.on_type(ch);
            }
        });
    }

    pub fn dispatch(&mut self, event: InputEvent, ctx: &Context) {
        match event {
            InputEvent::CursorMoved { position } => self.set_cursor(position),
            InputEvent::MouseButton { button, pressed: true, position } => {
                self.handle_click(position, button, ctx);
            }
            InputEvent::MouseButton { button, pressed: false, .. } => self.handle_release(button),
            InputEvent::Character(ch) => self.type_char(ch),
        }
    }

    pub fn on_set_active(&mut self) {
        tracing::debug!(elements = self.elements.len(), "scene activated");
    }

    pub fn on_set_inactive(&mut self) {
        self.leave_hovered();
    }
}

/// Named scenes with a single active one receiving frames and input.
#[derive(Default)]
pub struct SceneManager {
    scenes: HashMap<String, Scene>,
    current: Option<String>,
    previous: Option<String>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, scene: Scene) -> Option<Scene> {
        self.scenes.insert(name.into(), scene)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Switches the active scene. The outgoing one loses its hover state.
    /// `None` or an unknown name leaves no scene active.
    pub fn set_active(&mut self, name: Option<&str>) {
        let next = name.filter(|name| self.scenes.contains_key(*name)).map(str::to_owned);
        if name.is_some() && next.is_none() {
            tracing::warn!(scene = ?name, "activating unknown scene");
        }
        self.previous = std::mem::replace(&mut self.current, next);
        if let Some(scene) = self.previous.as_deref().and_then(|name| self.scenes.get_mut(name)) {
            scene.on_set_inactive();
        }
        if let Some(scene) = self.current_mut() {
            scene.on_set_active();
        }
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous_name(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn current(&self) -> Option<&Scene> {
        self.current.as_deref().and_then(|name| self.scenes.get(name))
    }

    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        let name = self.current.as_deref()?;
        self.scenes.get_mut(name)
    }

    pub fn update(&mut self, dt: f32, ctx: &Context) {
        if let Some(scene) = self.current_mut() {
            scene.update(dt, ctx);
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        if let Some(scene) = self.current_mut() {
            scene.draw(canvas);
        }
    }

    pub fn dispatch(&mut self, event: InputEvent, ctx: &Context) {
        if let Some(scene) = self.current_mut() {
            scene.dispatch(event, ctx);
        }
    }
}
