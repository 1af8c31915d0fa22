use crate::config::{AppConfig, ButtonConfig, Palette, PaletteRole, TextAreaConfig};
use crate::element::ElementId;
use crate::geometry::Rect;
use crate::render::Color;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// Process-wide state threaded explicitly through element construction and
/// per-frame calls: canvas bounds, the frame counter used for click
/// rate-limiting, the element id allocator, the glitch-shader flag and the
/// loaded tunables.
///
/// Clones share the id allocator, so ids stay unique across them.
#[derive(Debug, Clone)]
pub struct Context {
    display: Rect,
    frame: u64,
    next_id: Rc<Cell<u64>>,
    glitch: bool,
    palette: Palette,
    text_area: TextAreaConfig,
    button: ButtonConfig,
}

impl Context {
    /// Takes the config as is. Files read through [`AppConfig::load`] are
    /// already validated; hand-built configs should pass
    /// [`AppConfig::validate`] first.
    pub fn new(config: &AppConfig) -> Self {
        let size = Vec2::new(config.display.width as f32, config.display.height as f32);
        Self {
            display: Rect::from_size(size),
            frame: 0,
            next_id: Rc::new(Cell::new(1)),
            glitch: false,
            palette: config.palette.clone(),
            text_area: config.text_area.clone(),
            button: config.button.clone(),
        }
    }

    pub fn with_display(width: u32, height: u32) -> Self {
        let mut config = AppConfig::default();
        config.display.width = width;
        config.display.height = height;
        Self::new(&config)
    }

    pub fn display(&self) -> Rect {
        self.display
    }

    pub fn display_size(&self) -> Vec2 {
        self.display.size
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Called by the driver once per frame, before input dispatch.
    pub fn advance_frame(&mut self) -> u64 {
        self.frame = self.frame.wrapping_add(1);
        self.frame
    }

    pub fn next_element_id(&self) -> ElementId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ElementId::from_raw(id)
    }

    pub fn glitch(&mut self) {
        self.glitch = true;
    }

    pub fn unglitch(&mut self) {
        self.glitch = false;
    }

    pub fn is_glitched(&self) -> bool {
        self.glitch
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn color(&self, role: PaletteRole) -> Color {
        self.palette.color(role)
    }

    pub fn text_area(&self) -> &TextAreaConfig {
        &self.text_area
    }

    pub fn button(&self) -> &ButtonConfig {
        &self.button
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
