use crate::context::Context;
use crate::element::{ElementBase, Pulsing, SceneElement};
use crate::font::FontSettings;
use crate::render::Surface;
use crate::text_layout::{layout, TextLayout, UNBOUNDED};
use glam::Vec2;

/// Multi-line text. Each wrapped fragment is rendered as its own surface and
/// stacked one line height apart.
pub struct TextDisplay {
    base: ElementBase,
    font: FontSettings,
    content: String,
    max_width: u32,
    layout: TextLayout,
}

pub type PulsingText = Pulsing<TextDisplay>;

impl TextDisplay {
    pub fn new(font: FontSettings, content: impl Into<String>, ctx: &Context) -> Self {
        let mut text = Self {
            base: ElementBase::new(Vec2::ZERO, ctx),
            font,
            content: content.into(),
            max_width: UNBOUNDED,
            layout: TextLayout::default(),
        };
        text.recompute();
        text
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self.recompute();
        self
    }

    pub fn push_str(&mut self, s: &str) -> &mut Self {
        self.content.push_str(s);
        self.recompute();
        self
    }

    pub fn pop(&mut self) -> Option<char> {
        let ch = self.content.pop();
        self.recompute();
        ch
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Zero disables wrapping.
    pub fn set_max_width(&mut self, width: u32) -> &mut Self {
        self.max_width = width;
        self.recompute();
        self
    }

    pub fn font(&self) -> &FontSettings {
        &self.font
    }

    /// Color changes apply on the next draw; swapping the typeface triggers a
    /// relayout before it.
    pub fn font_mut(&mut self) -> &mut FontSettings {
        &mut self.font
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn line_height(&self) -> u32 {
        self.font.line_height()
    }

    /// Re-wraps the content and resizes the element around it, keeping the
    /// anchor point fixed.
    pub fn recompute(&mut self) {
        self.layout = layout(&self.content, self.max_width, self.font.font());
        self.base.set_original_size(self.layout.size.as_vec2());
        self.font.clear_dirty();
    }

    /// Top-left of rendered line `line`, accounting for zoom.
    pub fn line_offset(&self, line: usize) -> Vec2 {
        let zoom = self.base.zoom();
        self.base.rect().min + Vec2::new(0.0, self.line_height() as f32 * line as f32 * zoom.y)
    }

    pub fn render_with(&self, font: &FontSettings) -> Vec<Surface> {
        self.layout.fragments.iter().map(|fragment| font.render_line(&fragment.text)).collect()
    }
}

impl SceneElement for TextDisplay {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn render(&self) -> Vec<Surface> {
        self.render_with(&self.font)
    }

    fn refresh(&mut self) {
        if self.font.is_dirty() {
            self.recompute();
        }
    }

    fn drawing_position(&self, index: usize) -> Vec2 {
        self.line_offset(index)
    }
}
