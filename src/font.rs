use crate::render::{Color, Surface};
use std::fmt;
use std::sync::Arc;

/// Rasterizer boundary. Implementations are shared read-only between every
/// element that displays text.
pub trait Font {
    fn name(&self) -> &str;
    fn size(&self) -> u32;
    /// Pixel width of `text` rendered on a single line.
    fn measure(&self, text: &str) -> u32;
    fn line_height(&self) -> u32;
    fn render_line(&self, text: &str, color: Color) -> Surface;
}

pub struct FontSettings {
    font: Arc<dyn Font>,
    color: Color,
    dirty: bool,
}

impl FontSettings {
    pub fn new(font: Arc<dyn Font>, color: Color) -> Self {
        Self { font, color, dirty: false }
    }

    pub fn font(&self) -> &dyn Font {
        self.font.as_ref()
    }

    pub fn shared_font(&self) -> Arc<dyn Font> {
        Arc::clone(&self.font)
    }

    /// Swapping the typeface invalidates every layout computed with it.
    pub fn set_font(&mut self, font: Arc<dyn Font>) -> &mut Self {
        self.font = font;
        self.dirty = true;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn with_color(&self, color: Color) -> Self {
        Self { font: Arc::clone(&self.font), color, dirty: false }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn render_line(&self, text: &str) -> Surface {
        self.font.render_line(text, self.color)
    }

    pub fn line_height(&self) -> u32 {
        self.font.line_height()
    }

    pub fn measure(&self, text: &str) -> u32 {
        self.font.measure(text)
    }
}

impl Clone for FontSettings {
    fn clone(&self) -> Self {
        self.with_color(self.color)
    }
}

impl fmt::Debug for FontSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSettings")
            .field("font", &self.font.name())
            .field("size", &self.font.size())
            .field("color", &self.color)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MonoFont;
    use image::Rgba;

    #[test]
    fn set_font_marks_dirty_and_clone_is_clean() {
        let mut settings = FontSettings::new(MonoFont::shared(10, 20), Rgba([255, 255, 255, 255]));
        assert!(!settings.is_dirty());
        settings.set_font(MonoFont::shared(8, 16));
        assert!(settings.is_dirty());
        let copy = settings.clone();
        assert!(!copy.is_dirty());
        assert_eq!(copy.line_height(), 16);
        settings.clear_dirty();
        assert!(!settings.is_dirty());
    }

    #[test]
    fn color_change_keeps_layout_valid() {
        let mut settings = FontSettings::new(MonoFont::shared(10, 20), Rgba([0, 0, 0, 255]));
        settings.set_color(Rgba([1, 2, 3, 255]));
        assert!(!settings.is_dirty());
        assert_eq!(settings.render_line("ab").dimensions(), (20, 20));
    }
}
