use super::TextDisplay;
use crate::animation::{Animation, EndBehavior};
use crate::config::PaletteRole;
use crate::context::Context;
use crate::element::{ElementBase, SceneElement, Typable};
use crate::events::ElementEvent;
use crate::font::FontSettings;
use crate::input::{is_accepted_char, BACKSPACE, NEWLINE, TAB};
use crate::render::{Color, Surface};
use crate::text_layout::{layout, TextLayout};
use bitflags::bitflags;
use glam::Vec2;
use std::f32::consts::PI;

pub const PROMPT_ANIMATION: &str = "prompt_blink";
pub const ERROR_ANIMATION: &str = "error_blink";

const CARET: &str = "|";
const TAB_SPACES: &str = "    ";

bitflags! {
    /// Which layers flash during an error blink.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BlinkTarget: u8 {
        const PATTERN = 0b01;
        const CONTENT = 0b10;
        const BOTH = Self::PATTERN.bits() | Self::CONTENT.bits();
    }
}

/// Text input with an optional ghost pattern drawn underneath, a blinking
/// caret and an error flash.
pub struct TextArea {
    text: TextDisplay,
    pattern: Option<String>,
    pattern_font: FontSettings,
    pattern_layout: TextLayout,
    require_pattern: bool,
    multiline: bool,
    enabled: bool,
    blink_target: BlinkTarget,
    blink_color: Color,
    blink_frequency: f32,
    on_blink_end: Option<Box<dyn FnOnce()>>,
}

impl TextArea {
    pub fn new(font: FontSettings, ctx: &Context) -> Self {
        let pattern_font = font.with_color(ctx.color(PaletteRole::Placeholder));
        let settings = ctx.text_area();
        let mut text = TextDisplay::new(font, "", ctx);
        text.base_mut()
            .add_animation(
                PROMPT_ANIMATION,
                Animation::new(settings.prompt_blink_period).with_end_behavior(EndBehavior::Reverse).started(),
            )
            .add_animation(ERROR_ANIMATION, Animation::new(settings.error_blink_time).with_end_behavior(EndBehavior::Reset));
        Self {
            text,
            pattern: None,
            pattern_font,
            pattern_layout: TextLayout::default(),
            require_pattern: true,
            multiline: true,
            enabled: true,
            blink_target: BlinkTarget::PATTERN,
            blink_color: ctx.color(PaletteRole::Error),
            blink_frequency: settings.blink_frequency,
            on_blink_end: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.set_pattern(Some(pattern.into()));
        self
    }

    pub fn with_require_pattern(mut self, required: bool) -> Self {
        self.require_pattern = required;
        self
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn with_blink_target(mut self, target: BlinkTarget) -> Self {
        self.blink_target = target;
        self
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.set_max_width(width);
        self
    }

    // ---------- content ----------

    pub fn content(&self) -> &str {
        self.text.content()
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.text.set_content(content);
        self.relayout();
        self
    }

    /// Clears the typed text.
    pub fn reset(&mut self) -> &mut Self {
        self.set_content("")
    }

    pub fn display(&self) -> &TextDisplay {
        &self.text
    }

    pub fn font_mut(&mut self) -> &mut FontSettings {
        self.text.font_mut()
    }

    pub fn pattern_font_mut(&mut self) -> &mut FontSettings {
        &mut self.pattern_font
    }

    pub fn set_max_width(&mut self, width: u32) -> &mut Self {
        self.text.set_max_width(width);
        self.relayout();
        self
    }

    // ---------- pattern ----------

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Setting a pattern sizes the element to the pattern rather than to the
    /// typed text.
    pub fn set_pattern(&mut self, pattern: Option<String>) -> &mut Self {
        self.pattern = pattern;
        self.relayout();
        self
    }

    pub fn set_require_pattern(&mut self, required: bool) -> &mut Self {
        self.require_pattern = required;
        self
    }

    pub fn is_pattern_required(&self) -> bool {
        self.require_pattern && self.pattern.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.pattern.as_deref().is_some_and(|pattern| pattern == self.content())
    }

    /// The next `n` characters of the pattern after the typed text. Empty
    /// without a pattern or once complete.
    pub fn next_characters(&self, n: usize) -> String {
        match self.pattern.as_deref() {
            Some(pattern) if !self.is_complete() => {
                pattern.chars().skip(self.content().chars().count()).take(n).collect()
            }
            _ => String::new(),
        }
    }

    pub fn next_character(&self) -> Option<char> {
        self.next_characters(1).chars().next()
    }

    // ---------- state ----------

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn set_multiline(&mut self, multiline: bool) -> &mut Self {
        self.multiline = multiline;
        self
    }

    /// A multi-line pattern implies multi-line input.
    pub fn is_multiline(&self) -> bool {
        self.multiline || self.pattern_layout.line_count() > 1
    }

    pub fn blink_target(&self) -> BlinkTarget {
        self.blink_target
    }

    pub fn set_blink_target(&mut self, target: BlinkTarget) -> &mut Self {
        self.blink_target = target;
        self
    }

    // ---------- blinking ----------

    /// Flashes the blink target layers. `then` runs once the flash ends.
    pub fn blink(&mut self, color: Option<Color>, then: Option<Box<dyn FnOnce()>>) {
        if let Some(color) = color {
            self.blink_color = color;
        }
        if let Some(anim) = self.text.base_mut().animation_mut(ERROR_ANIMATION) {
            anim.start();
        }
        self.on_blink_end = then;
    }

    pub fn is_blinking(&self) -> bool {
        self.text.base().animation(ERROR_ANIMATION).is_some_and(Animation::is_running)
    }

    fn blink_phase_on(&self) -> bool {
        self.text
            .base()
            .animation(ERROR_ANIMATION)
            .filter(|anim| anim.is_running())
            .is_some_and(|anim| (anim.progress_percent() * self.blink_frequency * PI).cos() > 0.0)
    }

    pub fn is_caret_visible(&self) -> bool {
        self.text.base().animation(PROMPT_ANIMATION).map_or(true, |anim| anim.progress_percent() <= 0.5)
    }

    fn restart_prompt(&mut self) {
        if let Some(anim) = self.text.base_mut().animation_mut(PROMPT_ANIMATION) {
            anim.reset().start();
        }
    }

    // ---------- layout ----------

    fn relayout(&mut self) {
        self.text.recompute();
        self.pattern_layout = match self.pattern.as_deref() {
            Some(pattern) => layout(pattern, self.text.max_width(), self.pattern_font.font()),
            None => TextLayout::default(),
        };
        self.pattern_font.clear_dirty();
        if self.pattern.is_some() {
            let size = self.pattern_layout.size.as_vec2();
            self.text.base_mut().set_original_size(size);
        }
    }

    fn pattern_lines(&self) -> usize {
        self.pattern_layout.line_count()
    }

    fn content_lines(&self) -> usize {
        self.text.layout().line_count()
    }

    /// Unzoomed offset of the caret from the element's top-left corner: the
    /// end of the last typed line, backed off by half a space.
    pub fn caret_offset(&self) -> Vec2 {
        let font = self.text.font();
        let half_space = font.measure(" ") as f32 / 2.0;
        let line_height = font.line_height() as f32;
        let content = self.content();
        let (line, width) = if content.ends_with(NEWLINE) {
            (self.content_lines(), 0)
        } else {
            match self.text.layout().last() {
                Some(fragment) => (self.content_lines() - 1, fragment.width),
                None => (0, 0),
            }
        };
        Vec2::new(width as f32 - half_space, line as f32 * line_height)
    }

    fn layer_fonts(&self) -> (FontSettings, FontSettings) {
        let mut pattern = self.pattern_font.clone();
        let mut content = self.text.font().clone();
        if self.blink_phase_on() {
            if self.blink_target.contains(BlinkTarget::PATTERN) {
                pattern.set_color(self.blink_color);
            }
            if self.blink_target.contains(BlinkTarget::CONTENT) {
                content.set_color(self.blink_color);
            }
        }
        (pattern, content)
    }

    fn type_char(&mut self, ch: char) {
        if !self.enabled {
            return;
        }
        if ch == NEWLINE && !self.is_multiline() {
            tracing::trace!("newline ignored by single-line text area");
            return;
        }
        if ch == BACKSPACE && !self.is_pattern_required() {
            if self.content().is_empty() {
                return;
            }
            self.text.pop();
            self.relayout();
            self.restart_prompt();
            self.text.base_mut().emit(ElementEvent::Erase);
            return;
        }

        let insert = if ch == TAB && self.next_characters(TAB_SPACES.len()) == TAB_SPACES {
            TAB_SPACES.to_owned()
        } else if self.is_pattern_required() && self.next_character() != Some(ch) {
            self.blink(None, None);
            return;
        } else if !is_accepted_char(ch) {
            return;
        } else {
            ch.to_string()
        };

        self.text.push_str(&insert);
        self.relayout();
        self.restart_prompt();
        self.text.base_mut().emit(ElementEvent::Type);
        if self.is_complete() {
            self.text.base_mut().emit(ElementEvent::TextComplete);
        }
    }
}

impl SceneElement for TextArea {
    fn base(&self) -> &ElementBase {
        self.text.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.text.base_mut()
    }

    /// Pattern lines, then typed lines, then the caret when visible.
    fn render(&self) -> Vec<Surface> {
        let (pattern_font, content_font) = self.layer_fonts();
        let mut surfaces: Vec<Surface> =
            self.pattern_layout.fragments.iter().map(|fragment| pattern_font.render_line(&fragment.text)).collect();
        surfaces.extend(self.text.render_with(&content_font));
        if self.enabled && self.is_caret_visible() {
            surfaces.push(content_font.render_line(CARET));
        }
        surfaces
    }

    fn refresh(&mut self) {
        if self.text.font().is_dirty() || self.pattern_font.is_dirty() {
            self.relayout();
        }
    }

    fn tick(&mut self, dt: f32, _ctx: &Context) {
        let completed = self.text.base_mut().update(dt);
        if completed.iter().any(|name| name == ERROR_ANIMATION) {
            if let Some(then) = self.on_blink_end.take() {
                then();
            }
        }
        // The caret stays solid while the error flash is lit.
        if self.blink_phase_on() {
            if let Some(anim) = self.text.base_mut().animation_mut(PROMPT_ANIMATION) {
                anim.reset();
            }
        }
    }

    fn drawing_position(&self, index: usize) -> Vec2 {
        let pattern_lines = self.pattern_lines();
        if index < pattern_lines {
            return self.text.line_offset(index);
        }
        let line = index - pattern_lines;
        if line < self.content_lines() {
            return self.text.line_offset(line);
        }
        self.base().rect().min + self.caret_offset() * self.base().zoom()
    }

    fn as_typable_mut(&mut self) -> Option<&mut dyn Typable> {
        Some(self)
    }
}

impl Typable for TextArea {
    fn on_type(&mut self, ch: char) {
        self.type_char(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Anchor;
    use crate::testing::{test_context, MonoFont, RecordingCanvas};
    use image::Rgba;
    use std::cell::Cell;
    use std::rc::Rc;

    const WHITE: Color = Rgba([255, 255, 255, 255]);

    fn area(ctx: &Context) -> TextArea {
        TextArea::new(FontSettings::new(MonoFont::shared(10, 20), WHITE), ctx)
    }

    fn counter(area: &mut TextArea, event: ElementEvent) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        area.base_mut().on(event, move |_| seen.set(seen.get() + 1));
        count
    }

    #[test]
    fn free_typing_and_erase() {
        let ctx = test_context();
        let mut area = area(&ctx).with_multiline(false);
        let typed = counter(&mut area, ElementEvent::Type);
        let erased = counter(&mut area, ElementEvent::Erase);
        for ch in "hé!".chars() {
            area.on_type(ch);
        }
        area.on_type(TAB);
        area.on_type(NEWLINE);
        assert_eq!(area.content(), "hé!");
        assert_eq!(typed.get(), 3);
        area.on_type(BACKSPACE);
        assert_eq!(area.content(), "hé");
        assert_eq!(erased.get(), 1);
        assert_eq!(area.base().original_size(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn defaults_enforce_pattern_and_accept_newlines() {
        let ctx = test_context();
        let mut free = area(&ctx);
        free.on_type('a');
        free.on_type(NEWLINE);
        assert_eq!(free.content(), "a\n");

        let mut patterned = area(&ctx).with_pattern("ab");
        assert!(patterned.is_pattern_required());
        patterned.on_type('x');
        assert_eq!(patterned.content(), "");
        patterned.on_type(BACKSPACE);
        patterned.on_type('a');
        assert_eq!(patterned.content(), "a");
    }

    #[test]
    fn backspace_on_empty_is_ignored() {
        let ctx = test_context();
        let mut area = area(&ctx);
        let erased = counter(&mut area, ElementEvent::Erase);
        area.on_type(BACKSPACE);
        assert_eq!(erased.get(), 0);
    }

    #[test]
    fn required_pattern_rejects_mismatch_with_blink() {
        let ctx = test_context();
        let mut area = area(&ctx).with_pattern("go").with_require_pattern(true);
        let complete = counter(&mut area, ElementEvent::TextComplete);
        area.on_type('x');
        assert_eq!(area.content(), "");
        assert!(area.is_blinking());
        area.on_type('g');
        assert_eq!(area.next_characters(5), "o");
        area.on_type(BACKSPACE);
        assert_eq!(area.content(), "g");
        area.on_type('o');
        assert!(area.is_complete());
        assert_eq!(complete.get(), 1);
        assert_eq!(area.next_character(), None);
    }

    #[test]
    fn tab_expands_to_pattern_spaces() {
        let ctx = test_context();
        let mut area = area(&ctx).with_pattern("    x").with_require_pattern(true);
        area.on_type(TAB);
        assert_eq!(area.content(), "    ");
        area.on_type(TAB);
        assert_eq!(area.content(), "    ");
    }

    #[test]
    fn size_follows_pattern_when_present() {
        let ctx = test_context();
        let mut area = area(&ctx).with_pattern("hello");
        area.on_type('h');
        assert_eq!(area.base().original_size(), Vec2::new(50.0, 20.0));
        area.set_pattern(None);
        assert_eq!(area.base().original_size(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn multiline_pattern_allows_newline() {
        let ctx = test_context();
        let mut area = area(&ctx).with_pattern("a\nb").with_multiline(false);
        assert!(area.is_multiline());
        area.on_type('a');
        area.on_type(NEWLINE);
        assert_eq!(area.content(), "a\n");
        assert_eq!(area.caret_offset(), Vec2::new(-5.0, 20.0));
    }

    #[test]
    fn disabled_area_ignores_input() {
        let ctx = test_context();
        let mut area = area(&ctx);
        area.disable();
        area.on_type('a');
        assert_eq!(area.content(), "");
        area.enable().on_type('a');
        assert_eq!(area.content(), "a");
    }

    #[test]
    fn blink_runs_callback_and_recolors_pattern() {
        let ctx = test_context();
        let mut area = area(&ctx).with_pattern("ab");
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        area.blink(Some(Rgba([1, 2, 3, 255])), Some(Box::new(move || flag.set(true))));
        area.tick(0.01, &ctx);
        let surfaces = area.render();
        assert_eq!(surfaces[0].get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
        area.tick(1.0, &ctx);
        assert!(done.get());
        assert!(!area.is_blinking());
        let surfaces = area.render();
        assert_eq!(surfaces[0].get_pixel(0, 0), &ctx.color(PaletteRole::Placeholder));
    }

    #[test]
    fn draw_overlays_content_on_pattern_and_places_caret() {
        let ctx = test_context();
        let mut area = area(&ctx).with_pattern("abc");
        area.base_mut().set_anchor(Anchor::TopLeft);
        area.base_mut().set_position(Vec2::new(100.0, 100.0));
        area.on_type('a');
        let mut canvas = RecordingCanvas::new();
        area.draw(&mut canvas);
        assert_eq!(canvas.blits.len(), 3);
        assert_eq!(canvas.blits[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(canvas.blits[1].position, Vec2::new(100.0, 100.0));
        assert_eq!(canvas.blits[2].position, Vec2::new(105.0, 100.0));
    }
}
