use super::TextDisplay;
use crate::context::Context;
use crate::element::{ElementBase, SceneElement};
use crate::events::ElementEvent;
use crate::font::FontSettings;
use crate::render::Surface;
use crate::timer::{format_clock, TimerClock};
use glam::Vec2;

pub const DEFAULT_CLOCK_FORMAT: &str = "%H:%M:%S.%m";
pub const DEFAULT_CLOCK_SECONDS: f32 = 60.0;

/// A [`TimerClock`] rendered as text.
pub struct Timer {
    text: TextDisplay,
    clock: TimerClock,
    format: String,
}

impl Timer {
    pub fn new(font: FontSettings, clock: TimerClock, ctx: &Context) -> Self {
        let text = TextDisplay::new(font, format_clock(clock.time(), DEFAULT_CLOCK_FORMAT), ctx);
        Self { text, clock, format: DEFAULT_CLOCK_FORMAT.to_owned() }
    }

    /// One-minute countdown, paused.
    pub fn countdown(font: FontSettings, ctx: &Context) -> Self {
        let mut clock = TimerClock::new(DEFAULT_CLOCK_SECONDS);
        clock.as_countdown();
        Self::new(font, clock, ctx)
    }

    pub fn clock(&self) -> &TimerClock {
        &self.clock
    }

    /// Start, pause, direction and triggers live on the clock.
    pub fn clock_mut(&mut self) -> &mut TimerClock {
        &mut self.clock
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn set_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = format.into();
        self.sync_text();
        self
    }

    pub fn display(&self) -> &TextDisplay {
        &self.text
    }

    pub fn font_mut(&mut self) -> &mut FontSettings {
        self.text.font_mut()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.clock.reset();
        self.sync_text();
        self
    }

    fn sync_text(&mut self) {
        let content = format_clock(self.clock.time(), &self.format);
        if content != self.text.content() {
            self.text.set_content(content);
        }
    }
}

impl SceneElement for Timer {
    fn base(&self) -> &ElementBase {
        self.text.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.text.base_mut()
    }

    fn render(&self) -> Vec<Surface> {
        self.text.render()
    }

    fn refresh(&mut self) {
        self.text.refresh();
    }

    fn tick(&mut self, dt: f32, ctx: &Context) {
        if self.clock.is_running() {
            let tick = self.clock.tick(dt);
            if tick.ended {
                tracing::debug!(element = %self.id(), "timer reached its bound");
                self.text.base_mut().emit(ElementEvent::TimerEnd);
            }
            self.sync_text();
        }
        self.text.tick(dt, ctx);
    }

    fn drawing_position(&self, index: usize) -> Vec2 {
        self.text.drawing_position(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MonoFont};
    use crate::timer::TimerTrigger;
    use image::Rgba;
    use std::cell::Cell;
    use std::rc::Rc;

    fn font() -> FontSettings {
        FontSettings::new(MonoFont::shared(10, 20), Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn countdown_renders_and_ends_once() {
        let ctx = test_context();
        let mut timer = Timer::countdown(font(), &ctx);
        assert_eq!(timer.display().content(), "00:01:00.000");
        let ended = Rc::new(Cell::new(0));
        let seen = ended.clone();
        timer.base_mut().on(ElementEvent::TimerEnd, move |_| seen.set(seen.get() + 1));
        timer.clock_mut().start();
        timer.tick(1.5, &ctx);
        assert_eq!(timer.display().content(), "00:00:58.500");
        timer.tick(100.0, &ctx);
        timer.tick(1.0, &ctx);
        assert_eq!(timer.display().content(), "00:00:00.000");
        assert_eq!(ended.get(), 1);
    }

    #[test]
    fn paused_timer_keeps_text() {
        let ctx = test_context();
        let mut timer = Timer::countdown(font(), &ctx);
        timer.tick(5.0, &ctx);
        assert_eq!(timer.clock().time(), 60.0);
        timer.set_format("%S");
        assert_eq!(timer.display().content(), "00");
        assert_eq!(timer.base().original_size(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn triggers_fire_through_widget() {
        let ctx = test_context();
        let mut timer = Timer::new(font(), TimerClock::new(10.0), &ctx);
        let fired = Rc::new(Cell::new(0));
        let seen = fired.clone();
        timer.clock_mut().as_countdown().start();
        timer.clock_mut().add_trigger(TimerTrigger::drops_below(5.0, move || seen.set(seen.get() + 1)));
        for _ in 0..8 {
            timer.tick(1.0, &ctx);
        }
        assert_eq!(fired.get(), 1);
        assert_eq!(timer.clock().trigger_count(), 0);
        timer.reset();
        assert_eq!(timer.display().content(), "00:00:10.000");
    }
}
