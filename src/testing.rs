//! Deterministic stand-ins for the rasterizer and the render target, shared by
//! unit and integration tests.

use crate::context::Context;
use crate::font::Font;
use crate::render::{Canvas, Color, Surface};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::sync::Arc;

/// Fixed-advance font: every character is `advance` pixels wide.
#[derive(Debug, Clone)]
pub struct MonoFont {
    advance: u32,
    line_height: u32,
}

impl MonoFont {
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self { advance, line_height }
    }

    pub fn shared(advance: u32, line_height: u32) -> Arc<dyn Font> {
        Arc::new(Self::new(advance, line_height))
    }
}

impl Font for MonoFont {
    fn name(&self) -> &str {
        "mono"
    }

    fn size(&self) -> u32 {
        self.line_height
    }

    fn measure(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.advance
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn render_line(&self, text: &str, color: Color) -> Surface {
        RgbaImage::from_pixel(self.measure(text), self.line_height, color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blit {
    pub size: (u32, u32),
    pub position: Vec2,
    pub scale: Vec2,
    /// Top-left pixel of the blitted surface, if any.
    pub color: Option<Color>,
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub blits: Vec<Blit>,
    pub fills: Vec<Color>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn blit(&mut self, surface: &Surface, position: Vec2, scale: Vec2) {
        let color = surface.get_pixel_checked(0, 0).copied();
        self.blits.push(Blit { size: surface.dimensions(), position, scale, color });
    }

    fn fill(&mut self, color: Color) {
        self.fills.push(color);
    }
}

/// Sheet where every cell is a solid color encoding its (column, row).
pub fn test_sheet(columns: u32, rows: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(columns * cell, rows * cell, |x, y| {
        Rgba([(x / cell) as u8, (y / cell) as u8, 0, 255])
    })
}

pub fn test_context() -> Context {
    Context::with_display(800, 600)
}
