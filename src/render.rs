//! Boundary with the pixel backend. Elements produce `Surface`s; the host
//! supplies a `Canvas` that knows how to put them on screen.

use glam::Vec2;
use image::{Rgba, RgbaImage};

pub type Color = Rgba<u8>;
pub type Surface = RgbaImage;

pub trait Canvas {
    /// Draws `surface` with its top-left corner at `position`, scaled by
    /// `scale` on each axis.
    fn blit(&mut self, surface: &Surface, position: Vec2, scale: Vec2);

    fn fill(&mut self, color: Color);
}

pub fn solid_surface(size: Vec2, color: Color) -> Surface {
    let width = size.x.max(0.0).round() as u32;
    let height = size.y.max(0.0).round() as u32;
    RgbaImage::from_pixel(width, height, color)
}

/// Paints a `thickness` pixel frame along the surface edges.
pub fn stroke_border(surface: &mut Surface, color: Color, thickness: u32) {
    let (width, height) = surface.dimensions();
    for (x, y, pixel) in surface.enumerate_pixels_mut() {
        let on_edge = x < thickness
            || y < thickness
            || x + thickness >= width
            || y + thickness >= height;
        if on_edge {
            *pixel = color;
        }
    }
}

pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Rgba([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2]), mix(from[3], to[3])])
}
