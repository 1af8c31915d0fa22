//! Greedy word wrap shared by every text element.

use crate::font::Font;
use glam::UVec2;

/// A `max_width` of zero disables wrapping.
pub const UNBOUNDED: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Top-left of the fragment relative to the text block.
    pub offset: UVec2,
    pub width: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLayout {
    pub fragments: Vec<Fragment>,
    pub size: UVec2,
}

impl TextLayout {
    pub fn line_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn last(&self) -> Option<&Fragment> {
        self.fragments.last()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.text.as_str())
    }
}

/// Splits `text` into rendered lines. Explicit newlines are hard breaks;
/// inside a line, words separated by single spaces are packed until the next
/// one would push the line past `max_width`. A word that is too wide on its
/// own gets a line to itself and is never split.
pub fn wrap_lines(text: &str, max_width: u32, measure: impl Fn(&str) -> u32) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        let mut current: Vec<&str> = Vec::new();
        for word in line.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current.join(" "), word)
            };
            if max_width > UNBOUNDED && measure(&candidate) > max_width {
                if current.is_empty() {
                    out.push(candidate);
                } else {
                    out.push(current.join(" "));
                    current.clear();
                    current.push(word);
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            out.push(current.join(" "));
        }
    }
    out
}

pub fn layout(text: &str, max_width: u32, font: &dyn Font) -> TextLayout {
    let line_height = font.line_height();
    let mut size = UVec2::ZERO;
    let fragments: Vec<Fragment> = wrap_lines(text, max_width, |s| font.measure(s))
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = font.measure(&text);
            size.x = size.x.max(width);
            Fragment { offset: UVec2::new(0, i as u32 * line_height), width, text }
        })
        .collect();
    size.y = fragments.len() as u32 * line_height;
    TextLayout { fragments, size }
}
