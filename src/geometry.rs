use bitflags::bitflags;
use glam::Vec2;

/// Axis-aligned rectangle in canvas pixels. `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self { min: Vec2::ZERO, size }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Half-open hit test: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let min = self.min.min(other.min);
        let max = self.max().max(other.max());
        Rect { min, size: max - min }
    }
}

/// Named reference point of a rectangle used for relative positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    TopLeft,
    MidTop,
    TopRight,
    MidLeft,
    #[default]
    Center,
    MidRight,
    BottomLeft,
    MidBottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::MidTop,
        Anchor::TopRight,
        Anchor::MidLeft,
        Anchor::Center,
        Anchor::MidRight,
        Anchor::BottomLeft,
        Anchor::MidBottom,
        Anchor::BottomRight,
    ];

    /// Fraction of the rectangle size between `min` and the anchor point.
    pub fn factors(self) -> Vec2 {
        match self {
            Anchor::TopLeft => Vec2::new(0.0, 0.0),
            Anchor::MidTop => Vec2::new(0.5, 0.0),
            Anchor::TopRight => Vec2::new(1.0, 0.0),
            Anchor::MidLeft => Vec2::new(0.0, 0.5),
            Anchor::Center => Vec2::new(0.5, 0.5),
            Anchor::MidRight => Vec2::new(1.0, 0.5),
            Anchor::BottomLeft => Vec2::new(0.0, 1.0),
            Anchor::MidBottom => Vec2::new(0.5, 1.0),
            Anchor::BottomRight => Vec2::new(1.0, 1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::MidTop => "mid_top",
            Anchor::TopRight => "top_right",
            Anchor::MidLeft => "mid_left",
            Anchor::Center => "center",
            Anchor::MidRight => "mid_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::MidBottom => "mid_bottom",
            Anchor::BottomRight => "bottom_right",
        }
    }
}

pub fn anchor_point(rect: &Rect, anchor: Anchor) -> Vec2 {
    rect.min + rect.size * anchor.factors()
}

/// Moves `rect` so that its `anchor` point lands on `pos`. Size is untouched.
pub fn set_anchor_point(rect: &mut Rect, anchor: Anchor, pos: Vec2) {
    rect.min = pos - rect.size * anchor.factors();
}

bitflags! {
    /// Axes on which an element teleports to the opposite edge of its holder
    /// once it has fully left it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WrapFlags: u8 {
        const X = 0b01;
        const Y = 0b10;
        const BOTH = Self::X.bits() | Self::Y.bits();
    }
}

/// Applies wrap-around for a rectangle that was just translated by `delta`.
/// Returns the axes that actually wrapped.
pub fn wrap_within(rect: &mut Rect, holder: &Rect, delta: Vec2, wrap: WrapFlags) -> WrapFlags {
    let mut wrapped = WrapFlags::empty();
    if wrap.contains(WrapFlags::X) {
        if holder.left() > rect.right() {
            rect.min.x = if delta.x < 0.0 { holder.right() } else { holder.left() - rect.width() };
            wrapped |= WrapFlags::X;
        } else if holder.right() < rect.left() {
            rect.min.x = if delta.x > 0.0 { holder.left() - rect.width() } else { holder.right() };
            wrapped |= WrapFlags::X;
        }
    }
    if wrap.contains(WrapFlags::Y) {
        if holder.top() > rect.bottom() {
            rect.min.y = if delta.y < 0.0 { holder.bottom() } else { holder.top() - rect.height() };
            wrapped |= WrapFlags::Y;
        } else if holder.bottom() < rect.top() {
            rect.min.y = if delta.y > 0.0 { holder.top() - rect.height() } else { holder.bottom() };
            wrapped |= WrapFlags::Y;
        }
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_point_round_trips_for_every_anchor() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(40.0, 30.0));
        for anchor in Anchor::ALL {
            let point = anchor_point(&rect, anchor);
            let mut moved = Rect::from_size(rect.size);
            set_anchor_point(&mut moved, anchor, point);
            assert_eq!(moved, rect, "anchor {} should restore the rect", anchor.label());
        }
    }

    #[test]
    fn contains_excludes_far_edges() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn wrap_past_right_edge_reenters_from_left() {
        let holder = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut rect = Rect::new(Vec2::new(101.0, 10.0), Vec2::new(20.0, 20.0));
        let wrapped = wrap_within(&mut rect, &holder, Vec2::new(5.0, 0.0), WrapFlags::X);
        assert_eq!(wrapped, WrapFlags::X);
        assert_eq!(rect.left(), -20.0);
        assert_eq!(rect.top(), 10.0);
    }

    #[test]
    fn wrap_ignores_axes_not_requested() {
        let holder = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut rect = Rect::new(Vec2::new(10.0, 150.0), Vec2::new(20.0, 20.0));
        let wrapped = wrap_within(&mut rect, &holder, Vec2::new(0.0, 5.0), WrapFlags::X);
        assert!(wrapped.is_empty());
        assert_eq!(rect.top(), 150.0);
        let wrapped = wrap_within(&mut rect, &holder, Vec2::new(0.0, 5.0), WrapFlags::BOTH);
        assert_eq!(wrapped, WrapFlags::Y);
        assert_eq!(rect.top(), -20.0);
    }

    #[test]
    fn union_covers_both_rects() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(20.0, -5.0), Vec2::new(5.0, 5.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec2::new(0.0, -5.0));
        assert_eq!(u.max(), Vec2::new(25.0, 10.0));
    }
}
