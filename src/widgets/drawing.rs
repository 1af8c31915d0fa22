use crate::animation::{Animation, EndBehavior};
use crate::config::PaletteRole;
use crate::context::Context;
use crate::element::hover::{click, enter, leave};
use crate::element::{ElementBase, ElementGroup, HoverState, Hoverable, SceneElement};
use crate::error::{SceneError, SceneResult};
use crate::geometry::{Anchor, Rect, WrapFlags};
use crate::input::MouseButton;
use crate::render::{lerp_color, solid_surface, stroke_border, Canvas, Color, Surface};
use glam::{UVec2, Vec2};
use std::f32::consts::PI;

pub const HOVER_FADE_ANIMATION: &str = "hover_color_transition";
pub const GRID_BLINK_ANIMATION: &str = "blink";

const HOVER_FADE_TIME: f32 = 0.5;
const GRID_BLINK_TIME: f32 = 0.5;
const GRID_BLINK_FREQUENCY: f32 = 2.0;
pub const CELL_SIZE: f32 = 30.0;

/// One toggleable square of a [`DrawingGrid`].
pub struct DrawingCell {
    base: ElementBase,
    hover: HoverState,
    hover_color: Color,
    empty_color: Color,
    filled_color: Color,
    border_color: Color,
    filled: bool,
}

impl DrawingCell {
    pub fn new(size: Vec2, ctx: &Context) -> Self {
        let mut base = ElementBase::new(size, ctx);
        base.add_animation(HOVER_FADE_ANIMATION, Animation::new(HOVER_FADE_TIME).with_end_behavior(EndBehavior::Pause));
        Self {
            base,
            hover: HoverState::default(),
            hover_color: ctx.color(PaletteRole::Foreground),
            empty_color: ctx.color(PaletteRole::Background),
            filled_color: ctx.color(PaletteRole::Foreground),
            border_color: ctx.color(PaletteRole::ForegroundAlt),
            filled: false,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) -> &mut Self {
        self.filled = filled;
        self
    }

    pub fn filled_color(&self) -> Color {
        self.filled_color
    }

    pub fn set_filled_color(&mut self, color: Color) -> &mut Self {
        self.filled_color = color;
        self
    }

    pub fn invert_filled(&mut self) {
        self.filled = !self.filled;
        let filled = self.filled;
        if let Some(anim) = self.base.animation_mut(HOVER_FADE_ANIMATION) {
            if filled {
                anim.reset();
            } else {
                anim.set_progress_percent(1.0);
            }
        }
    }

    /// Fill color, faded towards the hover color while the transition runs.
    pub fn drawing_color(&self) -> Color {
        let color = if self.filled { self.filled_color } else { self.empty_color };
        match self.base.animation(HOVER_FADE_ANIMATION) {
            Some(anim) if anim.is_running() => lerp_color(color, self.hover_color, anim.progress_percent()),
            _ if self.hover.is_hovered() && !self.filled => self.hover_color,
            _ => color,
        }
    }
}

impl SceneElement for DrawingCell {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn render(&self) -> Vec<Surface> {
        let mut surface = solid_surface(self.base.original_size(), self.drawing_color());
        stroke_border(&mut surface, self.border_color, 1);
        vec![surface]
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        Some(self)
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }
}

impl Hoverable for DrawingCell {
    fn hover(&self) -> &HoverState {
        &self.hover
    }

    fn hover_mut(&mut self) -> &mut HoverState {
        &mut self.hover
    }

    fn on_mouse_enter(&mut self) {
        enter(self);
        if self.hover.is_hovered() {
            if let Some(anim) = self.base.animation_mut(HOVER_FADE_ANIMATION) {
                anim.set_progress_percent(1.0);
            }
        }
    }

    fn on_mouse_leave(&mut self) {
        leave(self);
        if !self.filled {
            if let Some(anim) = self.base.animation_mut(HOVER_FADE_ANIMATION) {
                anim.set_speed(-1.0).start();
            }
        }
    }

    fn on_mouse_click(&mut self, pos: Vec2, button: MouseButton, frame: u64) -> bool {
        let accepted = click(self, pos, button, frame);
        if accepted {
            self.invert_filled();
        }
        accepted
    }
}

/// `columns x rows` cells laid out edge to edge, in row-major order.
pub struct DrawingGrid {
    group: ElementGroup,
    grid: UVec2,
    filled_color: Color,
    blink_color: Color,
    on_blink_end: Option<Box<dyn FnOnce()>>,
}

impl DrawingGrid {
    pub fn new(columns: u32, rows: u32, ctx: &Context) -> SceneResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(SceneError::InvalidGridSize { columns, rows });
        }
        let cells = (0..columns * rows)
            .map(|_| {
                let mut cell = DrawingCell::new(Vec2::splat(CELL_SIZE), ctx);
                cell.base_mut().set_anchor(Anchor::TopLeft);
                Box::new(cell) as Box<dyn SceneElement>
            })
            .collect();
        let mut group = ElementGroup::new(cells, ctx);
        group.set_original_size(Vec2::new(columns as f32, rows as f32) * CELL_SIZE);
        group
            .base_mut()
            .add_animation(GRID_BLINK_ANIMATION, Animation::new(GRID_BLINK_TIME).with_end_behavior(EndBehavior::Reset));
        let mut grid = Self {
            group,
            grid: UVec2::new(columns, rows),
            filled_color: ctx.color(PaletteRole::Foreground),
            blink_color: ctx.color(PaletteRole::Error),
            on_blink_end: None,
        };
        grid.refresh_cells_size();
        Ok(grid)
    }

    pub fn grid_size(&self) -> UVec2 {
        self.grid
    }

    pub fn group(&self) -> &ElementGroup {
        &self.group
    }

    pub fn cells(&self) -> impl Iterator<Item = &DrawingCell> {
        self.group.children().iter().filter_map(|child| child.downcast_ref::<DrawingCell>())
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut DrawingCell> {
        self.group.children_mut().iter_mut().filter_map(|child| child.downcast_mut::<DrawingCell>())
    }

    pub fn cell_mut(&mut self, column: u32, row: u32) -> Option<&mut DrawingCell> {
        if column >= self.grid.x || row >= self.grid.y {
            return None;
        }
        let index = (row * self.grid.x + column) as usize;
        self.cells_mut().nth(index)
    }

    /// Splits the grid rectangle into equal whole-pixel cells.
    pub fn refresh_cells_size(&mut self) {
        let rect = self.group.base().rect();
        let grid = self.grid;
        let unit = (rect.size / grid.as_vec2()).floor();
        for (index, cell) in self.group.children_mut().iter_mut().enumerate() {
            let index = index as u32;
            let slot = UVec2::new(index % grid.x, index / grid.x).as_vec2();
            cell.base_mut().set_original_size(unit).set_anchor(Anchor::TopLeft).set_position(rect.min + slot * unit);
        }
        self.group.sync_holders();
    }

    /// Whether every cell's fill matches `pattern[row][column]`. Missing
    /// entries count as mismatches.
    pub fn compare(&self, pattern: &[Vec<bool>]) -> bool {
        let columns = self.grid.x as usize;
        self.cells().enumerate().all(|(index, cell)| {
            pattern.get(index / columns).and_then(|row| row.get(index % columns)) == Some(&cell.is_filled())
        })
    }

    pub fn clear_grid(&mut self) {
        for cell in self.cells_mut() {
            cell.set_filled(false);
        }
    }

    /// Flashes filled cells with `color` and locks input until the flash
    /// ends, then clears the grid and runs `then`.
    pub fn blink(&mut self, color: Color, then: Option<Box<dyn FnOnce()>>) {
        self.blink_color = color;
        if let Some(anim) = self.group.base_mut().animation_mut(GRID_BLINK_ANIMATION) {
            anim.start();
        }
        for cell in self.cells_mut() {
            cell.hover_mut().set_enabled(false);
        }
        self.on_blink_end = then;
    }

    pub fn is_blinking(&self) -> bool {
        self.group.base().animation(GRID_BLINK_ANIMATION).is_some_and(Animation::is_running)
    }

    fn end_blink(&mut self) {
        let filled_color = self.filled_color;
        for cell in self.cells_mut() {
            cell.hover_mut().set_enabled(true);
            cell.set_filled_color(filled_color).set_filled(false);
        }
        if let Some(then) = self.on_blink_end.take() {
            then();
        }
    }
}

impl SceneElement for DrawingGrid {
    fn base(&self) -> &ElementBase {
        self.group.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.group.base_mut()
    }

    fn render(&self) -> Vec<Surface> {
        self.group.render()
    }

    fn tick(&mut self, dt: f32, ctx: &Context) {
        let completed = self.group.advance(dt, ctx);
        if completed.iter().any(|name| name == GRID_BLINK_ANIMATION) {
            self.end_blink();
            return;
        }
        let Some(anim) = self.group.base().animation(GRID_BLINK_ANIMATION).filter(|anim| anim.is_running()) else {
            return;
        };
        let color = if (anim.progress_percent() * GRID_BLINK_FREQUENCY * PI).cos() > 0.0 {
            self.blink_color
        } else {
            self.filled_color
        };
        for cell in self.cells_mut() {
            cell.set_filled_color(color);
        }
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.group.draw(canvas);
    }

    fn move_by(&mut self, delta: Vec2, wrap: WrapFlags, holder: Option<Rect>) -> WrapFlags {
        let wrapped = self.group.move_by(delta, wrap, holder);
        self.refresh_cells_size();
        wrapped
    }

    fn set_relative_pos(&mut self, rel: Vec2, holder: Option<Rect>) {
        self.group.set_relative_pos(rel, holder);
        self.refresh_cells_size();
    }

    /// Always keeps the grid's aspect ratio.
    fn set_relative_width(&mut self, rel: f32, _keep_ratio: bool, holder: Option<Rect>) {
        self.group.set_relative_width(rel, true, holder);
        self.refresh_cells_size();
    }

    fn set_relative_height(&mut self, rel: f32, _keep_ratio: bool, holder: Option<Rect>) {
        self.group.set_relative_height(rel, true, holder);
        self.refresh_cells_size();
    }

    fn set_holder(&mut self, holder: Option<Rect>) {
        self.group.set_holder(holder);
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        Some(&self.group)
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(&mut self.group)
    }

    fn as_group(&self) -> Option<&ElementGroup> {
        Some(&self.group)
    }

    fn as_group_mut(&mut self) -> Option<&mut ElementGroup> {
        Some(&mut self.group)
    }
}
