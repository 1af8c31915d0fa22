use crate::error::{SceneError, SceneResult};
use crate::render::Surface;
use glam::UVec2;
use image::{imageops, RgbaImage};
use std::f32::consts::PI;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Literal playback: one frame per `frame_time`, looping over the row.
    #[default]
    Clamped,
    /// Ease-out sweep across the row, for decorative looping icons.
    Circular,
}

impl PlaybackMode {
    pub fn frame_index(self, row_time: f32, frame_time: f32, frame_count: u32, forced: Option<u32>) -> u32 {
        match self {
            PlaybackMode::Clamped => {
                if let Some(frame) = forced {
                    return frame;
                }
                ((row_time / frame_time).floor() as u32) % frame_count
            }
            PlaybackMode::Circular => {
                let count = frame_count as f32;
                let progress = row_time / (frame_time * count);
                let index = (count * (1.0 + (progress * PI / 2.0).sin()) / 2.0).round() as u32;
                index.min(frame_count.saturating_sub(1))
            }
        }
    }
}

/// Frame clock over a fixed-grid sheet. Each row is an independent clip.
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    sheet: Arc<RgbaImage>,
    frame_counts: Vec<u32>,
    frame_times: Vec<f32>,
    frame_size: UVec2,
    row: usize,
    row_time: f32,
    forced_frame: Option<u32>,
    mode: PlaybackMode,
}

impl SpriteAnimation {
    pub fn new(
        sheet: Arc<RgbaImage>,
        frame_counts: Vec<u32>,
        frame_times: Vec<f32>,
        frame_size: Option<UVec2>,
    ) -> SceneResult<Self> {
        if frame_counts.is_empty() {
            return Err(SceneError::InvalidFrameLayout("sheet needs at least one row".to_string()));
        }
        if frame_counts.len() != frame_times.len() {
            return Err(SceneError::InvalidFrameLayout(format!(
                "{} frame counts but {} frame times",
                frame_counts.len(),
                frame_times.len()
            )));
        }
        if let Some(time) = frame_times.iter().find(|t| !(**t > 0.0)) {
            return Err(SceneError::InvalidFrameLayout(format!("frame time must be positive, got {time}")));
        }
        if frame_counts[0] == 0 {
            return Err(SceneError::EmptySpriteRow { row: 0 });
        }
        let frame_size = frame_size.unwrap_or_else(|| {
            UVec2::new(sheet.width() / frame_counts[0], sheet.height() / frame_counts.len() as u32)
        });
        Ok(Self {
            sheet,
            frame_counts,
            frame_times,
            frame_size,
            row: 0,
            row_time: 0.0,
            forced_frame: None,
            mode: PlaybackMode::Clamped,
        })
    }

    /// Whole sheet as a single frame.
    pub fn single(sheet: Arc<RgbaImage>) -> Self {
        let frame_size = UVec2::new(sheet.width(), sheet.height());
        Self {
            sheet,
            frame_counts: vec![1],
            frame_times: vec![1.0],
            frame_size,
            row: 0,
            row_time: 0.0,
            forced_frame: None,
            mode: PlaybackMode::Clamped,
        }
    }

    pub fn with_mode(mut self, mode: PlaybackMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_mode(&mut self, mode: PlaybackMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn sheet(&self) -> &Arc<RgbaImage> {
        &self.sheet
    }

    pub fn frame_size(&self) -> UVec2 {
        self.frame_size
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn row_time(&self) -> f32 {
        self.row_time
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_counts[self.row]
    }

    pub fn frame_time(&self) -> f32 {
        self.frame_times[self.row]
    }

    /// Switches clips. The row-local clock restarts at zero.
    pub fn set_row(&mut self, row: usize) -> SceneResult<&mut Self> {
        let rows = self.frame_counts.len();
        if row >= rows {
            return Err(SceneError::SpriteRowOutOfRange { row, rows });
        }
        if self.frame_counts[row] == 0 {
            return Err(SceneError::EmptySpriteRow { row });
        }
        self.row = row;
        self.row_time = 0.0;
        Ok(self)
    }

    pub fn force_frame(&mut self, frame: Option<u32>) -> &mut Self {
        self.forced_frame = frame;
        self
    }

    /// Pins the frame at `round(count * progress)` for `progress` in `[0, 1]`.
    pub fn set_progress(&mut self, progress: f32) -> &mut Self {
        let frame = (self.frame_count() as f32 * progress).round().max(0.0) as u32;
        self.forced_frame = Some(frame);
        self
    }

    pub fn tick(&mut self, dt: f32) {
        self.row_time += dt;
    }

    pub fn frame_coords(&self) -> (u32, u32) {
        let index = self.mode.frame_index(self.row_time, self.frame_time(), self.frame_count(), self.forced_frame);
        (index, self.row as u32)
    }

    /// Copies the current cell out of the sheet, clipped to the sheet bounds.
    pub fn extract(&self) -> Surface {
        let (column, row) = self.frame_coords();
        let x = column.saturating_mul(self.frame_size.x).min(self.sheet.width());
        let y = row.saturating_mul(self.frame_size.y).min(self.sheet.height());
        let width = self.frame_size.x.min(self.sheet.width() - x);
        let height = self.frame_size.y.min(self.sheet.height() - y);
        imageops::crop_imm(self.sheet.as_ref(), x, y, width, height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_sheet;

    fn sheet() -> SpriteAnimation {
        SpriteAnimation::new(Arc::new(test_sheet(4, 2, 8)), vec![4, 2], vec![0.25, 0.5], None).expect("sheet")
    }

    #[test]
    fn default_frame_size_comes_from_first_row() {
        let anim = sheet();
        assert_eq!(anim.frame_size(), UVec2::new(8, 8));
    }

    #[test]
    fn clamped_mode_loops_over_row() {
        let mut anim = sheet();
        anim.tick(0.5);
        assert_eq!(anim.frame_coords(), (2, 0));
        anim.tick(0.5);
        assert_eq!(anim.frame_coords(), (0, 0));
        anim.force_frame(Some(3));
        assert_eq!(anim.frame_coords(), (3, 0));
    }

    #[test]
    fn set_row_resets_clock_and_validates() {
        let mut anim = sheet();
        anim.tick(0.75);
        anim.set_row(1).expect("row 1");
        assert_eq!(anim.row_time(), 0.0);
        assert_eq!(
            anim.set_row(2).map(|_| ()).unwrap_err(),
            SceneError::SpriteRowOutOfRange { row: 2, rows: 2 }
        );
        let mut empty =
            SpriteAnimation::new(Arc::new(test_sheet(2, 2, 4)), vec![2, 0], vec![0.1, 0.1], None).expect("sheet");
        assert_eq!(empty.set_row(1).map(|_| ()).unwrap_err(), SceneError::EmptySpriteRow { row: 1 });
        assert_eq!(empty.row(), 0);
    }

    #[test]
    fn circular_mode_starts_mid_row_and_stays_in_range() {
        let mut anim = sheet().with_mode(PlaybackMode::Circular);
        assert_eq!(anim.frame_coords().0, 2);
        for _ in 0..40 {
            anim.tick(0.1);
            assert!(anim.frame_coords().0 < 4);
        }
    }

    #[test]
    fn extract_returns_cell_pixels() {
        let mut anim = sheet();
        anim.set_row(1).expect("row");
        anim.tick(0.5);
        let frame = anim.extract();
        assert_eq!(frame.dimensions(), (8, 8));
        assert_eq!(frame.get_pixel(0, 0).0, [1, 1, 0, 255]);
    }

    #[test]
    fn extract_clips_past_sheet_edge() {
        let mut anim =
            SpriteAnimation::new(Arc::new(test_sheet(3, 1, 8)), vec![3], vec![0.1], Some(UVec2::new(10, 8)))
                .expect("sheet");
        anim.force_frame(Some(2));
        assert_eq!(anim.extract().dimensions(), (4, 8));
        anim.set_progress(1.0);
        assert_eq!(anim.extract().dimensions(), (0, 8));
    }

    #[test]
    fn layout_mismatch_is_rejected() {
        let err = SpriteAnimation::new(Arc::new(test_sheet(1, 1, 4)), vec![1, 1], vec![0.1], None).unwrap_err();
        assert!(matches!(err, SceneError::InvalidFrameLayout(_)));
    }
}
