//! Concrete elements built on the shared element model.

mod binary_drop;
mod button;
mod drawing;
mod sprite;
mod text;
mod text_area;
mod timer;

pub use binary_drop::BinaryDropText;
pub use button::{Button, CLICK_ANIMATION, HOVER_ANIMATION};
pub use drawing::{DrawingCell, DrawingGrid, CELL_SIZE};
pub use sprite::{PulsingImage, Sprite};
pub use text::{PulsingText, TextDisplay};
pub use text_area::{BlinkTarget, TextArea, ERROR_ANIMATION, PROMPT_ANIMATION};
pub use timer::{Timer, DEFAULT_CLOCK_FORMAT, DEFAULT_CLOCK_SECONDS};
