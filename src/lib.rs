//! Retained-mode 2D scene graph for kiosk style apps: positioned elements
//! with anchors, tweened animations, sprite sheets, word-wrapped text,
//! timers, hover and typing dispatch.

pub mod animation;
pub mod assets;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod events;
pub mod font;
pub mod geometry;
pub mod input;
pub mod pulse;
pub mod render;
pub mod scene;
pub mod sprite_sheet;
pub mod testing;
pub mod text_layout;
pub mod timer;
pub mod widgets;

pub use animation::{Animation, EndBehavior, PlaybackState};
pub use config::AppConfig;
pub use context::Context;
pub use element::{ElementBase, ElementGroup, ElementId, Hoverable, Pulsing, SceneElement, Typable};
pub use error::{SceneError, SceneResult};
pub use events::ElementEvent;
pub use font::{Font, FontSettings};
pub use geometry::{Anchor, Rect, WrapFlags};
pub use pulse::PulseSettings;
pub use scene::{Scene, SceneManager};
pub use sprite_sheet::{PlaybackMode, SpriteAnimation};
pub use timer::{TimerClock, TimerTrigger, TriggerCondition};
