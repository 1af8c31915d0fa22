use crate::error::{SceneError, SceneResult};
use std::fmt;
use std::mem;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Running,
}

/// What an animation does once its progress reaches either end of its range.
#[derive(Clone)]
pub enum EndBehavior {
    Pause,
    Reverse,
    Reset,
    Custom(Rc<dyn Fn(&mut Animation)>),
}

impl EndBehavior {
    fn apply(&self, animation: &mut Animation) {
        match self {
            EndBehavior::Pause => {
                animation.pause();
            }
            EndBehavior::Reverse => {
                animation.reverse();
            }
            EndBehavior::Reset => {
                animation.reset();
            }
            EndBehavior::Custom(f) => f(animation),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndBehavior::Pause => "pause",
            EndBehavior::Reverse => "reverse",
            EndBehavior::Reset => "reset",
            EndBehavior::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for EndBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-dimensional timeline. `progress` is measured in seconds of animation
/// time and always stays within `[0, duration]`.
pub struct Animation {
    duration: f32,
    progress: f32,
    speed: f32,
    state: PlaybackState,
    end_behavior: EndBehavior,
    on_complete: Vec<Box<dyn FnOnce()>>,
}

impl Animation {
    /// Panics if `duration` is not strictly positive.
    pub fn new(duration: f32) -> Self {
        match Self::try_new(duration) {
            Ok(animation) => animation,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(duration: f32) -> SceneResult<Self> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(SceneError::InvalidDuration(duration));
        }
        Ok(Self {
            duration,
            progress: 0.0,
            speed: 1.0,
            state: PlaybackState::Paused,
            end_behavior: EndBehavior::Pause,
            on_complete: Vec::new(),
        })
    }

    pub fn with_end_behavior(mut self, behavior: EndBehavior) -> Self {
        self.end_behavior = behavior;
        self
    }

    pub fn started(mut self) -> Self {
        self.state = PlaybackState::Running;
        self
    }

    pub fn set_end_behavior(&mut self, behavior: EndBehavior) -> &mut Self {
        self.end_behavior = behavior;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn start(&mut self) -> &mut Self {
        self.state = PlaybackState::Running;
        self
    }

    pub fn pause(&mut self) -> &mut Self {
        self.state = PlaybackState::Paused;
        self
    }

    /// Pauses, rewinds to zero and restores forward unit speed.
    pub fn reset(&mut self) -> &mut Self {
        self.state = PlaybackState::Paused;
        self.progress = 0.0;
        self.speed = 1.0;
        self
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.speed = -self.speed;
        self
    }

    pub fn set_speed(&mut self, speed: f32) -> &mut Self {
        self.speed = speed;
        self
    }

    pub fn speed_up(&mut self, by: f32) -> &mut Self {
        self.speed *= by;
        self
    }

    pub fn slow_down(&mut self, by: f32) -> &mut Self {
        self.speed_up(1.0 / by)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress / self.duration
    }

    /// Jumps to `duration * percent` without touching the playback state.
    pub fn set_progress_percent(&mut self, percent: f32) -> &mut Self {
        self.progress = (self.duration * percent).clamp(0.0, self.duration);
        self
    }

    /// Queues a one-shot callback for the next time a bound is reached.
    pub fn then(&mut self, callback: impl FnOnce() + 'static) -> &mut Self {
        self.on_complete.push(Box::new(callback));
        self
    }

    pub fn pending_callbacks(&self) -> usize {
        self.on_complete.len()
    }

    /// Advances the timeline. Returns `true` when a bound was reached on this
    /// tick, after completion callbacks and the end behavior have run.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_running() || self.speed == 0.0 {
            return false;
        }
        let next = self.progress + self.speed * dt;
        let completed = if self.speed > 0.0 {
            self.progress = next.min(self.duration);
            self.progress >= self.duration
        } else {
            self.progress = next.max(0.0);
            self.progress <= 0.0
        };
        if !completed {
            return false;
        }
        for callback in mem::take(&mut self.on_complete) {
            callback();
        }
        let behavior = self.end_behavior.clone();
        behavior.apply(self);
        true
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.duration)
            .field("progress", &self.progress)
            .field("speed", &self.speed)
            .field("state", &self.state)
            .field("end_behavior", &self.end_behavior)
            .field("pending_callbacks", &self.on_complete.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn paused_animation_does_not_advance() {
        let mut anim = Animation::new(1.0);
        assert!(!anim.tick(0.5));
        assert_eq!(anim.progress(), 0.0);
        anim.start().set_speed(0.0);
        assert!(!anim.tick(0.5));
        assert_eq!(anim.progress(), 0.0);
    }

    #[test]
    fn invalid_duration_is_rejected() {
        assert_eq!(Animation::try_new(0.0).unwrap_err(), SceneError::InvalidDuration(0.0));
        assert!(Animation::try_new(-1.0).is_err());
        assert!(Animation::try_new(f32::NAN).is_err());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_zero_duration() {
        let _ = Animation::new(0.0);
    }

    #[test]
    fn overshoot_clamps_and_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let mut anim = Animation::new(1.0).started();
        let counter = Rc::clone(&fired);
        anim.then(move || counter.set(counter.get() + 1));
        assert!(anim.tick(3.5));
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(fired.get(), 1);
        assert!(!anim.is_running());
        anim.start();
        anim.tick(0.25);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn reverse_behavior_ping_pongs() {
        let mut anim = Animation::new(1.0).with_end_behavior(EndBehavior::Reverse).started();
        assert!(anim.tick(1.0));
        assert_eq!(anim.speed(), -1.0);
        anim.tick(0.25);
        assert_eq!(anim.progress(), 0.75);
        assert!(anim.tick(2.0));
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.speed(), 1.0);
        assert!(anim.is_running());
    }

    #[test]
    fn reset_behavior_rewinds_and_pauses() {
        let mut anim = Animation::new(0.5).with_end_behavior(EndBehavior::Reset).started();
        anim.set_speed(2.0);
        assert!(anim.tick(0.25));
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.speed(), 1.0);
        assert!(!anim.is_running());
    }

    #[test]
    fn callbacks_run_before_end_behavior() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen = Rc::clone(&order);
        let behavior_seen = Rc::clone(&order);
        let mut anim = Animation::new(1.0)
            .with_end_behavior(EndBehavior::Custom(Rc::new(move |a: &mut Animation| {
                behavior_seen.borrow_mut().push("end");
                a.pause();
            })))
            .started();
        anim.then(move || seen.borrow_mut().push("callback"));
        anim.tick(1.0);
        assert_eq!(*order.borrow(), vec!["callback", "end"]);
        assert_eq!(anim.pending_callbacks(), 0);
    }

    #[test]
    fn percent_setter_keeps_state() {
        let mut anim = Animation::new(4.0);
        anim.set_progress_percent(0.25);
        assert_eq!(anim.progress(), 1.0);
        assert!(!anim.is_running());
        assert_eq!(anim.progress_percent(), 0.25);
        anim.speed_up(4.0).slow_down(2.0);
        assert_eq!(anim.speed(), 2.0);
    }
}
