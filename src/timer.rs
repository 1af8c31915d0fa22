use crate::error::{SceneError, SceneResult};
use std::fmt;

/// Threshold predicate evaluated on a `(previous, current)` sample pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerCondition {
    DropsBelow(f32),
    Reaches(f32),
    IsBetween { high: f32, low: f32 },
}

impl TriggerCondition {
    /// `previous` is `None` for the evaluation made when a trigger is first
    /// attached. `IsBetween` only looks at `current`.
    pub fn is_met(&self, previous: Option<f32>, current: f32) -> bool {
        match *self {
            TriggerCondition::DropsBelow(threshold) => match previous {
                Some(prev) => prev >= threshold && threshold >= current,
                None => threshold >= current,
            },
            TriggerCondition::Reaches(threshold) => match previous {
                Some(prev) => prev <= threshold && threshold <= current,
                None => threshold <= current,
            },
            TriggerCondition::IsBetween { high, low } => high >= current && current >= low,
        }
    }
}

pub struct TimerTrigger {
    condition: TriggerCondition,
    handler: Box<dyn FnMut()>,
    remove_on_fire: bool,
}

impl TimerTrigger {
    pub fn new(condition: TriggerCondition, handler: impl FnMut() + 'static) -> Self {
        Self { condition, handler: Box::new(handler), remove_on_fire: true }
    }

    pub fn drops_below(threshold: f32, handler: impl FnMut() + 'static) -> Self {
        Self::new(TriggerCondition::DropsBelow(threshold), handler)
    }

    pub fn reaches(threshold: f32, handler: impl FnMut() + 'static) -> Self {
        Self::new(TriggerCondition::Reaches(threshold), handler)
    }

    pub fn between(high: f32, low: f32, handler: impl FnMut() + 'static) -> SceneResult<Self> {
        if low > high {
            return Err(SceneError::InvalidTimerRange { low, high });
        }
        Ok(Self::new(TriggerCondition::IsBetween { high, low }, handler))
    }

    /// Keeps the trigger attached after it fires.
    pub fn repeating(mut self) -> Self {
        self.remove_on_fire = false;
        self
    }

    pub fn condition(&self) -> TriggerCondition {
        self.condition
    }

    pub fn removes_on_fire(&self) -> bool {
        self.remove_on_fire
    }

    /// Runs the handler when the condition holds. Returns whether it fired.
    fn evaluate(&mut self, previous: Option<f32>, current: f32) -> bool {
        if !self.condition.is_met(previous, current) {
            return false;
        }
        tracing::trace!(condition = ?self.condition, current, "timer trigger fired");
        (self.handler)();
        true
    }
}

impl fmt::Debug for TimerTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerTrigger")
            .field("condition", &self.condition)
            .field("remove_on_fire", &self.remove_on_fire)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTick {
    pub fired: usize,
    /// The clock arrived at the bound it was travelling towards on this tick.
    pub ended: bool,
}

/// Scalar clock clamped to `[low, high]` with threshold triggers.
#[derive(Debug)]
pub struct TimerClock {
    initial: f32,
    current: f32,
    low: f32,
    high: f32,
    multiplier: f32,
    running: bool,
    triggers: Vec<(TriggerId, TimerTrigger)>,
    next_trigger: u64,
}

pub const DEFAULT_TIMER_HIGH: f32 = 24.0 * 60.0 * 60.0;

impl TimerClock {
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            current: initial,
            low: 0.0,
            high: DEFAULT_TIMER_HIGH,
            multiplier: 1.0,
            running: false,
            triggers: Vec::new(),
            next_trigger: 0,
        }
    }

    pub fn with_limits(mut self, low: f32, high: f32) -> SceneResult<Self> {
        if low > high {
            return Err(SceneError::InvalidTimerRange { low, high });
        }
        self.low = low;
        self.high = high;
        self.current = self.current.clamp(low, high);
        Ok(self)
    }

    pub fn limits(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    pub fn time(&self) -> f32 {
        self.current
    }

    pub fn initial_time(&self) -> f32 {
        self.initial
    }

    pub fn passed_time(&self) -> f32 {
        (self.initial - self.current).abs()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn start(&mut self) -> &mut Self {
        self.running = true;
        self
    }

    pub fn pause(&mut self) -> &mut Self {
        self.running = false;
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.current = self.initial.clamp(self.low, self.high);
        self
    }

    pub fn as_countdown(&mut self) -> &mut Self {
        self.multiplier = -1.0;
        self
    }

    pub fn as_timer(&mut self) -> &mut Self {
        self.multiplier = 1.0;
        self
    }

    pub fn set_multiplier(&mut self, multiplier: f32) -> &mut Self {
        self.multiplier = multiplier;
        self
    }

    /// Attaches a trigger and evaluates it once against the current value.
    /// A self-removing trigger that already holds fires and is dropped here.
    pub fn add_trigger(&mut self, mut trigger: TimerTrigger) -> TriggerId {
        let id = TriggerId(self.next_trigger);
        self.next_trigger += 1;
        if trigger.evaluate(None, self.current) && trigger.remove_on_fire {
            return id;
        }
        self.triggers.push((id, trigger));
        id
    }

    pub fn remove_trigger(&mut self, id: TriggerId) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|(existing, _)| *existing != id);
        self.triggers.len() != before
    }

    pub fn clear_triggers(&mut self) {
        self.triggers.clear();
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn tick(&mut self, dt: f32) -> ClockTick {
        if !self.running {
            return ClockTick::default();
        }
        let previous = self.current;
        self.current = (self.current + dt * self.multiplier).clamp(self.low, self.high);
        let current = self.current;

        let mut fired = 0;
        self.triggers.retain_mut(|(_, trigger)| {
            if trigger.evaluate(Some(previous), current) {
                fired += 1;
                !trigger.remove_on_fire
            } else {
                true
            }
        });

        let bound = if self.multiplier > 0.0 {
            Some(self.high)
        } else if self.multiplier < 0.0 {
            Some(self.low)
        } else {
            None
        };
        let ended = bound.is_some_and(|bound| current == bound && previous != bound);
        ClockTick { fired, ended }
    }
}

/// Expands `%H`, `%M`, `%S` (two digits) and `%m` (milliseconds, three digits).
pub fn format_clock(seconds: f32, format: &str) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0).floor();
    let mut rest = total - hours * 3600.0;
    let minutes = (rest / 60.0).floor();
    rest -= minutes * 60.0;
    let whole = rest.floor();
    let millis = (((rest - whole) * 1000.0) as u32).min(999);
    format
        .replace("%H", &format!("{:02}", hours as u32))
        .replace("%M", &format!("{:02}", minutes as u32))
        .replace("%S", &format!("{:02}", whole as u32))
        .replace("%m", &format!("{millis:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn drops_below_checks_the_crossing() {
        let cond = TriggerCondition::DropsBelow(5.0);
        assert!(cond.is_met(Some(6.0), 4.0));
        assert!(cond.is_met(Some(5.0), 5.0));
        assert!(!cond.is_met(Some(4.0), 3.0));
        assert!(cond.is_met(None, 3.0));
    }

    #[test]
    fn reaches_and_between() {
        let reaches = TriggerCondition::Reaches(10.0);
        assert!(reaches.is_met(Some(9.5), 10.5));
        assert!(!reaches.is_met(Some(10.5), 11.0));
        let between = TriggerCondition::IsBetween { high: 3.0, low: 1.0 };
        assert!(between.is_met(Some(100.0), 2.0));
        assert!(!between.is_met(None, 0.5));
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(TimerTrigger::between(1.0, 3.0, || {}).is_err());
        assert_eq!(
            TimerClock::new(0.0).with_limits(5.0, 1.0).unwrap_err(),
            SceneError::InvalidTimerRange { low: 5.0, high: 1.0 }
        );
    }

    #[test]
    fn trigger_satisfied_on_attach_fires_immediately() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut clock = TimerClock::new(3.0);
        clock.add_trigger(TimerTrigger::drops_below(5.0, move || counter.set(counter.get() + 1)));
        assert_eq!(hits.get(), 1);
        assert_eq!(clock.trigger_count(), 0);
    }

    #[test]
    fn repeating_trigger_stays_attached() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut clock = TimerClock::new(0.0);
        clock.add_trigger(TimerTrigger::between(10.0, 0.0, move || counter.set(counter.get() + 1)).expect("range").repeating());
        clock.start();
        clock.tick(1.0);
        clock.tick(1.0);
        assert_eq!(hits.get(), 3);
        assert_eq!(clock.trigger_count(), 1);
    }

    #[test]
    fn end_is_reported_once_per_crossing() {
        let mut clock = TimerClock::new(1.0);
        clock.as_countdown().start();
        assert!(!clock.tick(0.5).ended);
        assert!(clock.tick(0.75).ended);
        assert_eq!(clock.time(), 0.0);
        assert!(!clock.tick(0.5).ended);
        clock.reset();
        assert!(clock.tick(2.0).ended);
    }

    #[test]
    fn paused_clock_holds_value() {
        let mut clock = TimerClock::new(2.0);
        assert_eq!(clock.tick(1.0), ClockTick::default());
        assert_eq!(clock.time(), 2.0);
        assert_eq!(clock.passed_time(), 0.0);
    }

    #[test]
    fn format_expands_all_fields() {
        assert_eq!(format_clock(3723.25, "%H:%M:%S.%m"), "01:02:03.250");
        assert_eq!(format_clock(59.5, "%S.%m"), "59.500");
        assert_eq!(format_clock(0.0, "%M:%S"), "00:00");
    }
}
