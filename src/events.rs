use crate::element::ElementBase;
use std::collections::HashMap;
use std::fmt;

/// Named notifications an element fans out to its registered listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementEvent {
    Create,
    Resize,
    Move,
    Tick,
    Drag,
    Click,
    MouseEnter,
    MouseLeave,
    Type,
    Erase,
    TextComplete,
    TimerEnd,
}

impl ElementEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementEvent::Create => "create",
            ElementEvent::Resize => "resize",
            ElementEvent::Move => "move",
            ElementEvent::Tick => "tick",
            ElementEvent::Drag => "drag",
            ElementEvent::Click => "click",
            ElementEvent::MouseEnter => "mouse_enter",
            ElementEvent::MouseLeave => "mouse_leave",
            ElementEvent::Type => "type",
            ElementEvent::Erase => "erase",
            ElementEvent::TextComplete => "text_complete",
            ElementEvent::TimerEnd => "timer_end",
        }
    }
}

impl fmt::Display for ElementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handlers get the emitting element mutably, so they may move, resize or
/// shake it in response.
pub type Listener = Box<dyn FnMut(&mut ElementBase)>;

/// Per-element observer lists keyed by event. Handlers run synchronously in
/// registration order.
#[derive(Default)]
pub struct Listeners {
    handlers: HashMap<ElementEvent, Vec<Listener>>,
}

impl Listeners {
    pub fn on(&mut self, event: ElementEvent, listener: Listener) {
        self.handlers.entry(event).or_default().push(listener);
    }

    pub fn clear(&mut self, event: ElementEvent) {
        self.handlers.remove(&event);
    }

    pub fn count(&self, event: ElementEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }

    /// Detaches the list for `event` so it can be invoked while the owner is
    /// borrowed. Pair with [`Listeners::restore`].
    pub(crate) fn take(&mut self, event: ElementEvent) -> Vec<Listener> {
        self.handlers.remove(&event).unwrap_or_default()
    }

    /// Puts a detached list back in front of anything registered meanwhile.
    pub(crate) fn restore(&mut self, event: ElementEvent, mut list: Vec<Listener>) {
        if list.is_empty() {
            return;
        }
        if let Some(added) = self.handlers.remove(&event) {
            list.extend(added);
        }
        self.handlers.insert(event, list);
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, list) in &self.handlers {
            map.entry(&event.as_str(), &list.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_keeps_registration_order() {
        let mut listeners = Listeners::default();
        listeners.on(ElementEvent::Click, Box::new(|_| {}));
        let taken = listeners.take(ElementEvent::Click);
        assert_eq!(listeners.count(ElementEvent::Click), 0);
        listeners.on(ElementEvent::Click, Box::new(|_| {}));
        listeners.restore(ElementEvent::Click, taken);
        assert_eq!(listeners.count(ElementEvent::Click), 2);
    }

    #[test]
    fn clear_drops_only_one_event() {
        let mut listeners = Listeners::default();
        listeners.on(ElementEvent::Move, Box::new(|_| {}));
        listeners.on(ElementEvent::Tick, Box::new(|_| {}));
        listeners.clear(ElementEvent::Move);
        assert_eq!(listeners.count(ElementEvent::Move), 0);
        assert_eq!(listeners.count(ElementEvent::Tick), 1);
        assert_eq!(ElementEvent::TextComplete.to_string(), "text_complete");
    }
}
