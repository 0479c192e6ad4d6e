/// Input event types the engine understands.
/// Pointer coordinates are raw client (viewport) coordinates; the capture
/// session converts them to surface-local points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at client coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to client coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp,
    /// A custom event from the page (animation finished, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// The page finished animating the traced outline off-screen.
    pub const EXIT_FINISHED: u32 = 1;
}

/// A queue of input events.
/// DOM listeners write events into the queue; Rust drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerUp);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_keeps_order() {
        let q: InputQueue = [
            InputEvent::PointerDown { x: 1.0, y: 1.0 },
            InputEvent::PointerMove { x: 2.0, y: 2.0 },
            InputEvent::Custom { kind: InputEvent::EXIT_FINISHED, a: 0.0, b: 0.0, c: 0.0 },
        ]
        .into_iter()
        .collect();
        let kinds: Vec<_> = q.iter().copied().collect();
        assert_eq!(kinds[1], InputEvent::PointerMove { x: 2.0, y: 2.0 });
        match kinds[2] {
            InputEvent::Custom { kind, .. } => assert_eq!(kind, InputEvent::EXIT_FINISHED),
            _ => panic!("Expected Custom event"),
        }
    }
}
