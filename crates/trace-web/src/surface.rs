use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};

use trace_engine::{InputEvent, InputQueue, Surface};

#[derive(Debug, Clone, Copy)]
enum PointerPhase {
    Start,
    Move,
    End,
}

/// DOM event name, the gesture phase it maps to, and whether it is a touch event.
const LISTENERS: [(&str, PointerPhase, bool); 6] = [
    ("touchstart", PointerPhase::Start, true),
    ("touchmove", PointerPhase::Move, true),
    ("touchend", PointerPhase::End, true),
    ("mousedown", PointerPhase::Start, false),
    ("mousemove", PointerPhase::Move, false),
    ("mouseup", PointerPhase::End, false),
];

/// A canvas element as a capture surface.
///
/// Listeners translate DOM events into [`InputEvent`]s on the shared queue;
/// the runner drains the queue on the next tick.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    queue: Rc<RefCell<InputQueue>>,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, queue: Rc<RefCell<InputQueue>>) -> Self {
        Self {
            canvas,
            queue,
            listeners: Vec::new(),
        }
    }
}

/// Client coordinates of a mouse event or of the first active touch.
///
/// The listener name decides the event type; `instanceof TouchEvent` throws
/// on desktop browsers that lack the constructor.
fn client_position(event: &Event, touch: bool) -> Option<Vec2> {
    if touch {
        let first = event.unchecked_ref::<TouchEvent>().touches().get(0)?;
        return Some(Vec2::new(first.client_x() as f32, first.client_y() as f32));
    }
    let mouse = event.unchecked_ref::<MouseEvent>();
    Some(Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32))
}

fn to_input(phase: PointerPhase, event: &Event, touch: bool) -> Option<InputEvent> {
    match phase {
        PointerPhase::Start => client_position(event, touch).map(|p| InputEvent::PointerDown { x: p.x, y: p.y }),
        PointerPhase::Move => client_position(event, touch).map(|p| InputEvent::PointerMove { x: p.x, y: p.y }),
        PointerPhase::End => Some(InputEvent::PointerUp),
    }
}

impl Surface for CanvasSurface {
    fn origin(&self) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(rect.left() as f32, rect.top() as f32)
    }

    fn attach(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        for (name, phase, touch) in LISTENERS {
            let queue = self.queue.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if touch {
                    // Keep the page from scrolling under a tracing finger.
                    event.prevent_default();
                }
                if let Some(input) = to_input(phase, &event, touch) {
                    queue.borrow_mut().push(input);
                }
            });
            if let Err(e) = self
                .canvas
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("Could not listen for {name}: {e:?}");
                continue;
            }
            self.listeners.push((name, closure));
        }
    }

    fn detach(&mut self) {
        for (name, closure) in self.listeners.drain(..) {
            if let Err(e) = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("Could not remove {name} listener: {e:?}");
            }
        }
    }
}

/// Clones share the canvas and queue but start with no listeners.
impl Clone for CanvasSurface {
    fn clone(&self) -> Self {
        Self::new(self.canvas.clone(), self.queue.clone())
    }
}

impl Drop for CanvasSurface {
    fn drop(&mut self) {
        // A dropped closure still registered on the canvas would throw when invoked.
        self.detach();
    }
}
