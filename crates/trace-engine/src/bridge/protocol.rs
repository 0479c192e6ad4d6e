//! Flat buffer views handed to TypeScript through raw pointers.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values f32 / 4 bytes, tightly packed):
//! ```text
//! Points: [x0, y0, x1, y1, ...]      outline and trace path
//! Events: [kind, a, b, c, ...]       one GameEvent per 4 floats
//! Sounds: [id, id, ...]              u8 per sound event
//! ```
//! TypeScript reads `ptr` + `len` pairs and wraps them in typed arrays
//! without copying; the views are only valid until the next tick.

use glam::Vec2;

use crate::api::types::{GameEvent, SoundEvent};

/// Floats per point: x, y (fixed by the wire format).
pub const POINT_FLOATS: usize = 2;

/// Floats per game event: kind, a, b, c (fixed by the wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// View a point slice as interleaved x/y floats.
pub fn points_as_floats(points: &[Vec2]) -> &[f32] {
    bytemuck::cast_slice(points)
}

/// View a game event slice as packed floats.
pub fn events_as_floats(events: &[GameEvent]) -> &[f32] {
    bytemuck::cast_slice(events)
}

/// Pack sound events into the byte buffer the SoundManager polls.
pub fn pack_sounds(sounds: &[SoundEvent], out: &mut Vec<u8>) {
    out.clear();
    out.extend(sounds.iter().map(|s| s.0 as u8));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_interleaved() {
        let points = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        let floats = points_as_floats(&points);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(floats.len(), points.len() * POINT_FLOATS);
    }

    #[test]
    fn events_pack_four_floats_each() {
        let events = [
            GameEvent::new(GameEvent::STAR_EARNED, 3.0, 0.0, 0.0),
            GameEvent::trace_result(false, 42, 7),
        ];
        let floats = events_as_floats(&events);
        assert_eq!(floats.len(), 2 * EVENT_FLOATS);
        assert_eq!(&floats[4..], &[GameEvent::TRACE_RESULT, 0.0, 42.0, 7.0]);
    }

    #[test]
    fn sounds_pack_to_bytes() {
        let mut buf = vec![9, 9, 9];
        pack_sounds(&[SoundEvent::TRACE_START, SoundEvent::TRACE_SUCCESS], &mut buf);
        assert_eq!(buf, vec![1, 2]);
    }
}
