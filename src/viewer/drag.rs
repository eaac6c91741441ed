/// Substitute width when the track has not been measured yet, so the
/// pointer-to-sample mapping stays defined instead of dividing by zero.
pub const FALLBACK_TRACK_WIDTH_PX: f32 = 1000.0;
/// Pixel geometry of the navigation track, supplied by the rendering layer
/// every frame. The core never measures any surface itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    pub left_px: f32,
    pub width_px: f32,
}
impl TrackGeometry {
    pub fn new(left_px: f32, width_px: f32) -> Self {
        Self { left_px, width_px }
    }
    pub fn effective_width(&self) -> f32 {
        if self.width_px > 0.0 {
            self.width_px
        } else {
            FALLBACK_TRACK_WIDTH_PX
        }
    }
    /// Horizontal pointer position as a fraction of the track, clamped to
    /// `[0, 1]` so dragging past either edge pins the window there.
    pub fn percentage_at(&self, pointer_x: f32) -> f32 {
        ((pointer_x - self.left_px) / self.effective_width()).clamp(0.0, 1.0)
    }
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum DragPhase {
    #[default]
    Idle,
    Dragging,
}
/// Two-state pointer machine for the navigation track.
///
/// A press on the track enters `Dragging` and immediately yields a target
/// start (click-to-jump). While dragging, every move yields a new target
/// even when the pointer has left the track bounds. `release` returns to
/// `Idle` and must be called on every exit path of a gesture.
#[derive(Debug, Default)]
pub struct DragController {
    phase: DragPhase,
}
impl DragController {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }
    /// Pointer pressed on the track: enter `Dragging` and jump to the
    /// pressed position.
    pub fn press(&mut self, pointer_x: f32, track: TrackGeometry, total_samples: usize) -> usize {
        self.phase = DragPhase::Dragging;
        target_start(pointer_x, track, total_samples)
    }
    /// Pointer moved anywhere. Yields a target start only while dragging.
    pub fn pointer_moved(
        &mut self,
        pointer_x: f32,
        track: TrackGeometry,
        total_samples: usize,
    ) -> Option<usize> {
        match self.phase {
            DragPhase::Dragging => Some(target_start(pointer_x, track, total_samples)),
            DragPhase::Idle => None,
        }
    }
    /// Pointer released or gesture aborted. Safe to call from any state.
    pub fn release(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
fn target_start(pointer_x: f32, track: TrackGeometry, total_samples: usize) -> usize {
    let pct = track.percentage_at(pointer_x) as f64;
    (pct * total_samples as f64).floor() as usize
}
#[cfg(test)]
mod tests {
    use super::*;
    const TRACK: TrackGeometry = TrackGeometry {
        left_px: 100.0,
        width_px: 500.0,
    };
    #[test]
    fn press_jumps_to_the_pointer_position() {
        let mut drag = DragController::new();
        assert_eq!(drag.press(350.0, TRACK, 12_000), 6_000);
        assert!(drag.is_dragging());
    }
    #[test]
    fn moves_are_ignored_while_idle() {
        let mut drag = DragController::new();
        assert_eq!(drag.pointer_moved(350.0, TRACK, 12_000), None);
    }
    #[test]
    fn dragging_past_the_edges_pins_to_the_ends() {
        let mut drag = DragController::new();
        drag.press(350.0, TRACK, 12_000);
        assert_eq!(drag.pointer_moved(-40.0, TRACK, 12_000), Some(0));
        assert_eq!(drag.pointer_moved(9_999.0, TRACK, 12_000), Some(12_000));
    }
    #[test]
    fn rightmost_pixel_maps_to_the_full_length() {
        let mut drag = DragController::new();
        drag.press(600.0, TRACK, 12_000);
        assert_eq!(drag.pointer_moved(600.0, TRACK, 12_000), Some(12_000));
    }
    #[test]
    fn release_always_returns_to_idle() {
        let mut drag = DragController::new();
        drag.release();
        assert!(!drag.is_dragging());
        drag.press(200.0, TRACK, 100);
        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_moved(200.0, TRACK, 100), None);
    }
    #[test]
    fn unmeasured_track_falls_back_to_a_constant_width() {
        let track = TrackGeometry::new(0.0, 0.0);
        assert_eq!(track.effective_width(), FALLBACK_TRACK_WIDTH_PX);
        let mut drag = DragController::new();
        assert_eq!(drag.press(500.0, track, 1_000), 500);
    }
}
