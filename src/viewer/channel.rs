use crate::viewer::{
    detail_series, thumb_geometry, DetailPoint, DragController, LeadInput, OverviewCache,
    OverviewPoint, SignalBuffer, ThumbGeometry, TrackGeometry, ViewerError, Viewport,
    DEFAULT_DECIMATION, DEFAULT_VIEW_WIDTH,
};
/// One independent lead of a recording: its buffer, cached overview,
/// viewport and drag machine. Two of these exist per recording and do not
/// share viewport state; panning one lead leaves the other untouched.
#[derive(Debug)]
pub struct LeadViewer {
    buffer: SignalBuffer,
    overview: OverviewCache,
    viewport: Viewport,
    drag: DragController,
}
impl LeadViewer {
    pub fn new(input: LeadInput) -> Result<Self, ViewerError> {
        Self::with_layout(input, DEFAULT_VIEW_WIDTH, DEFAULT_DECIMATION)
    }
    /// Build the two viewers for one recording. The leads are time-aligned
    /// samples of the same capture, so their lengths must match.
    pub fn paired(first: LeadInput, second: LeadInput) -> Result<(Self, Self), ViewerError> {
        if first.samples.len() != second.samples.len() {
            return Err(ViewerError::LeadMismatch {
                expected: first.samples.len(),
                actual: second.samples.len(),
            });
        }
        Ok((Self::new(first)?, Self::new(second)?))
    }
    pub fn with_layout(
        input: LeadInput,
        view_width: usize,
        decimation: usize,
    ) -> Result<Self, ViewerError> {
        let buffer = SignalBuffer::new(input)?;
        let viewport = Viewport::new(buffer.len(), view_width);
        Ok(Self {
            buffer,
            overview: OverviewCache::new(decimation)?,
            viewport,
            drag: DragController::new(),
        })
    }
    pub fn label(&self) -> &str {
        self.buffer.label()
    }
    pub fn buffer(&self) -> &SignalBuffer {
        &self.buffer
    }
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
    /// Decimated series for the track strip; computed once per buffer and
    /// reused across viewport updates.
    pub fn overview(&mut self) -> &[OverviewPoint] {
        self.overview.series(&self.buffer)
    }
    /// Full-resolution slice for the current window.
    pub fn detail(&self) -> Vec<DetailPoint> {
        detail_series(&self.buffer, &self.viewport)
    }
    pub fn thumb(&self, track: TrackGeometry) -> ThumbGeometry {
        thumb_geometry(&self.viewport, track)
    }
    /// Pointer pressed on this lead's track: click-to-jump and start
    /// following the pointer.
    pub fn track_pressed(&mut self, pointer_x: f32, track: TrackGeometry) {
        let target = self.drag.press(pointer_x, track, self.buffer.len());
        self.viewport.set_start(target);
    }
    /// Pointer moved anywhere on the surface; only retargets while a drag
    /// on this lead is in progress.
    pub fn pointer_moved(&mut self, pointer_x: f32, track: TrackGeometry) {
        if let Some(target) = self.drag.pointer_moved(pointer_x, track, self.buffer.len()) {
            self.viewport.set_start(target);
        }
    }
    /// Pointer released or the gesture was lost; always ends the drag.
    pub fn pointer_released(&mut self) {
        self.drag.release();
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn viewer_of(len: usize) -> LeadViewer {
        let samples = (0..len).map(|i| i as f32).collect();
        LeadViewer::new(LeadInput::new(samples, "Lead I")).unwrap()
    }
    #[test]
    fn press_drag_release_drives_the_viewport() {
        let track = TrackGeometry::new(0.0, 1_000.0);
        let mut viewer = viewer_of(12_000);
        viewer.track_pressed(250.0, track);
        assert!(viewer.is_dragging());
        assert_eq!(viewer.viewport().start(), 3_000);
        viewer.pointer_moved(500.0, track);
        assert_eq!(viewer.viewport().start(), 6_000);
        viewer.pointer_released();
        viewer.pointer_moved(900.0, track);
        assert_eq!(viewer.viewport().start(), 6_000);
    }
    #[test]
    fn drag_to_the_right_edge_shows_the_tail() {
        let track = TrackGeometry::new(0.0, 1_000.0);
        let mut viewer = viewer_of(12_000);
        viewer.track_pressed(1_000.0, track);
        assert_eq!(viewer.viewport().start(), 10_800);
        assert_eq!(viewer.viewport().end(), 12_000);
    }
    #[test]
    fn leads_do_not_share_a_viewport() {
        let track = TrackGeometry::new(0.0, 1_000.0);
        let mut lead_i = viewer_of(12_000);
        let mut lead_ii = viewer_of(12_000);
        lead_i.track_pressed(500.0, track);
        lead_i.pointer_released();
        assert_eq!(lead_i.viewport().start(), 6_000);
        assert_eq!(lead_ii.viewport().start(), 0);
        lead_ii.pointer_moved(500.0, track);
        assert_eq!(lead_ii.viewport().start(), 0);
    }
    #[test]
    fn mismatched_lead_lengths_are_rejected() {
        let err = LeadViewer::paired(
            LeadInput::new(vec![0.0; 10], "Lead I"),
            LeadInput::new(vec![0.0; 9], "Lead II"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ViewerError::LeadMismatch {
                expected: 10,
                actual: 9
            }
        ));
    }
    #[test]
    fn empty_lead_degrades_without_errors() {
        let track = TrackGeometry::new(0.0, 1_000.0);
        let mut viewer = viewer_of(0);
        viewer.track_pressed(500.0, track);
        viewer.pointer_moved(900.0, track);
        viewer.pointer_released();
        assert!(viewer.detail().is_empty());
        assert!(viewer.overview().is_empty());
        assert_eq!(viewer.thumb(track).width_px, 0.0);
    }
}
