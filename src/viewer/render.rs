use crate::viewer::{SignalBuffer, TrackGeometry, Viewport};
/// Keep the thumb grabbable even when the viewport is a sliver of the
/// recording; the position mapping may become slightly inexact for it.
pub const MIN_THUMB_WIDTH_PX: f32 = 30.0;
/// One full-resolution point of the detail view, on the time axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailPoint {
    /// Absolute time in seconds (`source_index / sample_rate`).
    pub time: f32,
    pub value: f32,
}
/// Pixel width and offset of the track thumb; derived per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThumbGeometry {
    pub width_px: f32,
    pub offset_px: f32,
}
/// Slice the buffer over the viewport and stamp each sample with its time.
/// Length always equals the viewport width; times ascend in steps of
/// `1 / sample_rate`.
pub fn detail_series(buffer: &SignalBuffer, viewport: &Viewport) -> Vec<DetailPoint> {
    let rate = buffer.sample_rate_hz();
    buffer.samples()[viewport.range()]
        .iter()
        .enumerate()
        .map(|(offset, &value)| DetailPoint {
            time: (viewport.start() + offset) as f32 / rate,
            value,
        })
        .collect()
}
/// Project the viewport onto the track. An empty recording renders no
/// thumb (zero width) rather than an error.
pub fn thumb_geometry(viewport: &Viewport, track: TrackGeometry) -> ThumbGeometry {
    if viewport.total() == 0 {
        return ThumbGeometry::default();
    }
    let track_width = track.effective_width();
    let fraction = viewport.width() as f32 / viewport.total() as f32;
    ThumbGeometry {
        width_px: (fraction * track_width).max(MIN_THUMB_WIDTH_PX),
        offset_px: viewport.start() as f32 / viewport.total() as f32 * track_width,
    }
}
