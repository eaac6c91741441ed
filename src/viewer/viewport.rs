use std::ops::Range;
/// Default visible window: 1200 samples, 6 seconds at 200 Hz.
pub const DEFAULT_VIEW_WIDTH: usize = 1200;
/// The contiguous `[start, end)` sample range currently rendered at full
/// resolution. Width is fixed at construction (clamped to the recording
/// length); only the start moves, via `set_start`.
///
/// Invariant: `0 <= start <= end <= total` after every operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    start: usize,
    end: usize,
    width: usize,
    total: usize,
}
impl Viewport {
    pub fn new(total_samples: usize, default_width: usize) -> Self {
        let width = default_width.min(total_samples);
        Self {
            start: 0,
            end: width,
            width,
            total: total_samples,
        }
    }
    /// Move the window so it begins at `candidate`, clamped so the full
    /// width stays inside the recording. Never fails.
    pub fn set_start(&mut self, candidate: usize) {
        let max_start = self.total.saturating_sub(self.width);
        self.start = candidate.min(max_start);
        self.end = self.start + self.width;
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn end(&self) -> usize {
        self.end
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn total(&self) -> usize {
        self.total
    }
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}
