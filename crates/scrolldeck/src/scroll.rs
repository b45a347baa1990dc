//! Scroll binding and progress math.
//!
//! Vertical wheel input moves an offset inside a virtual `{start, end}`
//! range; everything else (active slide, fill bar, horizontal track
//! position) is derived from the progress fraction at that offset.

/// Maps a virtual vertical scroll range onto deck progress.
///
/// `offset_for` is the exact inverse of `progress_at`, so programmatic
/// navigation and organic scrolling agree on where slide N sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBinding {
    pub start: f32,
    pub end: f32,
}

impl ScrollBinding {
    /// Build a binding for a horizontal track of `slide_count` full-width
    /// panels. The scrollable span is the track width that extends past the
    /// viewport: `(slide_count - 1) * viewport_width`.
    pub fn from_track(viewport_width: f32, slide_count: usize) -> Option<Self> {
        let span = viewport_width * slide_count.saturating_sub(1) as f32;
        if span <= 0.0 {
            return None;
        }
        Some(Self {
            start: 0.0,
            end: span,
        })
    }

    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Progress fraction in [0, 1] for an absolute offset.
    pub fn progress_at(&self, offset: f32) -> f32 {
        if self.span() <= 0.0 {
            return 0.0;
        }
        ((offset - self.start) / self.span()).clamp(0.0, 1.0)
    }

    /// Absolute offset for a progress fraction.
    pub fn offset_for(&self, progress: f32) -> f32 {
        self.start + self.span() * progress.clamp(0.0, 1.0)
    }

    /// Absolute offset where slide `index` rests. Out-of-range indices
    /// clamp to the first or last slide.
    pub fn target_offset(&self, index: i64, slide_count: usize) -> f32 {
        let max_index = slide_count.saturating_sub(1) as i64;
        let index = index.clamp(0, max_index) as usize;
        self.offset_for(slide_progress(index, slide_count))
    }
}

/// Progress fraction at which slide `index` rests: `index / (count - 1)`,
/// or 0 when the deck has a single slide.
pub fn slide_progress(index: usize, slide_count: usize) -> f32 {
    if slide_count <= 1 {
        return 0.0;
    }
    let max_index = slide_count - 1;
    index.min(max_index) as f32 / max_index as f32
}

/// Active slide index for a progress fraction: `round(p * (count - 1))`.
///
/// Rounding centers the transition point at the scroll midpoint between
/// two slides. The result is always in `[0, slide_count - 1]`.
pub fn progress_to_index(progress: f32, slide_count: usize) -> usize {
    let p = progress.clamp(0.0, 1.0);
    let max_index = slide_count.saturating_sub(1);
    let index = (p * max_index.max(1) as f32).round() as usize;
    index.min(max_index)
}

/// Snap tuning values. Threshold and the inertia switch are product
/// choices carried over from the original deck; they are configurable
/// rather than hard-coded (see `Config`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    /// Fractional position at which the snap rounds up to the next slide.
    pub threshold: f32,
    /// When true, snap from the projected resting offset of the current
    /// wheel velocity instead of the instantaneous offset.
    pub inertia: bool,
    /// Idle time in seconds after the last wheel event before snapping.
    pub delay: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            inertia: false,
            delay: 0.02,
        }
    }
}

/// Quantize a progress value to the nearest slide-boundary fraction.
///
/// Scales into index space, rounds up when the fractional part meets
/// `threshold`, clamps to the valid index range and converts back.
/// Monotonic non-decreasing, and a fixed point on its own output.
pub fn snap_progress(value: f32, slide_count: usize, threshold: f32) -> f32 {
    let max_index = slide_count.saturating_sub(1);
    if max_index == 0 {
        return 0.0;
    }
    let scaled = value * max_index as f32;
    let lower = scaled.floor();
    let fraction = scaled - lower;
    let step = if fraction >= threshold { 1.0 } else { 0.0 };
    let target = (lower + step).clamp(0.0, max_index as f32);
    target / max_index as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_rounds_at_midpoint() {
        // 5 slides: 0.5 lands exactly on the middle slide.
        assert_eq!(progress_to_index(0.5, 5), 2);
        // Just below the midpoint between slides 0 and 1 stays on 0.
        assert_eq!(progress_to_index(0.124, 5), 0);
        assert_eq!(progress_to_index(0.126, 5), 1);
    }

    #[test]
    fn index_clamps_out_of_range_progress() {
        assert_eq!(progress_to_index(-2.0, 5), 0);
        assert_eq!(progress_to_index(7.5, 5), 4);
    }

    #[test]
    fn index_in_bounds_for_single_slide() {
        // With one slide the divisor floors at 1; the clamp keeps the
        // result at 0 even for progress 1.0.
        assert_eq!(progress_to_index(1.0, 1), 0);
        assert_eq!(progress_to_index(0.0, 1), 0);
    }

    #[test]
    fn index_always_in_range() {
        for count in 1..=8usize {
            for i in -20..=40 {
                let p = i as f32 / 20.0;
                assert!(progress_to_index(p, count) < count);
            }
        }
    }

    #[test]
    fn slide_progress_endpoints() {
        assert_eq!(slide_progress(0, 5), 0.0);
        assert_eq!(slide_progress(4, 5), 1.0);
        assert_eq!(slide_progress(0, 1), 0.0);
        // Out-of-range index clamps to the last slide.
        assert_eq!(slide_progress(99, 5), 1.0);
    }

    #[test]
    fn target_offset_clamps_and_is_idempotent() {
        let binding = ScrollBinding {
            start: 100.0,
            end: 900.0,
        };
        assert_eq!(binding.target_offset(-3, 5), 100.0);
        assert_eq!(binding.target_offset(99, 5), 900.0);
        // Same in-range index twice yields the same offset.
        let a = binding.target_offset(2, 5);
        let b = binding.target_offset(2, 5);
        assert_eq!(a, b);
        assert_eq!(a, 500.0);
    }

    #[test]
    fn binding_round_trips_slide_positions() {
        let binding = ScrollBinding {
            start: 250.0,
            end: 1450.0,
        };
        for i in 0..5 {
            let offset = binding.target_offset(i, 5);
            let p = binding.progress_at(offset);
            assert_eq!(progress_to_index(p, 5), i as usize);
        }
    }

    #[test]
    fn binding_rejects_degenerate_track() {
        assert!(ScrollBinding::from_track(1280.0, 1).is_none());
        assert!(ScrollBinding::from_track(1280.0, 0).is_none());
        assert!(ScrollBinding::from_track(0.0, 5).is_none());
        assert!(ScrollBinding::from_track(1280.0, 5).is_some());
    }

    #[test]
    fn snap_rounds_at_threshold() {
        // 5 slides, boundaries at multiples of 0.25.
        assert_eq!(snap_progress(0.30, 5, 0.5), 0.25);
        assert_eq!(snap_progress(0.374, 5, 0.5), 0.25);
        assert_eq!(snap_progress(0.375, 5, 0.5), 0.5);
        assert_eq!(snap_progress(0.6, 5, 0.5), 0.5);
    }

    #[test]
    fn snap_is_idempotent() {
        for i in 0..=40 {
            let v = i as f32 / 40.0;
            let once = snap_progress(v, 5, 0.5);
            let twice = snap_progress(once, 5, 0.5);
            assert_eq!(once, twice, "snap not a fixed point at {v}");
        }
    }

    #[test]
    fn snap_is_monotonic() {
        let mut prev = snap_progress(-0.5, 5, 0.5);
        for i in -10..=30 {
            let v = i as f32 / 20.0;
            let s = snap_progress(v, 5, 0.5);
            assert!(s >= prev, "snap decreased at {v}");
            prev = s;
        }
    }

    #[test]
    fn snap_clamps_out_of_range() {
        assert_eq!(snap_progress(-1.0, 5, 0.5), 0.0);
        assert_eq!(snap_progress(2.0, 5, 0.5), 1.0);
    }

    #[test]
    fn snap_single_slide_is_zero() {
        assert_eq!(snap_progress(0.7, 1, 0.5), 0.0);
    }

    #[test]
    fn snap_respects_custom_threshold() {
        // Threshold 0.9: only snaps forward very close to the boundary.
        assert_eq!(snap_progress(0.2, 5, 0.9), 0.0);
        assert_eq!(snap_progress(0.24, 5, 0.9), 0.25);
    }
}
