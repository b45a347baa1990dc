//! Viewport-relative layout unit.
//!
//! One unit is 1% of the viewport height, refreshed whenever the window
//! geometry changes. Rendering code sizes fonts and paddings from it so
//! the deck scales with the window the way the original scaled with the
//! browser viewport.

const UNIT_SCALE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportUnits {
    unit: f32,
}

impl ViewportUnits {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            unit: viewport_height * UNIT_SCALE,
        }
    }

    /// Recompute the unit for a new viewport height. Always succeeds.
    pub fn refresh(&mut self, viewport_height: f32) {
        self.unit = viewport_height * UNIT_SCALE;
    }

    /// 1% of the viewport height, in pixels.
    pub fn unit(&self) -> f32 {
        self.unit
    }

    /// A length expressed in viewport units, in pixels.
    pub fn px(&self, units: f32) -> f32 {
        units * self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_is_one_percent_of_height() {
        let units = ViewportUnits::new(720.0);
        assert_eq!(units.unit(), 7.2);
        assert_eq!(units.px(10.0), 72.0);
    }

    #[test]
    fn refresh_tracks_resizes() {
        let mut units = ViewportUnits::new(720.0);
        units.refresh(1080.0);
        assert_eq!(units.unit(), 10.8);
        units.refresh(0.0);
        assert_eq!(units.unit(), 0.0);
    }
}
