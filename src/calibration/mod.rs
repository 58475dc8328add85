use embedded_graphics::prelude::Point;
use serde_derive::{Deserialize, Serialize};

use crate::errors::CalibrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Raw ADC bounds that line up with the physical screen edges, plus the
/// screen size they map onto.
///
/// Fields are public so a host can load a persisted calibration, but such a
/// value should go through [`Calibration::validate`] (the driver does this
/// on construction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calibration {
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    pub width: u16,
    pub height: u16,
}

impl Default for Calibration {
    /// 320x240 ILI9341 panel with its stock resistive overlay.
    fn default() -> Self {
        Self {
            x_min: 100,
            x_max: 1962,
            y_min: 100,
            y_max: 1900,
            width: 320,
            height: 240,
        }
    }
}

impl Calibration {
    pub fn new(
        x_min: u16,
        x_max: u16,
        y_min: u16,
        y_max: u16,
        width: u16,
        height: u16,
    ) -> Result<Self, CalibrationError> {
        let calibration = Self {
            x_min,
            x_max,
            y_min,
            y_max,
            width,
            height,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.x_max <= self.x_min {
            return Err(CalibrationError::EmptyRange {
                axis: Axis::X,
                min: self.x_min,
                max: self.x_max,
            });
        }
        if self.y_max <= self.y_min {
            return Err(CalibrationError::EmptyRange {
                axis: Axis::Y,
                min: self.y_min,
                max: self.y_max,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(CalibrationError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Inclusive on both ends.
    pub fn contains(&self, (x, y): (u16, u16)) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    pub fn linear_map(&self) -> Result<LinearMap, CalibrationError> {
        self.validate()?;

        let x_scale = self.width as f64 / (self.x_max - self.x_min) as f64;
        let y_scale = self.height as f64 / (self.y_max - self.y_min) as f64;

        Ok(LinearMap {
            x_scale,
            x_offset: -(self.x_min as f64) * x_scale,
            y_scale,
            y_offset: -(self.y_min as f64) * y_scale,
        })
    }
}

/// Per-axis `screen = scale * raw + offset`, derived once from a
/// [`Calibration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    pub x_scale: f64,
    pub x_offset: f64,
    pub y_scale: f64,
    pub y_offset: f64,
}

impl LinearMap {
    /// Maps a raw sample to screen space, truncating toward zero.
    pub fn normalize(&self, (x, y): (u16, u16)) -> Point {
        let x = self.x_scale * x as f64 + self.x_offset;
        let y = self.y_scale * y as f64 + self.y_offset;

        Point::new(x as i32, y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_one(actual: i32, expected: i32) -> bool {
        (actual - expected).abs() <= 1
    }

    #[test]
    fn default_calibration_is_valid() {
        assert!(Calibration::default().validate().is_ok());
    }

    #[test]
    fn coefficients_follow_bounds() {
        let map = Calibration::new(100, 1100, 200, 700, 500, 250)
            .unwrap()
            .linear_map()
            .unwrap();

        assert_eq!(map.x_scale, 0.5);
        assert_eq!(map.x_offset, -50.0);
        assert_eq!(map.y_scale, 0.5);
        assert_eq!(map.y_offset, -100.0);
    }

    #[test]
    fn corners_map_to_screen_corners() {
        let cal = Calibration::default();
        let map = cal.linear_map().unwrap();

        assert_eq!(map.normalize((cal.x_min, cal.y_min)), Point::new(0, 0));

        let far = map.normalize((cal.x_max, cal.y_max));
        assert!(within_one(far.x, cal.width as i32), "{far:?}");
        assert!(within_one(far.y, cal.height as i32), "{far:?}");
    }

    #[test]
    fn in_range_samples_stay_on_screen_and_are_monotonic() {
        let cal = Calibration::default();
        let map = cal.linear_map().unwrap();

        let mut last = map.normalize((cal.x_min, cal.y_min));
        for step in 0..=64u32 {
            let x = cal.x_min as u32 + (cal.x_max - cal.x_min) as u32 * step / 64;
            let y = cal.y_min as u32 + (cal.y_max - cal.y_min) as u32 * step / 64;
            let p = map.normalize((x as u16, y as u16));

            assert!((0..=cal.width as i32).contains(&p.x), "{p:?}");
            assert!((0..=cal.height as i32).contains(&p.y), "{p:?}");
            assert!(p.x >= last.x && p.y >= last.y, "{last:?} -> {p:?}");
            last = p;
        }
    }

    #[test]
    fn truncates_toward_zero() {
        // 3 pixels over 9 raw counts: raw 2 lands on 0.66..
        let map = Calibration::new(0, 9, 0, 9, 3, 3)
            .unwrap()
            .linear_map()
            .unwrap();
        assert_eq!(map.normalize((2, 5)), Point::new(0, 1));
    }

    #[test]
    fn contains_is_inclusive() {
        let cal = Calibration::new(10, 20, 30, 40, 100, 100).unwrap();
        assert!(cal.contains((10, 30)));
        assert!(cal.contains((20, 40)));
        assert!(!cal.contains((9, 35)));
        assert!(!cal.contains((15, 41)));
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert_eq!(
            Calibration::new(500, 500, 0, 10, 320, 240),
            Err(CalibrationError::EmptyRange {
                axis: Axis::X,
                min: 500,
                max: 500
            })
        );
        assert_eq!(
            Calibration::new(0, 10, 900, 100, 320, 240),
            Err(CalibrationError::EmptyRange {
                axis: Axis::Y,
                min: 900,
                max: 100
            })
        );
        assert_eq!(
            Calibration::new(0, 10, 0, 10, 0, 240),
            Err(CalibrationError::ZeroSize {
                width: 0,
                height: 240
            })
        );
    }

    #[test]
    fn linear_map_revalidates_public_fields() {
        let mut cal = Calibration::default();
        cal.y_max = cal.y_min;
        assert!(cal.linear_map().is_err());
    }
}
