//! Coordinate mapping between the caller's space and the display.

use std::fmt;

use deskpilot_protocols::error::ToolError;

/// A named target resolution that a large display is scaled down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingTarget {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ScalingTarget {
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Preset catalogue, scanned in this order.
pub const SCALING_TARGETS: [ScalingTarget; 3] = [
    ScalingTarget {
        name: "XGA",
        width: 1024,
        height: 768,
    },
    ScalingTarget {
        name: "WXGA",
        width: 1280,
        height: 800,
    },
    ScalingTarget {
        name: "FWXGA",
        width: 1366,
        height: 768,
    },
];

/// Maximum aspect-ratio difference for a preset to apply.
const ASPECT_RATIO_TOLERANCE: f64 = 0.02;

/// Which way a coordinate pair is being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    /// Caller-supplied coordinates on their way to an OS command.
    /// Bounds-checked against the display, then divided by the scale factors.
    Api,
    /// Coordinates reported back to the caller (cursor position, display
    /// size, screenshot size). Multiplied by the scale factors.
    Computer,
}

impl fmt::Display for ScaleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api"),
            Self::Computer => f.write_str("computer"),
        }
    }
}

/// Bidirectional coordinate mapping for one display.
///
/// The preset is chosen once at construction: the first entry of
/// [`SCALING_TARGETS`] whose aspect ratio is within 0.02 of the display's
/// and which is narrower than the display. Without a preset (or with
/// scaling disabled) both directions are the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScaler {
    width: u32,
    height: u32,
    target: Option<ScalingTarget>,
}

impl CoordinateScaler {
    pub fn new(width: u32, height: u32, scaling_enabled: bool) -> Self {
        let target = if scaling_enabled {
            select_target(width, height)
        } else {
            None
        };
        Self {
            width,
            height,
            target,
        }
    }

    /// The preset in use, if any.
    pub fn target(&self) -> Option<ScalingTarget> {
        self.target
    }

    /// Map `(x, y)` in the given direction.
    pub fn scale(
        &self,
        direction: ScaleDirection,
        x: u32,
        y: u32,
    ) -> Result<(u32, u32), ToolError> {
        let Some(target) = self.target else {
            return Ok((x, y));
        };
        let (sx, sy) = self.factors(target);

        match direction {
            ScaleDirection::Api => {
                if x > self.width || y > self.height {
                    return Err(ToolError::OutOfBounds { x, y });
                }
                Ok((round(f64::from(x) / sx), round(f64::from(y) / sy)))
            }
            ScaleDirection::Computer => Ok((round(f64::from(x) * sx), round(f64::from(y) * sy))),
        }
    }

    /// Map in the [`ScaleDirection::Computer`] direction, which cannot fail.
    pub fn to_computer(&self, x: u32, y: u32) -> (u32, u32) {
        match self.target {
            Some(target) => {
                let (sx, sy) = self.factors(target);
                (round(f64::from(x) * sx), round(f64::from(y) * sy))
            }
            None => (x, y),
        }
    }

    /// Display size as reported to callers.
    pub fn scaled_display_size(&self) -> (u32, u32) {
        self.to_computer(self.width, self.height)
    }

    fn factors(&self, target: ScalingTarget) -> (f64, f64) {
        (
            f64::from(target.width) / f64::from(self.width),
            f64::from(target.height) / f64::from(self.height),
        )
    }
}

fn select_target(width: u32, height: u32) -> Option<ScalingTarget> {
    if height == 0 {
        return None;
    }
    let ratio = f64::from(width) / f64::from(height);
    SCALING_TARGETS.iter().copied().find(|target| {
        (target.aspect_ratio() - ratio).abs() < ASPECT_RATIO_TOLERANCE && target.width < width
    })
}

// f64::round rounds half away from zero; inputs here are non-negative.
fn round(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> CoordinateScaler {
        CoordinateScaler::new(1400, 780, true)
    }

    #[test]
    fn test_fwxga_selected_for_1400x780() {
        let target = scaler().target().unwrap();
        assert_eq!(target.name, "FWXGA");
        assert_eq!((target.width, target.height), (1366, 768));
    }

    #[test]
    fn test_computer_direction() {
        let scaled = scaler().scale(ScaleDirection::Computer, 700, 390).unwrap();
        assert_eq!(scaled, (683, 384));
    }

    #[test]
    fn test_api_direction_round_trip() {
        let s = scaler();
        let (x, y) = s.scale(ScaleDirection::Api, 683, 384).unwrap();
        assert!((x as i64 - 700).abs() <= 1, "x = {}", x);
        assert!((y as i64 - 390).abs() <= 1, "y = {}", y);
    }

    #[test]
    fn test_api_direction_out_of_bounds() {
        let err = scaler().scale(ScaleDirection::Api, 1500, 390).unwrap_err();
        assert!(matches!(err, ToolError::OutOfBounds { x: 1500, y: 390 }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_api_direction_bounds_are_inclusive() {
        assert!(scaler().scale(ScaleDirection::Api, 1400, 780).is_ok());
        assert!(scaler().scale(ScaleDirection::Api, 1400, 781).is_err());
    }

    #[test]
    fn test_scaling_disabled_is_identity() {
        let s = CoordinateScaler::new(1400, 780, false);
        assert!(s.target().is_none());
        assert_eq!(s.scale(ScaleDirection::Computer, 700, 390).unwrap(), (700, 390));
        assert_eq!(s.scale(ScaleDirection::Api, 5000, 5000).unwrap(), (5000, 5000));
    }

    #[test]
    fn test_no_matching_ratio_is_identity() {
        // 4:3 at 800x600 is narrower than XGA, 21:9 matches nothing.
        for (w, h) in [(800, 600), (3440, 1440)] {
            let s = CoordinateScaler::new(w, h, true);
            assert!(s.target().is_none(), "{}x{}", w, h);
            assert_eq!(s.to_computer(10, 20), (10, 20));
        }
    }

    #[test]
    fn test_preset_must_be_narrower_than_display() {
        // Exactly XGA: ratio matches but width is not strictly less.
        let s = CoordinateScaler::new(1024, 768, true);
        assert!(s.target().is_none());
    }

    #[test]
    fn test_first_match_wins_in_declaration_order() {
        // 1600x1200 is 4:3, matching XGA only.
        assert_eq!(CoordinateScaler::new(1600, 1200, true).target().unwrap().name, "XGA");
        // 2560x1600 is 16:10, matching WXGA.
        assert_eq!(CoordinateScaler::new(2560, 1600, true).target().unwrap().name, "WXGA");
        // 1920x1080 is 16:9, matching FWXGA.
        assert_eq!(CoordinateScaler::new(1920, 1080, true).target().unwrap().name, "FWXGA");
    }

    #[test]
    fn test_scaled_display_size() {
        assert_eq!(scaler().scaled_display_size(), (1366, 768));
        assert_eq!(
            CoordinateScaler::new(1400, 780, false).scaled_display_size(),
            (1400, 780)
        );
    }

    #[test]
    fn test_cursor_values_in_computer_direction() {
        assert_eq!(scaler().to_computer(120, 45), (117, 44));
    }

    #[test]
    fn test_zero_height_never_scales() {
        assert!(CoordinateScaler::new(1400, 0, true).target().is_none());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(ScaleDirection::Api.to_string(), "api");
        assert_eq!(ScaleDirection::Computer.to_string(), "computer");
    }
}
