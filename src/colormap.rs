//! Fixed color scale of the sampling field
//!
//! The scale always spans [0,4] pixels per blur element so that the Nyquist ratio is
//! rendered with the same color whatever the optical settings.

use colorous::{Color, Gradient};

/// Lower end of the color scale
pub const VMIN: f64 = 0.0;
/// Upper end of the color scale
pub const VMAX: f64 = 4.0;

/// Color bar tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: &'static str,
}

/// Color bar label
pub const COLORBAR_LABEL: &str = "Pixels per blur element";
/// Annotation at the lower end of the color bar
pub const UNDERSAMPLING: &str = "Undersampling";
/// Annotation at the upper end of the color bar
pub const OVERSAMPLING: &str = "Oversampling";

const TICKS: [Tick; 5] = [
    Tick {
        value: 0.0,
        label: "0",
    },
    Tick {
        value: 1.0,
        label: "1",
    },
    Tick {
        value: 2.0,
        label: "2 (Nyquist)",
    },
    Tick {
        value: 3.0,
        label: "3",
    },
    Tick {
        value: 4.0,
        label: ">4",
    },
];

/// Color mapping of sampling ratios
#[derive(Clone, Copy)]
pub struct ColorScale {
    gradient: Gradient,
}
impl Default for ColorScale {
    fn default() -> Self {
        Self {
            gradient: colorous::TURBO,
        }
    }
}
impl std::fmt::Debug for ColorScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ColorScale [{VMIN},{VMAX}]")
    }
}
impl ColorScale {
    /// Color scale with a different gradient
    pub fn gradient(self, gradient: Gradient) -> Self {
        Self { gradient }
    }
    /// Scale range
    pub fn range(&self) -> (f64, f64) {
        (VMIN, VMAX)
    }
    /// Maps a sampling ratio into [0,1], saturating at both ends
    ///
    /// `NaN` maps to the lower end.
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            0.0
        } else {
            ((value - VMIN) / (VMAX - VMIN)).clamp(0.0, 1.0)
        }
    }
    /// Color of a sampling ratio
    pub fn color(&self, value: f64) -> Color {
        self.gradient.eval_continuous(self.normalize(value))
    }
    /// Color bar ticks
    pub fn ticks(&self) -> &'static [Tick] {
        &TICKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation() {
        let scale = ColorScale::default();
        let (lo, hi) = (scale.color(0.0).as_tuple(), scale.color(4.0).as_tuple());
        for v in [-1.0, -1e9, f64::NEG_INFINITY, f64::NAN, 0.0] {
            assert_eq!(scale.color(v).as_tuple(), lo);
        }
        for v in [4.0, 4.0001, 1e9, f64::INFINITY] {
            assert_eq!(scale.color(v).as_tuple(), hi);
        }
        assert_ne!(lo, hi);
    }

    #[test]
    fn normalization() {
        let scale = ColorScale::default();
        assert_eq!(scale.normalize(2.0), 0.5);
        assert_eq!(scale.normalize(1.0), 0.25);
        assert_eq!(scale.range(), (0.0, 4.0));
    }

    #[test]
    fn nyquist_color_is_fixed() {
        let scale = ColorScale::default();
        assert_eq!(
            scale.color(2.0).as_tuple(),
            colorous::TURBO.eval_continuous(0.5).as_tuple()
        );
        assert_ne!(scale.color(1.9).as_tuple(), scale.color(2.1).as_tuple());
    }

    #[test]
    fn ticks() {
        let ticks = ColorScale::default().ticks();
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ticks[2].label, "2 (Nyquist)");
        assert_eq!(ticks[4].label, ">4");
    }
}
