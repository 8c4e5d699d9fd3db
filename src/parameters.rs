use crate::{resolution::Optics, Scale};

#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("{name} must be strictly positive and finite, found {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} ({value}) is outside the [{min},{max}] range")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
type Result<T> = std::result::Result<T, ParameterError>;

/// Wavelength range [nm]
pub const WAVELENGTH_RANGE: (f64, f64) = (200.0, 900.0);
/// Camera pixel size range [µm]
pub const PIXEL_RANGE: (f64, f64) = (1.0, 13.0);
/// Additional magnification range
pub const ADDITIONAL_MAG_RANGE: (f64, f64) = (1.0, 5.0);
/// Default iso-sampling thresholds
pub const THRESHOLDS: [f64; 3] = [2.0, 2.3, 3.0];

/// Sampling field rendering parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParameters {
    pub wavelength_nm: f64,
    pub pixel_ref_um: f64,
    pub additional_mag: f64,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub thresholds: Vec<f64>,
}
impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            wavelength_nm: 500.0,
            pixel_ref_um: 3.8,
            additional_mag: 1.0,
            x_scale: Scale::Log,
            y_scale: Scale::Linear,
            thresholds: THRESHOLDS.to_vec(),
        }
    }
}
impl SamplingParameters {
    pub fn wavelength(self, wavelength_nm: f64) -> Self {
        Self {
            wavelength_nm,
            ..self
        }
    }
    pub fn pixel_size(self, pixel_ref_um: f64) -> Self {
        Self {
            pixel_ref_um,
            ..self
        }
    }
    pub fn additional_magnification(self, additional_mag: f64) -> Self {
        Self {
            additional_mag,
            ..self
        }
    }
    pub fn x_scale(self, x_scale: Scale) -> Self {
        Self { x_scale, ..self }
    }
    pub fn y_scale(self, y_scale: Scale) -> Self {
        Self { y_scale, ..self }
    }
    pub fn thresholds(self, thresholds: Vec<f64>) -> Self {
        Self { thresholds, ..self }
    }
    /// Optical settings
    pub fn optics(&self) -> Optics {
        Optics::new(self.wavelength_nm, self.pixel_ref_um, self.additional_mag)
    }
    /// Checks that every scalar parameter is strictly positive and finite
    pub fn check(&self) -> Result<()> {
        let scalars = [
            ("wavelength", self.wavelength_nm),
            ("pixel size", self.pixel_ref_um),
            ("additional magnification", self.additional_mag),
        ];
        scalars
            .into_iter()
            .chain(self.thresholds.iter().map(|&phi| ("sampling threshold", phi)))
            .try_for_each(|(name, value)| {
                if value.is_finite() && value > 0.0 {
                    Ok(())
                } else {
                    Err(ParameterError::NotPositive { name, value })
                }
            })
    }
    /// Checks the parameters against the ranges offered by the interactive controls
    pub fn check_host_ranges(&self) -> Result<()> {
        self.check()?;
        [
            ("wavelength", self.wavelength_nm, WAVELENGTH_RANGE),
            ("pixel size", self.pixel_ref_um, PIXEL_RANGE),
            (
                "additional magnification",
                self.additional_mag,
                ADDITIONAL_MAG_RANGE,
            ),
        ]
        .into_iter()
        .try_for_each(|(name, value, (min, max))| {
            if value >= min && value <= max {
                Ok(())
            } else {
                Err(ParameterError::OutOfRange {
                    name,
                    value,
                    min,
                    max,
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = SamplingParameters::default();
        assert_eq!(params.thresholds, vec![2.0, 2.3, 3.0]);
        assert_eq!(params.x_scale, Scale::Log);
        assert!(params.check_host_ranges().is_ok());
    }

    #[test]
    fn non_positive() {
        let params = SamplingParameters::default().wavelength(0.0);
        assert!(matches!(
            params.check(),
            Err(ParameterError::NotPositive {
                name: "wavelength",
                ..
            })
        ));
        let params = SamplingParameters::default().thresholds(vec![2.0, -1.0]);
        assert!(params.check().is_err());
        let params = SamplingParameters::default().pixel_size(f64::NAN);
        assert!(params.check().is_err());
    }

    #[test]
    fn host_ranges() {
        let params = SamplingParameters::default().wavelength(1000.0);
        assert!(params.check().is_ok());
        assert!(matches!(
            params.check_host_ranges(),
            Err(ParameterError::OutOfRange { max, .. }) if max == 900.0
        ));
        let params = SamplingParameters::default()
            .pixel_size(13.0)
            .additional_magnification(5.0)
            .wavelength(200.0);
        assert!(params.check_host_ranges().is_ok());
    }

    #[test]
    fn optics() {
        let optics = SamplingParameters::default()
            .wavelength(500.0)
            .pixel_size(6.5)
            .optics();
        assert!((optics.sampling_ratio(40.0, 0.95) - 1.976).abs() < 1e-3);
    }
}
