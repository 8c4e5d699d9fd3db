//! Microscope resolution model
//!
//! Rayleigh resolution limit referred to the camera plane and its inverse
//! solved for the numerical aperture at a given sampling ratio.

use std::fmt;

/// Rayleigh criterion factor
pub const RAYLEIGH: f64 = 0.61;
/// Nyquist sampling ratio
pub const NYQUIST: f64 = 2.0;
/// Upper end of the commonly accepted Nyquist band
pub const NYQUIST_UPPER: f64 = 2.3;

/// Camera referred resolution length [µm]
///
/// `0.61 * (λ/1000) / NA * M * A`
///
/// No check is done on the numerical aperture, `NA=0` gives `inf`.
pub fn camera_resolution(
    wavelength_nm: f64,
    objective_mag: f64,
    numerical_aperture: f64,
    additional_mag: f64,
) -> f64 {
    RAYLEIGH * (wavelength_nm / 1000.0) / numerical_aperture * objective_mag * additional_mag
}

/// Numerical aperture at which the sampling ratio is exactly `phi`
pub fn iso_sampling_aperture(
    wavelength_nm: f64,
    magnification: f64,
    additional_mag: f64,
    pixel_ref_um: f64,
    phi: f64,
) -> f64 {
    RAYLEIGH * wavelength_nm / (phi * 1000.0) * magnification * additional_mag / pixel_ref_um
}

/// Magnification at which the sampling ratio is exactly `phi` for a given numerical aperture
pub fn iso_sampling_magnification(
    wavelength_nm: f64,
    numerical_aperture: f64,
    additional_mag: f64,
    pixel_ref_um: f64,
    phi: f64,
) -> f64 {
    numerical_aperture * phi * 1000.0 * pixel_ref_um / (RAYLEIGH * wavelength_nm * additional_mag)
}

/// Sampling regime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    Undersampled,
    Nyquist,
    Oversampled,
}
impl Sampling {
    /// Classifies a sampling ratio (pixels per resolution element)
    pub fn classify(ratio: f64) -> Self {
        if ratio.is_nan() || ratio < NYQUIST {
            Sampling::Undersampled
        } else if ratio <= NYQUIST_UPPER {
            Sampling::Nyquist
        } else {
            Sampling::Oversampled
        }
    }
}
impl fmt::Display for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sampling::Undersampled => write!(f, "undersampled"),
            Sampling::Nyquist => write!(f, "Nyquist sampled"),
            Sampling::Oversampled => write!(f, "oversampled"),
        }
    }
}

/// Illumination and detection settings shared by every point of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optics {
    /// illumination wavelength [nm]
    pub wavelength_nm: f64,
    /// magnification added after the objective
    pub additional_mag: f64,
    /// camera pixel size [µm]
    pub pixel_ref_um: f64,
}
impl Optics {
    pub fn new(wavelength_nm: f64, pixel_ref_um: f64, additional_mag: f64) -> Self {
        Self {
            wavelength_nm,
            additional_mag,
            pixel_ref_um,
        }
    }
    /// Camera referred resolution [µm] of an objective
    pub fn resolution(&self, objective_mag: f64, numerical_aperture: f64) -> f64 {
        camera_resolution(
            self.wavelength_nm,
            objective_mag,
            numerical_aperture,
            self.additional_mag,
        )
    }
    /// Pixels per resolution element of an objective
    pub fn sampling_ratio(&self, objective_mag: f64, numerical_aperture: f64) -> f64 {
        self.resolution(objective_mag, numerical_aperture) / self.pixel_ref_um
    }
    /// Numerical aperture giving the sampling ratio `phi` at magnification `magnification`
    pub fn aperture_at(&self, magnification: f64, phi: f64) -> f64 {
        iso_sampling_aperture(
            self.wavelength_nm,
            magnification,
            self.additional_mag,
            self.pixel_ref_um,
            phi,
        )
    }
    /// Magnification giving the sampling ratio `phi` at numerical aperture `numerical_aperture`
    pub fn magnification_at(&self, numerical_aperture: f64, phi: f64) -> f64 {
        iso_sampling_magnification(
            self.wavelength_nm,
            numerical_aperture,
            self.additional_mag,
            self.pixel_ref_um,
            phi,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn forward_formula() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let l = rng.gen_range(200.0..900.0);
            let m = rng.gen_range(1.0..150.0);
            let na = rng.gen_range(0.01..1.6);
            let a = rng.gen_range(1.0..5.0);
            let expected = 0.61 * (l / 1000.0) / na * m * a;
            assert_eq!(camera_resolution(l, m, na, a), expected);
        }
    }

    #[test]
    fn inverse_law() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let optics = Optics::new(
                rng.gen_range(200.0..900.0),
                rng.gen_range(1.0..13.0),
                rng.gen_range(1.0..5.0),
            );
            let m = rng.gen_range(1.0..150.0);
            let phi = rng.gen_range(0.5..6.0);
            let na = optics.aperture_at(m, phi);
            assert!(close(optics.sampling_ratio(m, na), phi, 1e-12));
            assert!(close(optics.magnification_at(na, phi), m, 1e-12));
        }
    }

    #[test]
    fn monotonicity() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let l = rng.gen_range(200.0..900.0);
            let m = rng.gen_range(1.0..150.0);
            let na = rng.gen_range(0.01..1.6);
            let a = rng.gen_range(1.0..5.0);
            let r = camera_resolution(l, m, na, a);
            let k = rng.gen_range(1.01..2.0);
            assert!(camera_resolution(l * k, m, na, a) > r);
            assert!(camera_resolution(l, m * k, na, a) > r);
            assert!(camera_resolution(l, m, na, a * k) > r);
            assert!(camera_resolution(l, m, na * k, a) < r);
        }
    }

    #[test]
    fn near_nyquist_objective() {
        let r = camera_resolution(500.0, 40.0, 0.95, 1.0);
        assert!((r - 12.842).abs() < 1e-3);
        let ratio = Optics::new(500.0, 6.5, 1.0).sampling_ratio(40.0, 0.95);
        assert!((ratio - 1.976).abs() < 1e-3);
        assert_eq!(Sampling::classify(ratio), Sampling::Undersampled);
    }

    #[test]
    fn iso_aperture_scenario() {
        // 0.61 * 500 / 2300 * 20 / 6.5
        let na = iso_sampling_aperture(500.0, 20.0, 1.0, 6.5, 2.3);
        assert!((na - 0.40803).abs() < 1e-4);
        let na = iso_sampling_aperture(500.0, 10.0, 1.0, 6.5, 2.3);
        assert!((na - 0.2040).abs() < 1e-4);
    }

    #[test]
    fn zero_aperture_is_infinite() {
        assert!(camera_resolution(500.0, 40.0, 0.0, 1.0).is_infinite());
    }

    #[test]
    fn classification() {
        assert_eq!(Sampling::classify(1.99), Sampling::Undersampled);
        assert_eq!(Sampling::classify(2.0), Sampling::Nyquist);
        assert_eq!(Sampling::classify(2.3), Sampling::Nyquist);
        assert_eq!(Sampling::classify(2.31), Sampling::Oversampled);
        assert_eq!(Sampling::classify(f64::INFINITY), Sampling::Oversampled);
        assert_eq!(Sampling::classify(f64::NAN), Sampling::Undersampled);
    }
}
