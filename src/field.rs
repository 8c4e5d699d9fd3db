use std::{fmt, path::Path, time::Instant};

use nalgebra::DMatrix;
use serde::Serialize;

use crate::{
    resolution::{Optics, NYQUIST},
    Axis,
};

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("failed to write the sampling field to CSV")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, FieldError>;

#[derive(Serialize)]
struct Record {
    #[serde(rename = "Numerical Aperture")]
    numerical_aperture: f64,
    #[serde(rename = "Magnification")]
    magnification: f64,
    #[serde(rename = "Pixels per blur element")]
    sampling_ratio: f64,
}

/// Pixels per resolution element over the (numerical aperture, magnification) grid
///
/// Rows follow the numerical aperture axis and columns the magnification axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingField {
    magnification: Axis,
    numerical_aperture: Axis,
    data: DMatrix<f64>,
}
impl SamplingField {
    /// Evaluates the resolution model at every point of the grid
    pub fn compute(magnification: &Axis, numerical_aperture: &Axis, optics: &Optics) -> Self {
        let now = Instant::now();
        let data = DMatrix::from_fn(numerical_aperture.len(), magnification.len(), |i, j| {
            optics.sampling_ratio(magnification[j], numerical_aperture[i])
        });
        log::debug!(
            "sampling field ({}x{}) computed in {}µs",
            data.nrows(),
            data.ncols(),
            now.elapsed().as_micros()
        );
        Self {
            magnification: magnification.clone(),
            numerical_aperture: numerical_aperture.clone(),
            data,
        }
    }
    /// Field shape: (# of numerical apertures, # of magnifications)
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }
    /// Sampling ratio at numerical aperture #`i` and magnification #`j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get((i, j)).copied()
    }
    pub fn magnification(&self) -> &Axis {
        &self.magnification
    }
    pub fn numerical_aperture(&self) -> &Axis {
        &self.numerical_aperture
    }
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }
    /// Iterator over `(numerical aperture, magnification, sampling ratio)`
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.numerical_aperture
            .iter()
            .enumerate()
            .flat_map(move |(i, &na)| {
                self.magnification
                    .iter()
                    .enumerate()
                    .map(move |(j, &m)| (na, m, self.data[(i, j)]))
            })
    }
    /// Smallest and largest finite sampling ratios
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter(|x| x.is_finite())
            .fold(None, |mm, &x| match mm {
                None => Some((x, x)),
                Some((min, max)) => Some((min.min(x), max.max(x))),
            })
    }
    /// Fraction of the grid with a sampling ratio at least `phi`
    pub fn fraction_above(&self, phi: f64) -> f64 {
        let n = self.data.iter().filter(|&&x| x >= phi).count();
        n as f64 / self.data.len() as f64
    }
    /// Logs a summary of the field
    pub fn summary(&self, saturation: f64) {
        log::info!("{}", self);
        let n_non_finite = self.data.iter().filter(|x| !x.is_finite()).count();
        if n_non_finite > 0 {
            log::warn!("{n_non_finite} non-finite sampling ratio(s) in the field");
        }
        let saturated = self.fraction_above(saturation);
        if saturated > 0.0 {
            log::warn!(
                "{:.1}% of the field is above the color scale maximum ({})",
                saturated * 1e2,
                saturation
            );
        }
    }
    /// Writes the field to a CSV file, one record per grid point
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        for (numerical_aperture, magnification, sampling_ratio) in self.iter() {
            wtr.serialize(Record {
                numerical_aperture,
                magnification,
                sampling_ratio,
            })?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
impl fmt::Display for SamplingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_na, n_m) = self.shape();
        let (na_min, na_max) = self.numerical_aperture.bounds();
        let (m_min, m_max) = self.magnification.bounds();
        writeln!(f, "SAMPLING FIELD:")?;
        writeln!(f, " - numerical aperture: {n_na} samples in [{na_min:.3},{na_max:.3}]")?;
        writeln!(f, " - magnification: {n_m} samples in [{m_min:.1},{m_max:.1}]")?;
        match self.min_max() {
            Some((min, max)) => writeln!(f, " - pixels per blur element: [{min:.3},{max:.3}]")?,
            None => writeln!(f, " - pixels per blur element: no finite value")?,
        }
        write!(
            f,
            " - Nyquist sampled or better: {:.1}%",
            self.fraction_above(NYQUIST) * 1e2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::camera_resolution;
    use std::error::Error;

    fn optics() -> Optics {
        Optics::new(500.0, 6.5, 1.0)
    }

    #[test]
    fn shape() -> std::result::Result<(), Box<dyn Error>> {
        for (n_m, n_na) in [(1, 1), (3, 7), (400, 76)] {
            let m = Axis::linspace(1.0, 101.0, n_m)?;
            let na = Axis::linspace(0.1, 1.5, n_na)?;
            let field = SamplingField::compute(&m, &na, &optics());
            assert_eq!(field.shape(), (n_na, n_m));
        }
        Ok(())
    }

    #[test]
    fn elementwise_model() -> std::result::Result<(), Box<dyn Error>> {
        let m = Axis::new(vec![10.0, 40.0, 100.0])?;
        let na = Axis::new(vec![0.3, 0.95])?;
        let field = SamplingField::compute(&m, &na, &optics());
        for (i, &na) in na.iter().enumerate() {
            for (j, &m) in m.iter().enumerate() {
                let expected = camera_resolution(500.0, m, na, 1.0) / 6.5;
                assert_eq!(field.get(i, j), Some(expected));
            }
        }
        let ratio = field.get(1, 1).unwrap();
        assert!((ratio - 1.976).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn reproducible() {
        let m = Axis::magnification();
        let na = Axis::numerical_aperture();
        let a = SamplingField::compute(&m, &na, &optics());
        let b = SamplingField::compute(&m, &na, &optics());
        assert!(a
            .as_matrix()
            .iter()
            .zip(b.as_matrix().iter())
            .all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn non_finite_values() -> std::result::Result<(), Box<dyn Error>> {
        let m = Axis::new(vec![10.0, 20.0])?;
        let na = Axis::new(vec![0.0, 0.5])?;
        let field = SamplingField::compute(&m, &na, &optics());
        assert!(field.get(0, 0).unwrap().is_infinite());
        let (min, max) = field.min_max().unwrap();
        assert!(min.is_finite() && max.is_finite());
        assert_eq!(field.fraction_above(f64::MAX), 0.5);
        Ok(())
    }

    #[test]
    fn csv_export() -> std::result::Result<(), Box<dyn Error>> {
        let m = Axis::new(vec![10.0, 20.0, 40.0])?;
        let na = Axis::new(vec![0.5, 1.0])?;
        let field = SamplingField::compute(&m, &na, &optics());
        let path = std::env::temp_dir().join("nyquist_field_export.csv");
        field.to_csv(&path)?;
        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["Numerical Aperture", "Magnification", "Pixels per blur element"]
        );
        let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 6);
        let ratio: f64 = records[1][2].parse()?;
        assert_eq!(ratio, field.get(0, 1).unwrap());
        std::fs::remove_file(path)?;
        Ok(())
    }
}
