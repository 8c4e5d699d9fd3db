use itertools::Itertools;

use crate::{resolution::Optics, Axis};

/// Line dash pattern, lengths in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dash {
    pub on: u32,
    pub off: u32,
}
impl Dash {
    pub const fn new(on: u32, off: u32) -> Self {
        Self { on, off }
    }
}

/// Dash patterns assigned in turn to the overlay curves
pub const DASHES: [Dash; 4] = [
    Dash::new(10, 5),
    Dash::new(2, 4),
    Dash::new(18, 6),
    Dash::new(6, 2),
];

/// Iso-sampling curve: numerical aperture versus magnification at a constant sampling ratio
#[derive(Debug, Clone, PartialEq)]
pub struct IsoCurve {
    phi: f64,
    dash: Dash,
    points: Vec<(f64, f64)>,
}
impl IsoCurve {
    /// Samples the curve over the magnification axis, within the numerical aperture bounds
    ///
    /// The points where the curve enters and leaves the numerical aperture range are added.
    pub fn new(phi: f64, magnification: &Axis, na_bounds: (f64, f64), optics: &Optics) -> Self {
        let (na_min, na_max) = na_bounds;
        let (m_min, m_max) = magnification.bounds();
        let inside = |na: f64| na >= na_min && na <= na_max;
        let mut points: Vec<(f64, f64)> = magnification
            .iter()
            .map(|&m| (m, optics.aperture_at(m, phi)))
            .filter(|&(_, na)| inside(na))
            .collect();
        points.extend(
            [na_min, na_max]
                .into_iter()
                .map(|na| (optics.magnification_at(na, phi), na))
                .filter(|&(m, _)| m > m_min && m < m_max),
        );
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|a, b| a.0 == b.0);
        Self {
            phi,
            dash: DASHES[0],
            points,
        }
    }
    /// Sets the dash pattern
    pub fn dash(self, dash: Dash) -> Self {
        Self { dash, ..self }
    }
    pub fn phi(&self) -> f64 {
        self.phi
    }
    pub fn dash_pattern(&self) -> Dash {
        self.dash
    }
    /// Curve `(magnification, numerical aperture)` samples
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }
    /// Legend label
    pub fn label(&self) -> String {
        format!("φ = {:.1}", self.phi)
    }
}

/// Splits a polyline into dashes
///
/// `scale` gives the pixels per unit along each coordinate so that dash lengths are
/// measured on screen.
pub fn dash_segments(
    points: &[(f64, f64)],
    dash: Dash,
    scale: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 || dash.on == 0 {
        return vec![];
    }
    if dash.off == 0 {
        return vec![points.to_vec()];
    }
    let (sx, sy) = scale;
    let phase = |drawing: bool| f64::from(if drawing { dash.on } else { dash.off });

    let mut segments = vec![];
    let mut current = vec![points[0]];
    let mut drawing = true;
    let mut left = phase(drawing);
    for (&(x0, y0), &(x1, y1)) in points.iter().tuple_windows() {
        let total = ((x1 - x0) * sx).hypot((y1 - y0) * sy);
        let mut traveled = 0.0;
        while total - traveled > left {
            traveled += left;
            let t = traveled / total;
            let p = (x0 + t * (x1 - x0), y0 + t * (y1 - y0));
            if drawing {
                current.push(p);
                segments.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            drawing = !drawing;
            left = phase(drawing);
        }
        left -= total - traveled;
        if drawing {
            current.push((x1, y1));
        }
    }
    if drawing && current.len() > 1 {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn optics() -> Optics {
        Optics::new(500.0, 6.5, 1.0)
    }

    #[test]
    fn curve_follows_inverse_model() -> Result<(), Box<dyn Error>> {
        let m = Axis::linspace(1.0, 101.0, 400)?;
        let curve = IsoCurve::new(2.3, &m, (0.0, 10.0), &optics());
        assert_eq!(curve.points().len(), 400);
        for &(m, na) in curve.points() {
            let ratio = optics().sampling_ratio(m, na);
            assert!((ratio - 2.3).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn curve_is_clipped_to_aperture_range() -> Result<(), Box<dyn Error>> {
        let m = Axis::linspace(1.0, 101.0, 400)?;
        let na_bounds = (0.095, 1.575);
        let curve = IsoCurve::new(2.0, &m, na_bounds, &optics());
        let first = curve.points()[0];
        let last = curve.points()[curve.points().len() - 1];
        assert!((first.1 - 0.095).abs() < 1e-12);
        assert!((last.1 - 1.575).abs() < 1e-12);
        assert!(curve
            .points()
            .iter()
            .all(|&(_, na)| na >= na_bounds.0 - 1e-12 && na <= na_bounds.1 + 1e-12));
        assert!(curve.points().windows(2).all(|w| w[0].0 < w[1].0));
        Ok(())
    }

    #[test]
    fn curve_outside_range_is_empty() -> Result<(), Box<dyn Error>> {
        let m = Axis::linspace(1.0, 2.0, 10)?;
        let curve = IsoCurve::new(0.01, &m, (0.1, 1.6), &optics());
        assert!(curve.is_empty());
        Ok(())
    }

    #[test]
    fn label() -> Result<(), Box<dyn Error>> {
        let m = Axis::linspace(1.0, 2.0, 10)?;
        let curve = IsoCurve::new(2.3, &m, (0.1, 1.6), &optics()).dash(DASHES[2]);
        assert_eq!(curve.label(), "φ = 2.3");
        assert_eq!(curve.dash_pattern(), Dash::new(18, 6));
        Ok(())
    }

    fn assert_segments(segments: &[Vec<(f64, f64)>], expected: &[&[(f64, f64)]]) {
        assert_eq!(segments.len(), expected.len());
        for (segment, expected) in segments.iter().zip(expected) {
            assert_eq!(segment.len(), expected.len());
            for (a, b) in segment.iter().zip(expected.iter()) {
                assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn dashes() {
        let line = [(0.0, 0.0), (30.0, 0.0)];
        let segments = dash_segments(&line, Dash::new(10, 5), (1.0, 1.0));
        assert_segments(
            &segments,
            &[&[(0.0, 0.0), (10.0, 0.0)], &[(15.0, 0.0), (25.0, 0.0)]],
        );
    }

    #[test]
    fn dashes_across_vertices() {
        let line = [(0.0, 0.0), (6.0, 0.0), (6.0, 8.0)];
        let segments = dash_segments(&line, Dash::new(10, 2), (1.0, 1.0));
        assert_segments(
            &segments,
            &[&[(0.0, 0.0), (6.0, 0.0), (6.0, 4.0)], &[(6.0, 6.0), (6.0, 8.0)]],
        );
    }

    #[test]
    fn dashes_in_pixels() {
        let segments = dash_segments(&[(0.0, 0.0), (3.0, 0.0)], Dash::new(10, 5), (10.0, 1.0));
        assert_segments(
            &segments,
            &[&[(0.0, 0.0), (1.0, 0.0)], &[(1.5, 0.0), (2.5, 0.0)]],
        );
    }

    #[test]
    fn solid_dash() {
        let line = [(0.0, 0.0), (1.0, 1.0)];
        assert_eq!(dash_segments(&line, Dash::new(4, 0), (1.0, 1.0)), vec![line.to_vec()]);
        assert!(dash_segments(&line, Dash::new(0, 4), (1.0, 1.0)).is_empty());
    }
}
