use std::ops::Deref;

use itertools::Itertools;
use strum_macros::{Display, EnumString};

#[derive(Debug, thiserror::Error)]
pub enum AxisError {
    #[error("an axis requires at least one sample")]
    Empty,
    #[error("axis sample #{index} ({value}) is not finite")]
    NotFinite { index: usize, value: f64 },
    #[error("axis is not strictly increasing at sample #{0}")]
    NotIncreasing(usize),
    #[error("{scale} axis requires strictly positive samples, found {value}")]
    NonPositive { scale: Scale, value: f64 },
    #[error("invalid axis step: {0}")]
    Step(f64),
}
type Result<T> = std::result::Result<T, AxisError>;

/// Axis scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum Scale {
    #[default]
    #[strum(serialize = "linear")]
    Linear,
    #[strum(serialize = "log")]
    Log,
}
impl Scale {
    /// Maps a data value to its display coordinate
    pub fn project(&self, value: f64) -> f64 {
        match self {
            Scale::Linear => value,
            Scale::Log => value.log10(),
        }
    }
    /// Maps a display coordinate back to a data value
    pub fn unproject(&self, coordinate: f64) -> f64 {
        match self {
            Scale::Linear => coordinate,
            Scale::Log => 10f64.powf(coordinate),
        }
    }
    /// Tick marks over the display coordinates range `[lo,hi]`
    ///
    /// Linear axes get 1, 2 or 5 times a power of ten spacing.
    /// Log axes get major ticks at the decades and minor ticks at 2..9 times the decades;
    /// 2 and 5 are promoted to major ticks when less than 2 decades are visible.
    pub fn ticks(&self, lo: f64, hi: f64) -> Ticks {
        let mut ticks = Ticks {
            scale: *self,
            step: 0.0,
            major: vec![],
            minor: vec![],
        };
        if !(lo.is_finite() && hi.is_finite() && hi > lo) {
            return ticks;
        }
        match self {
            Scale::Linear => {
                let raw = (hi - lo) / MAX_LINEAR_TICKS;
                let magnitude = 10f64.powf(raw.log10().floor());
                let step = [1.0, 2.0, 5.0, 10.0]
                    .into_iter()
                    .map(|k| k * magnitude)
                    .find(|&step| step >= raw)
                    .unwrap_or(10.0 * magnitude);
                let minor_step = step / 5.0;
                let first = (lo / minor_step).ceil() as i64;
                let last = (hi / minor_step).floor() as i64;
                for i in first..=last {
                    let value = i as f64 * minor_step;
                    if i.rem_euclid(5) == 0 {
                        ticks.major.push(value);
                    } else {
                        ticks.minor.push(value);
                    }
                }
                ticks.step = step;
            }
            Scale::Log => {
                let inside = |x: f64| x >= lo - TICK_TOLERANCE && x <= hi + TICK_TOLERANCE;
                let candidates: Vec<(u32, f64)> = (lo.floor() as i32..=hi.ceil() as i32)
                    .flat_map(|decade| {
                        (1..10u32).map(move |m| (m, decade as f64 + f64::from(m).log10()))
                    })
                    .filter(|&(_, x)| inside(x))
                    .collect();
                let decades = candidates.iter().filter(|(m, _)| *m == 1).count();
                let is_major = |m: u32| match decades {
                    0 | 1 => m == 1 || m == 2 || m == 5,
                    _ => m == 1,
                };
                let (major, minor): (Vec<_>, Vec<_>) =
                    candidates.into_iter().partition(|&(m, _)| is_major(m));
                ticks.major = major.into_iter().map(|(_, x)| x).collect();
                ticks.minor = minor.into_iter().map(|(_, x)| x).collect();
            }
        }
        ticks
    }
}

const MAX_LINEAR_TICKS: f64 = 8.0;
const TICK_TOLERANCE: f64 = 1e-9;

/// Axis tick marks, in display coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    scale: Scale,
    step: f64,
    pub major: Vec<f64>,
    pub minor: Vec<f64>,
}
impl Ticks {
    /// Tick label of a display coordinate
    ///
    /// Linear axes use the same number of decimals for every tick.
    /// Log axes print each tick with the decimals of its own decade.
    pub fn label(&self, coordinate: f64) -> String {
        let value = self.scale.unproject(coordinate);
        let resolution = match self.scale {
            Scale::Linear => self.step,
            Scale::Log => value.abs(),
        };
        let precision = if resolution > 0.0 {
            (-resolution.log10() - TICK_TOLERANCE).ceil().max(0.0) as usize
        } else {
            0
        };
        let label = format!("{value:.precision$}");
        match label.strip_prefix('-') {
            Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => {
                unsigned.to_string()
            }
            _ => label,
        }
    }
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    let mut samples: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    samples[n - 1] = stop;
    samples
}
/// Largest number of samples of an axis built from a step
pub const MAX_SAMPLES: usize = 1 << 24;

fn arange(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Ordered sample coordinates along one dimension of the sweep
#[derive(Debug, Clone, PartialEq)]
pub struct Axis(Vec<f64>);
impl Deref for Axis {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl TryFrom<Vec<f64>> for Axis {
    type Error = AxisError;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Axis::new(value)
    }
}
impl Axis {
    /// Creates an axis from finite and strictly increasing samples
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(AxisError::Empty);
        }
        if let Some((index, &value)) = samples.iter().find_position(|x| !x.is_finite()) {
            return Err(AxisError::NotFinite { index, value });
        }
        if let Some((index, _)) = samples
            .iter()
            .tuple_windows()
            .find_position(|(a, b)| b <= a)
        {
            return Err(AxisError::NotIncreasing(index + 1));
        }
        Ok(Self(samples))
    }
    /// `n` evenly spaced samples from `start` to `stop`, both included
    pub fn linspace(start: f64, stop: f64, n: usize) -> Result<Self> {
        match n {
            0 => Err(AxisError::Empty),
            _ => Self::new(linspace(start, stop, n)),
        }
    }
    /// Samples from `start` to `stop` (excluded) every `step`
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(AxisError::Step(step));
        }
        let n = ((stop - start) / step).ceil();
        if !(n >= 1.0) {
            return Err(AxisError::Empty);
        }
        if n > MAX_SAMPLES as f64 {
            return Err(AxisError::Step(step));
        }
        Self::new(arange(start, step, n as usize))
    }
    /// Objective magnification sweep: 400 samples from 1 to 101
    pub fn magnification() -> Self {
        Self(linspace(1.0, 101.0, 400))
    }
    /// Numerical aperture sweep: from 0.095 to 1.6 (excluded) every 0.02
    pub fn numerical_aperture() -> Self {
        Self(arange(0.095, 0.02, 76))
    }
    /// Axis first and last samples
    pub fn bounds(&self) -> (f64, f64) {
        (self.0[0], self.0[self.0.len() - 1])
    }
    /// Checks that the samples can be displayed with the given scale
    pub fn check_scale(&self, scale: Scale) -> Result<()> {
        match scale {
            Scale::Linear => Ok(()),
            Scale::Log => match self.0.iter().find(|&&x| x <= 0.0) {
                Some(&value) => Err(AxisError::NonPositive { scale, value }),
                None => Ok(()),
            },
        }
    }
    /// Display coordinates of the cell edges around each sample
    ///
    /// Inner edges are halfway between projected samples, outer edges are half a step away
    /// from the first and last samples.
    pub fn cell_edges(&self, scale: Scale) -> Vec<f64> {
        let centers: Vec<f64> = self.0.iter().map(|&x| scale.project(x)).collect();
        if centers.len() == 1 {
            return vec![centers[0] - 0.5, centers[0] + 0.5];
        }
        let n = centers.len();
        let mut edges = Vec::with_capacity(n + 1);
        edges.push(centers[0] - 0.5 * (centers[1] - centers[0]));
        edges.extend(centers.iter().tuple_windows().map(|(a, b)| 0.5 * (a + b)));
        edges.push(centers[n - 1] + 0.5 * (centers[n - 1] - centers[n - 2]));
        edges
    }
}
