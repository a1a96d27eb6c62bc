//! Initial mass function on a log-spaced mass grid.
//!
//! The IMF is stored as the number of stars per unit mass, Φ(m), at the
//! centre of each of `bins` log-spaced mass bins, normalized so that
//!
//! ```text
//! ∫ m Φ(m) dm = 1   over [min_mass, max_mass]
//! ```
//!
//! Every integral is therefore "per solar mass of stars formed".
//!
//! # Integration
//!
//! Integrals run in log10 mass, dm = m ln(10) dlog m. Each grid node owns the
//! half bin on either side of it (nearest-node rule), and partial bins at the
//! range ends are trimmed by their fractional overlap. Integrals over adjacent
//! ranges therefore sum exactly to the integral over their union.
//!
//! # References
//! - Chabrier (2003) - "Galactic Stellar and Substellar Initial Mass Function"
//! - Kroupa (2001) - "On the variation of the initial mass function"
//! - Salpeter (1955) - "The Luminosity Function and Stellar Evolution"

use std::f64::consts::LN_10;

use crate::config::{ImfConfig, ImfShape};

/// Per-bin kernel of an IMF integral.
#[derive(Debug, Clone, Copy)]
pub enum ImfMoment<'a> {
    /// Number of stars, ∫ Φ m^p dm
    Number,
    /// Mass in stars, ∫ m Φ m^p dm
    Mass,
    /// Caller-supplied quantity per star on the IMF grid, ∫ w(m) Φ m^p dm
    Weighted(&'a [f64]),
}

/// A tabulated IMF.
#[derive(Debug, Clone, PartialEq)]
pub struct Imf {
    shape: ImfShape,
    /// log10 of the bin masses
    log10_mass: Vec<f64>,
    /// Bin masses (M☉)
    mass: Vec<f64>,
    /// Φ(m) at each bin, normalized to unit mass
    by_number: Vec<f64>,
    /// Spacing of the grid in log10 mass
    dlog_mass: f64,
}

impl Imf {
    /// Build the grid and normalize the IMF to one solar mass.
    ///
    /// The config is assumed to have passed
    /// [`StellarEvolutionConfig::validate`](crate::config::StellarEvolutionConfig::validate).
    pub fn new(config: &ImfConfig) -> Self {
        let n = config.bins;
        let log_min = config.min_mass.log10();
        let log_max = config.max_mass.log10();
        let dlog_mass = (log_max - log_min) / (n - 1) as f64;

        let log10_mass: Vec<f64> = (0..n).map(|i| log_min + i as f64 * dlog_mass).collect();
        let mass: Vec<f64> = log10_mass.iter().map(|lm| 10f64.powf(*lm)).collect();
        let by_number = mass.iter().map(|&m| shape_by_number(config.shape, m)).collect();

        let mut imf = Self {
            shape: config.shape,
            log10_mass,
            mass,
            by_number,
            dlog_mass,
        };

        let total_mass = imf.integrate(log_min, log_max, 0.0, ImfMoment::Mass);
        for phi in &mut imf.by_number {
            *phi /= total_mass;
        }
        imf
    }

    pub fn shape(&self) -> ImfShape {
        self.shape
    }

    pub fn bin_count(&self) -> usize {
        self.mass.len()
    }

    pub fn log10_mass(&self) -> &[f64] {
        &self.log10_mass
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn log10_min_mass(&self) -> f64 {
        self.log10_mass[0]
    }

    pub fn log10_max_mass(&self) -> f64 {
        self.log10_mass[self.log10_mass.len() - 1]
    }

    /// Indices of the grid nodes bracketing `[log_mass_lo, log_mass_hi]`.
    ///
    /// Always returns `low < high`, with `low` the node at or below the lower
    /// bound and `high` the node at or above the upper bound (clamped to the
    /// grid).
    pub fn locate_mass_bins(&self, log_mass_lo: f64, log_mass_hi: f64) -> (usize, usize) {
        let n = self.bin_count();
        let offset = |log_mass: f64| ((log_mass - self.log10_min_mass()) / self.dlog_mass).floor();

        let low = offset(log_mass_lo).clamp(0.0, (n - 2) as f64) as usize;
        let high = (offset(log_mass_hi) + 1.0).clamp((low + 1) as f64, (n - 1) as f64) as usize;
        (low, high)
    }

    /// Integrate `kernel × Φ(m) × m^exponent` over `[log_mass_lo, log_mass_hi]`.
    ///
    /// Bounds are clamped to the IMF mass range; an empty range integrates to
    /// zero. For [`ImfMoment::Weighted`] only the entries between the bins
    /// returned by [`Imf::locate_mass_bins`] are read.
    pub fn integrate(
        &self,
        log_mass_lo: f64,
        log_mass_hi: f64,
        exponent: f64,
        moment: ImfMoment<'_>,
    ) -> f64 {
        let lo = log_mass_lo.clamp(self.log10_min_mass(), self.log10_max_mass());
        let hi = log_mass_hi.clamp(self.log10_min_mass(), self.log10_max_mass());
        if hi <= lo {
            return 0.0;
        }

        let (low, high) = self.locate_mass_bins(lo, hi);
        let integrand = |i: usize| {
            let m = self.mass[i];
            let per_star = match moment {
                ImfMoment::Number => 1.0,
                ImfMoment::Mass => m,
                ImfMoment::Weighted(weights) => weights[i],
            };
            // dm = m ln10 dlog m
            per_star * self.by_number[i] * m.powf(1.0 + exponent)
        };

        let mut sum = 0.5 * (integrand(low) + integrand(high));
        sum += (low + 1..high).map(integrand).sum::<f64>();

        // Trim [node low, lo]
        let frac = (lo - self.log10_mass[low]) / self.dlog_mass;
        if frac < 0.5 {
            sum -= frac * integrand(low);
        } else {
            sum -= 0.5 * integrand(low) + (frac - 0.5) * integrand(low + 1);
        }

        // Trim [hi, node high]
        let frac = (hi - self.log10_mass[high - 1]) / self.dlog_mass;
        if frac < 0.5 {
            sum -= 0.5 * integrand(high) + (0.5 - frac) * integrand(high - 1);
        } else {
            sum -= (1.0 - frac) * integrand(high);
        }

        sum * self.dlog_mass * LN_10
    }

    /// Interpolate a quantity tabulated at `table_mass` (M☉) onto the IMF grid.
    ///
    /// Interpolation is linear in log10 mass. Bins outside the tabulated range
    /// take the nearest end value.
    pub fn resample(&self, table_mass: &[f64], values: &[f64]) -> Vec<f64> {
        let log_table: Vec<f64> = table_mass.iter().map(|m| m.log10()).collect();
        let n = log_table.len();

        self.log10_mass
            .iter()
            .map(|&x| {
                if x <= log_table[0] {
                    values[0]
                } else if x >= log_table[n - 1] {
                    values[n - 1]
                } else {
                    let k = (0..n - 1).find(|&k| log_table[k + 1] > x).unwrap_or(n - 2);
                    let f = (x - log_table[k]) / (log_table[k + 1] - log_table[k]);
                    (1.0 - f) * values[k] + f * values[k + 1]
                }
            })
            .collect()
    }
}

/// Unnormalized Φ(m) for an IMF shape.
fn shape_by_number(shape: ImfShape, mass: f64) -> f64 {
    match shape {
        ImfShape::Chabrier => {
            if mass > 1.0 {
                0.237_912 * mass.powf(-2.3)
            } else {
                let x = mass.log10() - 0.079f64.log10();
                0.852_464 * (-x * x / (2.0 * 0.69 * 0.69)).exp() / mass
            }
        }
        ImfShape::Kroupa => {
            // Continuous at 0.5 M☉
            if mass < 0.5 {
                mass.powf(-1.3)
            } else {
                0.5 * mass.powf(-2.3)
            }
        }
        ImfShape::Salpeter { exponent } => mass.powf(-exponent),
    }
}
