//! Stellar death channels.
//!
//! Each channel receives the range of initial masses dying during the step and
//! returns what it releases, per unit initial stellar mass:
//!
//! 1. **SNIa** - exponential delay-time distribution, fixed yield per event
//! 2. **SNII** - table yields of 6-100 M☉ progenitors integrated over the IMF
//! 3. **AGB** - table yields of progenitors below the SNII window
//!
//! Channels never touch the particle; the driver folds their releases into the
//! particle's [`EnrichmentRecord`](crate::particle::EnrichmentRecord).

mod agb;
mod snia;
mod snii;

pub use agb::evolve_agb;
pub use snia::{SnIaRelease, evolve_snia};
pub use snii::evolve_snii;

use crate::element::{Element, ElementArray};
use crate::error::{Channel, EvolutionError, Result};
use crate::imf::{Imf, ImfMoment};
use crate::particle::Composition;
use crate::yields::ImfYields;

/// log10(6): lightest progenitor of a core-collapse supernova.
pub const LOG10_SNII_MIN_MASS_MSUN: f64 = 0.778_151_250_383_643_6;
/// log10(100): heaviest progenitor of a core-collapse supernova.
pub const LOG10_SNII_MAX_MASS_MSUN: f64 = 2.0;
/// log10(8): heaviest progenitor of a SNIa white dwarf.
pub const LOG10_SNIA_MAX_MASS_MSUN: f64 = 0.903_089_986_991_943_5;

/// Initial masses of the stars dying during one step, in log10 M☉.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DyingMassRange {
    pub log10_min: f64,
    pub log10_max: f64,
}

impl DyingMassRange {
    pub fn new(log10_min: f64, log10_max: f64) -> Self {
        Self {
            log10_min,
            log10_max,
        }
    }

    /// Intersection with `[log10_lo, log10_hi]`, or `None` if it is empty.
    pub fn clamp(&self, log10_lo: f64, log10_hi: f64) -> Option<DyingMassRange> {
        let log10_min = self.log10_min.max(log10_lo);
        let log10_max = self.log10_max.min(log10_hi);
        (log10_min < log10_max).then_some(DyingMassRange::new(log10_min, log10_max))
    }
}

/// What a table-driven channel (SNII or AGB) releases in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRelease {
    /// Mass of each tracked element
    pub elements: ElementArray,
    /// Total mass returned, summed over tracked elements
    pub mass: f64,
    /// Metal mass returned, untracked metals included
    pub metals: f64,
    /// IMF integral of the tabulated ejecta, the normalization target
    pub ejecta: f64,
    /// Number of supernovae (SNII only)
    pub supernovae: f64,
}

/// Integrate a resampled yield table over `range` for stars of `composition`
/// and normalize the result to the tabulated ejecta mass.
///
/// Each element's release is its net yield plus the star's initial abundance
/// of it times the ejecta. Negative integrals are numerical noise and are set
/// to zero before normalizing.
pub(crate) fn integrate_table(
    channel: Channel,
    yields: &ImfYields,
    imf: &Imf,
    range: DyingMassRange,
    composition: &Composition,
) -> Result<TableRelease> {
    let (lo, hi) = (range.log10_min, range.log10_max);
    let (low, high) = imf.locate_mass_bins(lo, hi);
    let bracket = yields.bracket(composition.metal_mass_fraction);

    let mut weights = vec![0.0; imf.bin_count()];
    let mut integrate = |per_star: &dyn Fn(usize, usize) -> f64| {
        for bin in low..=high {
            weights[bin] = bracket.blend(|iz| per_star(iz, bin));
        }
        imf.integrate(lo, hi, 0.0, ImfMoment::Weighted(&weights))
    };

    let mut metals = ElementArray::from_fn(|element| {
        let abundance = composition.fraction(element);
        integrate(&|iz, bin| {
            yields.net_yield(iz, element, bin) + abundance * yields.ejecta(iz, bin)
        })
    });
    let z = composition.metal_mass_fraction;
    let mut metal_mass =
        integrate(&|iz, bin| yields.total_metals(iz, bin) + z * yields.ejecta(iz, bin));

    for element in Element::ALL {
        metals[element] = metals[element].max(0.0);
    }
    metal_mass = metal_mass.max(0.0);

    let norm0 = integrate(&|iz, bin| yields.ejecta(iz, bin));
    let norm1 = metal_mass + metals[Element::Hydrogen] + metals[Element::Helium];
    if !(norm1 > 0.0) {
        return Err(EvolutionError::NonPositiveNormalization {
            channel,
            norm: norm1,
        });
    }

    let scale = norm0 / norm1;
    let elements = metals * scale;
    Ok(TableRelease {
        elements,
        mass: elements.sum(),
        metals: metal_mass * scale,
        ejecta: norm0,
        supernovae: 0.0,
    })
}
