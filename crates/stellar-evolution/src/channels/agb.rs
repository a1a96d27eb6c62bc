//! Asymptotic giant branch winds.

use tracing::debug;

use super::{DyingMassRange, LOG10_SNII_MIN_MASS_MSUN, TableRelease, integrate_table};
use crate::error::{Channel, Result};
use crate::particle::StarParticle;
use crate::properties::StellarPopulationProperties;

/// Evolve the AGB channel over the stars dying in `range`.
///
/// Only progenitors lighter than the SNII window contribute. Returns `None`
/// when AGB mass transfer is off or none of them die this step.
pub fn evolve_agb(
    range: DyingMassRange,
    particle: &StarParticle,
    properties: &StellarPopulationProperties,
) -> Result<Option<TableRelease>> {
    if !properties.mass_transfer().agb {
        return Ok(None);
    }

    let imf = properties.imf();
    let Some(range) = range.clamp(
        imf.log10_min_mass(),
        LOG10_SNII_MIN_MASS_MSUN.min(imf.log10_max_mass()),
    ) else {
        return Ok(None);
    };

    let release = integrate_table(
        Channel::Agb,
        properties.agb_yields(),
        imf,
        range,
        &particle.composition,
    )?;

    debug!(
        log10_min_mass = range.log10_min,
        log10_max_mass = range.log10_max,
        mass = release.mass,
        metals = release.metals,
        "AGB"
    );
    Ok(Some(release))
}
