//! Core-collapse supernovae.

use tracing::debug;

use super::{
    DyingMassRange, LOG10_SNII_MAX_MASS_MSUN, LOG10_SNII_MIN_MASS_MSUN, TableRelease,
    integrate_table,
};
use crate::error::{Channel, Result};
use crate::imf::ImfMoment;
use crate::particle::StarParticle;
use crate::properties::StellarPopulationProperties;

/// Evolve the SNII channel over the stars dying in `range`.
///
/// Returns `None` when no SNII progenitor dies this step. With SNII mass
/// transfer switched off the release carries only the supernova count.
pub fn evolve_snii(
    range: DyingMassRange,
    particle: &StarParticle,
    properties: &StellarPopulationProperties,
) -> Result<Option<TableRelease>> {
    let imf = properties.imf();
    // An IMF grid narrower than the SNII window leaves nothing to integrate
    let Some(range) = range.clamp(
        LOG10_SNII_MIN_MASS_MSUN.max(imf.log10_min_mass()),
        LOG10_SNII_MAX_MASS_MSUN.min(imf.log10_max_mass()),
    ) else {
        return Ok(None);
    };

    let supernovae = imf.integrate(range.log10_min, range.log10_max, 0.0, ImfMoment::Number);

    let release = if properties.mass_transfer().snii {
        TableRelease {
            supernovae,
            ..integrate_table(
                Channel::SnII,
                properties.snii_yields(),
                imf,
                range,
                &particle.composition,
            )?
        }
    } else {
        TableRelease {
            supernovae,
            ..TableRelease::default()
        }
    };

    debug!(
        log10_min_mass = range.log10_min,
        log10_max_mass = range.log10_max,
        supernovae,
        mass = release.mass,
        metals = release.metals,
        "SNII"
    );
    Ok(Some(release))
}
