//! Type Ia supernovae.
//!
//! The SNIa rate follows an exponential delay-time distribution (Förster et
//! al. 2006). The number of events per solar mass formed between DTD times
//! t₀ and t₁ is
//!
//! ```text
//! N = ν (exp(-t₀/τ) - exp(-t₁/τ))
//! ```
//!
//! No SNIa can happen before the most massive white dwarf progenitor (8 M☉)
//! has died, so the first step in which the DTD window opens starts its
//! integral at the lifetime of an 8 M☉ star.

use tracing::debug;
use units::Time;

use super::{DyingMassRange, LOG10_SNIA_MAX_MASS_MSUN};
use crate::element::{Element, ElementArray};
use crate::particle::StarParticle;
use crate::properties::StellarPopulationProperties;

/// What the SNIa channel releases in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnIaRelease {
    /// Number of SNIa per M☉ of initial stellar mass
    pub events: f64,
    /// Mass of each tracked element
    pub elements: ElementArray,
    /// Metal mass, untracked metals included; SNIa return no H or He so this
    /// is also the total mass returned
    pub metals: f64,
    /// Iron from SNIa
    pub iron: f64,
    /// DTD clock at the end of the step
    pub clock: Time,
}

/// Evolve the SNIa channel over a step of length `dt`.
///
/// The particle's DTD clock is read, and the advanced clock is returned in the
/// release: the clock always moves forward by `dt`, also before the first
/// white dwarfs exist.
pub fn evolve_snia(
    range: DyingMassRange,
    particle: &StarParticle,
    properties: &StellarPopulationProperties,
    dt: Time,
) -> SnIaRelease {
    let clock_before = particle.time_since_enrichment;
    let clock_after = clock_before + dt;

    // Only stars above the SNIa progenitor cap are dying
    if range.log10_min >= LOG10_SNIA_MAX_MASS_MSUN {
        return SnIaRelease {
            clock: clock_after,
            ..SnIaRelease::default()
        };
    }

    let window_start = if range.log10_max > LOG10_SNIA_MAX_MASS_MSUN {
        properties
            .lifetime_model()
            .lifetime(10f64.powf(LOG10_SNIA_MAX_MASS_MSUN), particle.metallicity())
    } else {
        clock_before
    };

    let snia = properties.snia();
    let tau = snia.timescale_gyr;
    let events = (snia.efficiency
        * ((-window_start.to_gyr() / tau).exp() - (-clock_after.to_gyr() / tau).exp()))
    .max(0.0);

    let mut release = SnIaRelease {
        events,
        clock: clock_after,
        ..SnIaRelease::default()
    };

    if properties.mass_transfer().snia {
        let yields = properties.snia_yields();
        release.elements = *yields.elements() * events;
        release.metals = events * yields.total_metals();
        release.iron = release.elements[Element::Iron];
    }

    debug!(
        events,
        metals = release.metals,
        window_start_gyr = window_start.to_gyr(),
        clock_gyr = clock_after.to_gyr(),
        "SNIa"
    );
    release
}
