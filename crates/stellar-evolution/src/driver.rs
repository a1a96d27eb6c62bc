//! Per-particle evolution step.
//!
//! Resolves which stars die during the step and runs the enrichment channels
//! over them in a fixed order:
//! 1. SNIa
//! 2. SNII
//! 3. AGB
//!
//! Results are left in the particle's [`EnrichmentRecord`] for the feedback
//! injection step. The particle's age belongs to the caller and is not
//! advanced here; only the SNIa clock moves.

use tracing::trace;
use units::Time;

use crate::channels::{DyingMassRange, TableRelease, evolve_agb, evolve_snia, evolve_snii};
use crate::error::{EvolutionError, Result};
use crate::particle::{EnrichmentRecord, StarParticle};
use crate::properties::StellarPopulationProperties;

/// Evolve one star particle over a step of length `dt`.
///
/// Clears the previous step's enrichment before computing the new one.
pub fn evolve_star_particle(
    particle: &mut StarParticle,
    properties: &StellarPopulationProperties,
    dt: Time,
) -> Result<()> {
    particle.enrichment.reset();
    compute_stellar_evolution(particle, properties, dt)
}

/// Add the enrichment of the stars dying between `age` and `age + dt` to the
/// particle's record.
///
/// A step in which no star crosses its death threshold leaves the record
/// untouched. Fails if the lifetime model yields a dying mass that grows with
/// age.
pub fn compute_stellar_evolution(
    particle: &mut StarParticle,
    properties: &StellarPopulationProperties,
    dt: Time,
) -> Result<()> {
    let lifetime = properties.lifetime_model();
    let z = particle.metallicity();

    let log10_max = lifetime.dying_mass(particle.age, z).log10();
    let log10_min = lifetime.dying_mass(particle.age + dt, z).log10();
    trace!(
        age_gyr = particle.age.to_gyr(),
        dt_gyr = dt.to_gyr(),
        log10_min,
        log10_max,
        "dying masses"
    );

    if log10_min > log10_max {
        return Err(EvolutionError::DyingMassOrder {
            log10_min,
            log10_max,
        });
    }
    if log10_min == log10_max {
        particle.time_since_enrichment += dt;
        return Ok(());
    }

    let range = DyingMassRange::new(log10_min, log10_max);

    let snia = evolve_snia(range, particle, properties, dt);
    particle.time_since_enrichment = snia.clock;
    let record = &mut particle.enrichment;
    record.metals_released += snia.elements;
    record.metal_mass_released += snia.metals;
    record.mass_from_snia += snia.metals;
    record.metals_from_snia += snia.metals;
    record.iron_from_snia += snia.iron;
    record.num_snia += snia.events;

    if let Some(snii) = evolve_snii(range, particle, properties)? {
        let record = &mut particle.enrichment;
        record.num_snii += snii.supernovae;
        record.mass_from_snii += snii.mass;
        record.metals_from_snii += snii.metals;
        add_table_release(record, &snii);
    }

    if let Some(agb) = evolve_agb(range, particle, properties)? {
        let record = &mut particle.enrichment;
        record.mass_from_agb += agb.mass;
        record.metals_from_agb += agb.metals;
        add_table_release(record, &agb);
    }

    Ok(())
}

fn add_table_release(record: &mut EnrichmentRecord, release: &TableRelease) {
    record.metals_released += release.elements;
    record.metal_mass_released += release.metals;
}
