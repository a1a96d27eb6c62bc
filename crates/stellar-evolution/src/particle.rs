//! Star particle state touched by stellar evolution.
//!
//! A star particle stands for a simple stellar population: all of its stars
//! formed together with the same composition. Released quantities are stored
//! per unit initial stellar mass; [`StarParticle::released_mass`] scales them
//! to the particle.

use serde::{Deserialize, Serialize};
use units::{Mass, Time};

use crate::element::{Element, ElementArray};

/// Elemental make-up of the particle's stars at birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Mass fraction of each tracked element
    pub element_fractions: ElementArray,
    /// Mass fraction of all elements heavier than helium, tracked or not
    pub metal_mass_fraction: f64,
}

impl Composition {
    pub fn new(element_fractions: ElementArray, metal_mass_fraction: f64) -> Self {
        Self {
            element_fractions,
            metal_mass_fraction,
        }
    }

    /// Primordial gas: 75% hydrogen, 25% helium, no metals.
    pub fn primordial() -> Self {
        let mut element_fractions = ElementArray::zero();
        element_fractions[Element::Hydrogen] = 0.752;
        element_fractions[Element::Helium] = 0.248;
        Self::new(element_fractions, 0.0)
    }

    pub fn fraction(&self, element: Element) -> f64 {
        self.element_fractions[element]
    }
}

/// Per-step enrichment accumulators, all per unit initial stellar mass.
///
/// Reset at the start of every evolution call; read and cleared by the
/// feedback injection step afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    /// Mass of each tracked element released by all channels
    pub metals_released: ElementArray,
    /// Metal mass released by all channels, untracked metals included
    pub metal_mass_released: f64,

    pub mass_from_agb: f64,
    pub metals_from_agb: f64,
    pub mass_from_snii: f64,
    pub metals_from_snii: f64,
    pub mass_from_snia: f64,
    pub metals_from_snia: f64,
    pub iron_from_snia: f64,

    /// Type Ia supernovae this step
    pub num_snia: f64,
    /// Core-collapse supernovae this step
    pub num_snii: f64,
}

impl EnrichmentRecord {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total mass returned to the gas by all three channels.
    pub fn total_mass_released(&self) -> f64 {
        self.mass_from_agb + self.mass_from_snii + self.mass_from_snia
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The enrichment-related fields of one star particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarParticle {
    /// Time since the particle formed
    pub age: Time,
    /// Stellar mass at formation
    pub initial_mass: Mass,
    pub composition: Composition,
    /// Clock of the SNIa delay-time distribution
    pub time_since_enrichment: Time,
    pub enrichment: EnrichmentRecord,
}

impl StarParticle {
    /// A newly formed particle.
    pub fn new(initial_mass: Mass, composition: Composition) -> Self {
        Self {
            age: Time::zero(),
            initial_mass,
            composition,
            time_since_enrichment: Time::zero(),
            enrichment: EnrichmentRecord::default(),
        }
    }

    /// A particle of a given age whose SNIa clock has run since formation.
    pub fn with_age(initial_mass: Mass, composition: Composition, age: Time) -> Self {
        Self {
            age,
            time_since_enrichment: age,
            ..Self::new(initial_mass, composition)
        }
    }

    pub fn metallicity(&self) -> f64 {
        self.composition.metal_mass_fraction
    }

    /// Mass of `element` released by the particle during the last step.
    pub fn released_mass(&self, element: Element) -> Mass {
        self.initial_mass * self.enrichment.metals_released[element]
    }

    /// Metal mass released by the particle during the last step.
    pub fn released_metal_mass(&self) -> Mass {
        self.initial_mass * self.enrichment.metal_mass_released
    }

    /// Number of type Ia supernovae in the particle during the last step.
    pub fn snia_events(&self) -> f64 {
        self.enrichment.num_snia * self.initial_mass.to_solar_masses()
    }
}
