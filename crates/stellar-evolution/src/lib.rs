//! Chemical enrichment by evolving stellar populations.
//!
//! Each star particle is a simple stellar population. Every step the stars
//! whose lifetime ends between the particle's age and age + dt return mass to
//! the gas through three channels: type Ia supernovae, core-collapse
//! supernovae and AGB winds. Released masses are tracked for nine elements
//! plus the total metal mass.
//!
//! Build a [`StellarPopulationProperties`] once from a
//! [`StellarEvolutionConfig`] and the loaded tables, then call
//! [`evolve_star_particle`] for each particle.

pub mod channels;
pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod imf;
pub mod lifetime;
pub mod particle;
pub mod properties;
pub mod yields;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod lifetime_test;

// Re-export configuration
pub use config::{
    FeedbackConstants, ImfConfig, ImfShape, LifetimeModelKind, MassTransfer, SnIaConfig,
    StellarEvolutionConfig,
};

// Re-export model types
pub use element::{Element, ElementArray};
pub use error::{Channel, EvolutionError, Result};
pub use imf::{Imf, ImfMoment};
pub use lifetime::{LifetimeModel, LifetimeTable};
pub use particle::{Composition, EnrichmentRecord, StarParticle};
pub use properties::{StellarPopulationProperties, StellarTables};
pub use yields::{ImfYields, MetallicityBracket, SnIaYields, YieldTable};

// Re-export the evolution entry points
pub use channels::{DyingMassRange, SnIaRelease, TableRelease};
pub use driver::{compute_stellar_evolution, evolve_star_particle};
