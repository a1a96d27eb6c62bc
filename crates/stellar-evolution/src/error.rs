//! Errors raised while building the stellar population context or evolving a
//! star particle.
//!
//! Every variant is fatal for the run: the surrounding simulation is expected
//! to abort when one of these comes back from an evolution call.

use thiserror::Error;

/// Enrichment channels that can fail their mass normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    SnII,
    Agb,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::SnII => "SNII",
            Channel::Agb => "AGB",
        };
        f.write_str(name)
    }
}

/// Errors emitted by the stellar evolution module.
#[derive(Debug, Error, PartialEq)]
pub enum EvolutionError {
    #[error("stellar lifetime model {0} is not defined")]
    UnknownLifetimeModel(u8),
    #[error("tabulated stellar lifetimes selected but no lifetime table was supplied")]
    MissingLifetimeTable,
    #[error("invalid {table} table: {reason}")]
    InvalidTable { table: &'static str, reason: String },
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("wrong {channel} yield normalization: norm1 = {norm:e}")]
    NonPositiveNormalization { channel: Channel, norm: f64 },
    #[error(
        "min dying mass (log10 {log10_min}) is greater than max dying mass (log10 {log10_max})"
    )]
    DyingMassOrder { log10_min: f64, log10_max: f64 },
}

pub type Result<T> = std::result::Result<T, EvolutionError>;
