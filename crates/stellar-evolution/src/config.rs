//! Initialization-time parameters of the stellar evolution scheme.
//!
//! The surrounding simulation parses its parameter file and hands us a
//! [`StellarEvolutionConfig`]. Every field has a default so a partial parameter
//! block deserializes cleanly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::element::ElementArray;
use crate::error::EvolutionError;

/// Which stellar lifetime formulation converts between mass and age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifetimeModelKind {
    /// Padovani & Matteucci (1993), closed form.
    PadovaniMatteucci,
    /// Maeder & Meynet (1989), closed form.
    MaederMeynet,
    /// Portinari et al. (1998), metallicity-dependent table.
    #[default]
    Tabulated,
}

/// Legacy integer flag: 0 = PM93, 1 = MM89, 2 = tabulated.
impl TryFrom<u8> for LifetimeModelKind {
    type Error = EvolutionError;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(Self::PadovaniMatteucci),
            1 => Ok(Self::MaederMeynet),
            2 => Ok(Self::Tabulated),
            other => Err(EvolutionError::UnknownLifetimeModel(other)),
        }
    }
}

/// Functional form of the initial mass function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ImfShape {
    /// Chabrier (2003): log-normal below 1 M☉, power law above.
    #[default]
    Chabrier,
    /// Kroupa (2001) broken power law, slopes -1.3 and -2.3 around 0.5 M☉.
    Kroupa,
    /// Single power law dN/dm ∝ m^(-exponent); Salpeter is 2.35.
    Salpeter { exponent: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImfConfig {
    pub shape: ImfShape,
    /// Lowest stellar mass formed (M☉)
    pub min_mass: f64,
    /// Highest stellar mass formed (M☉)
    pub max_mass: f64,
    /// Number of log-spaced mass bins
    pub bins: usize,
}

impl Default for ImfConfig {
    fn default() -> Self {
        Self {
            shape: ImfShape::Chabrier,
            min_mass: 0.1,
            max_mass: 100.0,
            bins: 200,
        }
    }
}

/// Exponential delay-time distribution for type Ia supernovae.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnIaConfig {
    /// Number of SNIa per M☉ of initial stellar mass over all time
    pub efficiency: f64,
    /// e-folding time of the delay-time distribution (Gyr)
    pub timescale_gyr: f64,
}

impl Default for SnIaConfig {
    fn default() -> Self {
        Self {
            efficiency: 2.0e-3,
            timescale_gyr: 2.0,
        }
    }
}

/// Whether each channel hands its ejecta to the surrounding gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassTransfer {
    pub snia: bool,
    pub snii: bool,
    pub agb: bool,
}

impl Default for MassTransfer {
    fn default() -> Self {
        Self {
            snia: true,
            snii: true,
            agb: true,
        }
    }
}

/// Energy constants consumed by the feedback injection step. Carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConstants {
    /// Energy per core-collapse supernova (erg)
    pub snii_energy_erg: f64,
    /// Temperature jump of heated gas (K)
    pub snii_delta_temperature_k: f64,
    /// Energy per type Ia supernova (erg)
    pub snia_energy_erg: f64,
}

impl Default for FeedbackConstants {
    fn default() -> Self {
        Self {
            snii_energy_erg: 1.0e51,
            snii_delta_temperature_k: 3.162_277_66e7,
            snia_energy_erg: 1.0e51,
        }
    }
}

/// Parameters of the stellar evolution scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StellarEvolutionConfig {
    /// Directory of the yield tables, read by the table loader
    pub yield_table_path: Option<PathBuf>,
    pub lifetime_model: LifetimeModelKind,
    pub imf: ImfConfig,
    pub snia: SnIaConfig,
    pub mass_transfer: MassTransfer,
    /// Multiplicative factor applied to SNII net yields per element
    pub snii_yield_factors: ElementArray,
    pub feedback: FeedbackConstants,
}

impl Default for StellarEvolutionConfig {
    fn default() -> Self {
        Self {
            yield_table_path: None,
            lifetime_model: LifetimeModelKind::default(),
            imf: ImfConfig::default(),
            snia: SnIaConfig::default(),
            mass_transfer: MassTransfer::default(),
            snii_yield_factors: ElementArray::splat(1.0),
            feedback: FeedbackConstants::default(),
        }
    }
}

impl StellarEvolutionConfig {
    /// Rejects parameter values the evolution code cannot work with.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        let imf = &self.imf;
        if !(imf.min_mass.is_finite() && imf.min_mass > 0.0) {
            return Err(EvolutionError::InvalidParameter {
                name: "imf.min_mass",
                value: imf.min_mass,
            });
        }
        if !(imf.max_mass.is_finite() && imf.max_mass > imf.min_mass) {
            return Err(EvolutionError::InvalidParameter {
                name: "imf.max_mass",
                value: imf.max_mass,
            });
        }
        if imf.bins < 2 {
            return Err(EvolutionError::InvalidParameter {
                name: "imf.bins",
                value: imf.bins as f64,
            });
        }
        if let ImfShape::Salpeter { exponent } = imf.shape {
            if !exponent.is_finite() {
                return Err(EvolutionError::InvalidParameter {
                    name: "imf.shape.exponent",
                    value: exponent,
                });
            }
        }
        if !(self.snia.efficiency.is_finite() && self.snia.efficiency >= 0.0) {
            return Err(EvolutionError::InvalidParameter {
                name: "snia.efficiency",
                value: self.snia.efficiency,
            });
        }
        if !(self.snia.timescale_gyr.is_finite() && self.snia.timescale_gyr > 0.0) {
            return Err(EvolutionError::InvalidParameter {
                name: "snia.timescale_gyr",
                value: self.snia.timescale_gyr,
            });
        }
        if let Some((_, factor)) = self
            .snii_yield_factors
            .iter()
            .find(|(_, f)| !(f.is_finite() && *f >= 0.0))
        {
            return Err(EvolutionError::InvalidParameter {
                name: "snii_yield_factors",
                value: factor,
            });
        }
        Ok(())
    }
}
