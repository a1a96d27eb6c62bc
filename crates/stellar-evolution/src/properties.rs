//! Immutable context shared by every evolution call.
//!
//! Built once at simulation start from the parsed parameters and the loaded
//! tables, then passed by shared reference into every per-particle call. Since
//! nothing here changes after construction, particles can be evolved from any
//! number of threads at once.

use tracing::info;

use crate::config::{
    FeedbackConstants, LifetimeModelKind, MassTransfer, SnIaConfig, StellarEvolutionConfig,
};
use crate::element::ElementArray;
use crate::error::{EvolutionError, Result};
use crate::imf::Imf;
use crate::lifetime::{LifetimeModel, LifetimeTable};
use crate::yields::{ImfYields, SnIaYields, YieldTable};

/// Tables produced by the table loader.
#[derive(Debug, Clone)]
pub struct StellarTables {
    pub snii: YieldTable,
    pub agb: YieldTable,
    pub snia: SnIaYields,
    /// Required when the tabulated lifetime model is selected
    pub lifetimes: Option<LifetimeTable>,
}

/// Everything the enrichment channels read.
#[derive(Debug, Clone)]
pub struct StellarPopulationProperties {
    lifetime: LifetimeModel,
    imf: Imf,
    snii: ImfYields,
    agb: ImfYields,
    snia_yields: SnIaYields,
    snia: SnIaConfig,
    mass_transfer: MassTransfer,
    feedback: FeedbackConstants,
}

impl StellarPopulationProperties {
    /// Validate the parameters, build the IMF grid and resample the yield
    /// tables onto it.
    pub fn new(config: &StellarEvolutionConfig, tables: StellarTables) -> Result<Self> {
        config.validate()?;

        let lifetime = match config.lifetime_model {
            LifetimeModelKind::PadovaniMatteucci => LifetimeModel::PadovaniMatteucci,
            LifetimeModelKind::MaederMeynet => LifetimeModel::MaederMeynet,
            LifetimeModelKind::Tabulated => LifetimeModel::Tabulated(
                tables
                    .lifetimes
                    .ok_or(EvolutionError::MissingLifetimeTable)?,
            ),
        };

        let imf = Imf::new(&config.imf);
        let snii = tables.snii.resample(&imf, &config.snii_yield_factors);
        let agb = tables.agb.resample(&imf, &ElementArray::splat(1.0));

        let properties = Self {
            lifetime,
            imf,
            snii,
            agb,
            snia_yields: tables.snia,
            snia: config.snia.clone(),
            mass_transfer: config.mass_transfer,
            feedback: config.feedback.clone(),
        };
        properties.log_summary(config);
        Ok(properties)
    }

    fn log_summary(&self, config: &StellarEvolutionConfig) {
        info!(
            lifetime_model = self.lifetime.name(),
            imf = ?self.imf.shape(),
            imf_bins = self.imf.bin_count(),
            snii_metallicities = self.snii.log10_metallicity().len(),
            agb_metallicities = self.agb.log10_metallicity().len(),
            snia_efficiency = self.snia.efficiency,
            snia_timescale_gyr = self.snia.timescale_gyr,
            mass_transfer = ?self.mass_transfer,
            yield_table_path = ?config.yield_table_path,
            "stellar evolution properties initialized"
        );
    }

    pub fn lifetime_model(&self) -> &LifetimeModel {
        &self.lifetime
    }

    pub fn imf(&self) -> &Imf {
        &self.imf
    }

    pub fn snii_yields(&self) -> &ImfYields {
        &self.snii
    }

    pub fn agb_yields(&self) -> &ImfYields {
        &self.agb
    }

    pub fn snia_yields(&self) -> &SnIaYields {
        &self.snia_yields
    }

    pub fn snia(&self) -> &SnIaConfig {
        &self.snia
    }

    pub fn mass_transfer(&self) -> MassTransfer {
        self.mass_transfer
    }

    /// Constants for the feedback injection step.
    pub fn feedback(&self) -> &FeedbackConstants {
        &self.feedback
    }
}
