//! Yield and lifetime fixtures shared by the integration tests.
//!
//! The tables are smooth analytic stand-ins for the published ones. Every
//! table satisfies Y_Z + y_H + y_He = 0, so normalization rescales nothing
//! for a composition whose fractions sum to one.

#![allow(dead_code)]

use stellar_evolution::{
    Composition, Element, ElementArray, LifetimeModelKind, LifetimeTable, SnIaYields,
    StellarEvolutionConfig, StellarPopulationProperties, StellarTables, YieldTable,
};
use units::{Mass, Time};

/// Net yield of each metal per unit of the table's scale function.
type MetalFractions = [(Element, f64); 7];

const SNII_METALS: MetalFractions = [
    (Element::Carbon, 0.02),
    (Element::Nitrogen, 0.005),
    (Element::Oxygen, 0.08),
    (Element::Neon, 0.015),
    (Element::Magnesium, 0.006),
    (Element::Silicon, 0.008),
    (Element::Iron, 0.004),
];

const AGB_METALS: MetalFractions = [
    (Element::Carbon, 0.01),
    (Element::Nitrogen, 0.004),
    (Element::Oxygen, 0.001),
    (Element::Neon, 0.0),
    (Element::Magnesium, 0.0),
    (Element::Silicon, 0.0),
    (Element::Iron, 0.0),
];

struct TableRecipe {
    name: &'static str,
    mass: Vec<f64>,
    metallicity: Vec<f64>,
    metals: MetalFractions,
    /// Untracked metals on top of the tracked ones
    total_metal_factor: f64,
    /// Hydrogen consumed per unit metal yield
    hydrogen_factor: f64,
    scale: fn(f64, f64) -> f64,
    ejecta: fn(f64, f64) -> f64,
}

impl TableRecipe {
    fn build(&self) -> YieldTable {
        let metal_sum: f64 = self.metals.iter().map(|(_, f)| f).sum();
        let mut yields = Vec::new();
        let mut ejecta = Vec::new();
        let mut total_metals = Vec::new();

        for &z in &self.metallicity {
            for element in Element::ALL {
                for &m in &self.mass {
                    let g = (self.scale)(m, z);
                    let y_z = self.total_metal_factor * metal_sum * g;
                    let value = match element {
                        Element::Hydrogen => -self.hydrogen_factor * y_z,
                        Element::Helium => (self.hydrogen_factor - 1.0) * y_z,
                        metal => self
                            .metals
                            .iter()
                            .find(|(e, _)| *e == metal)
                            .map_or(0.0, |(_, f)| f * g),
                    };
                    yields.push(value);
                }
            }
            for &m in &self.mass {
                ejecta.push((self.ejecta)(m, z));
                total_metals.push(self.total_metal_factor * metal_sum * (self.scale)(m, z));
            }
        }

        YieldTable::new(
            self.name,
            self.mass.clone(),
            self.metallicity.clone(),
            yields,
            ejecta,
            total_metals,
        )
        .expect("valid fixture table")
    }
}

pub fn snii_table() -> YieldTable {
    TableRecipe {
        name: "SNII",
        mass: vec![6.0, 10.0, 20.0, 40.0, 100.0],
        metallicity: vec![0.0, 0.004, 0.02, 0.05],
        metals: SNII_METALS,
        total_metal_factor: 1.1,
        hydrogen_factor: 1.3,
        scale: |m, z| (m - 4.0) * (1.0 + 5.0 * z),
        ejecta: |m, z| (0.95 * m - 1.4) * (1.0 - 2.0 * z),
    }
    .build()
}

pub fn agb_table() -> YieldTable {
    TableRecipe {
        name: "AGB",
        mass: vec![0.8, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        metallicity: vec![0.0001, 0.004, 0.019],
        metals: AGB_METALS,
        total_metal_factor: 1.05,
        hydrogen_factor: 1.2,
        scale: |m, z| (m - 0.7) * (1.0 + 10.0 * z),
        ejecta: |m, _| 0.9 * m - 0.5,
    }
    .build()
}

pub fn snia_yields() -> SnIaYields {
    let elements = ElementArray::from([0.0, 0.0, 0.05, 0.0, 0.14, 0.005, 0.0086, 0.15, 0.74]);
    SnIaYields::new(elements, 1.37).expect("valid SNIa yields")
}

pub const LIFETIME_MASSES: [f64; 13] = [
    0.6, 0.8, 1.0, 1.5, 2.0, 3.0, 5.0, 8.0, 12.0, 20.0, 40.0, 70.0, 120.0,
];
pub const LIFETIME_METALLICITIES: [f64; 5] = [0.0004, 0.004, 0.008, 0.02, 0.05];

pub fn lifetime_table() -> LifetimeTable {
    let log_dying_time = LIFETIME_METALLICITIES
        .iter()
        .map(|&z| {
            LIFETIME_MASSES
                .iter()
                .map(|&m| {
                    let x = m.log10();
                    10.0 - 2.8 * x + 0.55 * x * x + 2.0 * z
                })
                .collect()
        })
        .collect();
    LifetimeTable::new(
        LIFETIME_MASSES.to_vec(),
        LIFETIME_METALLICITIES.to_vec(),
        log_dying_time,
    )
    .expect("valid lifetime table")
}

pub fn tables() -> StellarTables {
    StellarTables {
        snii: snii_table(),
        agb: agb_table(),
        snia: snia_yields(),
        lifetimes: Some(lifetime_table()),
    }
}

pub fn config(lifetime_model: LifetimeModelKind) -> StellarEvolutionConfig {
    StellarEvolutionConfig {
        lifetime_model,
        ..StellarEvolutionConfig::default()
    }
}

pub fn properties(lifetime_model: LifetimeModelKind) -> StellarPopulationProperties {
    StellarPopulationProperties::new(&config(lifetime_model), tables())
        .expect("valid stellar evolution properties")
}

/// Near-solar composition with Z = 0.02; fractions sum to one.
pub fn solar_composition() -> Composition {
    let fractions = ElementArray::from([
        0.70, 0.28, 0.0030, 0.0010, 0.0085, 0.0015, 0.0008, 0.0008, 0.0014,
    ]);
    Composition::new(fractions, 0.02)
}

pub fn particle(age_gyr: f64) -> stellar_evolution::StarParticle {
    stellar_evolution::StarParticle::with_age(
        Mass::from_solar_masses(1.0e6),
        solar_composition(),
        Time::from_gyr(age_gyr),
    )
}
