//! Nucleosynthetic yield tables.
//!
//! A [`YieldTable`] is what the table loader hands over: per-star quantities on
//! the table's own (mass, metallicity) grid. At initialization each table is
//! resampled onto the IMF mass grid as an [`ImfYields`], which is what the
//! enrichment channels integrate.
//!
//! Per star of initial mass m and metallicity Z a table gives
//! - net yield of each tracked element (newly synthesized, can be negative)
//! - ejecta: total mass returned, of which a fraction equal to the star's own
//!   initial abundance is "already present" material
//! - total net metal yield, including elements that are not tracked

use tracing::trace;

use crate::element::{Element, ElementArray};
use crate::error::{EvolutionError, Result};
use crate::imf::Imf;
use crate::lifetime::check_axis;

/// log10 metallicity at or below which the lowest table row is used as is.
pub const LOG10_METALLICITY_FLOOR: f64 = -20.0;

/// log10 of a metallicity, mapping zero (and anything below the floor) onto
/// the floor sentinel.
pub fn log10_metallicity(metallicity: f64) -> f64 {
    if metallicity > 0.0 {
        metallicity.log10().max(LOG10_METALLICITY_FLOOR)
    } else {
        LOG10_METALLICITY_FLOOR
    }
}

/// A pair of adjacent rows on a metallicity axis and the linear weight of the
/// upper one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetallicityBracket {
    pub low: usize,
    pub high: usize,
    pub fraction: f64,
}

impl MetallicityBracket {
    /// Bracket `log_metallicity` on a strictly increasing log10 metallicity axis.
    ///
    /// - At or below [`LOG10_METALLICITY_FLOOR`]: lowest row, no interpolation.
    /// - Otherwise the lower row is the last one whose axis value does not
    ///   exceed the query, and the upper row is its successor clamped to the
    ///   last row.
    /// - Queries outside the axis get a zero fraction (nearest edge row), as do
    ///   zero-width brackets.
    pub fn locate(log_metallicity: f64, axis: &[f64]) -> Self {
        if log_metallicity <= LOG10_METALLICITY_FLOOR {
            return Self {
                low: 0,
                high: 0,
                fraction: 0.0,
            };
        }

        let n = axis.len();
        let mut low = 0;
        while low < n - 1 && axis[low + 1] <= log_metallicity {
            low += 1;
        }
        let high = (low + 1).min(n - 1);

        let offset = if log_metallicity >= axis[0] && log_metallicity <= axis[n - 1] {
            log_metallicity - axis[low]
        } else {
            0.0
        };
        let width = axis[high] - axis[low];
        let fraction = if width > 0.0 { offset / width } else { 0.0 };

        trace!(log_metallicity, low, high, fraction, "metallicity bracket");
        Self {
            low,
            high,
            fraction,
        }
    }

    /// Linear blend of a per-row value.
    pub fn blend(&self, at: impl Fn(usize) -> f64) -> f64 {
        (1.0 - self.fraction) * at(self.low) + self.fraction * at(self.high)
    }
}

/// Yields of one channel on the table's own grid.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldTable {
    /// Initial stellar mass (M☉), strictly increasing
    mass: Vec<f64>,
    /// Metallicity mass fraction, strictly increasing
    metallicity: Vec<f64>,
    /// `[metallicity][element][mass]`
    yields: Vec<f64>,
    /// `[metallicity][mass]`
    ejecta: Vec<f64>,
    /// `[metallicity][mass]`
    total_metals: Vec<f64>,
}

impl YieldTable {
    /// Build a table from flat row-major arrays.
    ///
    /// `yields` is laid out `[metallicity][element][mass]` over the tracked
    /// elements; `ejecta` and `total_metals` are `[metallicity][mass]`.
    pub fn new(
        table: &'static str,
        mass: Vec<f64>,
        metallicity: Vec<f64>,
        yields: Vec<f64>,
        ejecta: Vec<f64>,
        total_metals: Vec<f64>,
    ) -> Result<Self> {
        check_axis(table, "mass", &mass)?;
        if metallicity.is_empty() {
            return Err(EvolutionError::InvalidTable {
                table,
                reason: "metallicity axis is empty".to_string(),
            });
        }
        check_increasing(table, &metallicity)?;

        let (n_z, n_m) = (metallicity.len(), mass.len());
        check_len(table, "yield", yields.len(), n_z * Element::COUNT * n_m)?;
        check_len(table, "ejecta", ejecta.len(), n_z * n_m)?;
        check_len(table, "total metals", total_metals.len(), n_z * n_m)?;

        Ok(Self {
            mass,
            metallicity,
            yields,
            ejecta,
            total_metals,
        })
    }

    /// Build a table whose element axis is given by name.
    ///
    /// `named_yields[z]` lists `(element name, yield per mass bin)` rows. Rows
    /// naming untracked elements are skipped; every tracked element must be
    /// present in every metallicity row.
    pub fn from_named_yields(
        table: &'static str,
        mass: Vec<f64>,
        metallicity: Vec<f64>,
        named_yields: &[Vec<(String, Vec<f64>)>],
        ejecta: Vec<f64>,
        total_metals: Vec<f64>,
    ) -> Result<Self> {
        let mut yields = vec![0.0; named_yields.len() * Element::COUNT * mass.len()];
        for (iz, rows) in named_yields.iter().enumerate() {
            let mut seen = [false; Element::COUNT];
            for (name, row) in rows {
                let Ok(element) = name.parse::<Element>() else {
                    continue;
                };
                check_len(table, element.name(), row.len(), mass.len())?;
                let start = (iz * Element::COUNT + element.index()) * mass.len();
                yields[start..start + mass.len()].copy_from_slice(row);
                seen[element.index()] = true;
            }
            if let Some(missing) = Element::ALL.into_iter().find(|e| !seen[e.index()]) {
                return Err(EvolutionError::InvalidTable {
                    table,
                    reason: format!("metallicity row {} has no {} yields", iz, missing.name()),
                });
            }
        }
        Self::new(table, mass, metallicity, yields, ejecta, total_metals)
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn metallicity(&self) -> &[f64] {
        &self.metallicity
    }

    fn yield_row(&self, iz: usize, element: Element) -> &[f64] {
        let n_m = self.mass.len();
        let start = (iz * Element::COUNT + element.index()) * n_m;
        &self.yields[start..start + n_m]
    }

    fn mass_row<'a>(&self, values: &'a [f64], iz: usize) -> &'a [f64] {
        let n_m = self.mass.len();
        &values[iz * n_m..(iz + 1) * n_m]
    }

    /// Resample onto the IMF grid, scaling net yields by `yield_factors`.
    pub fn resample(&self, imf: &Imf, yield_factors: &ElementArray) -> ImfYields {
        let n_z = self.metallicity.len();
        let mut yields = Vec::with_capacity(n_z * Element::COUNT * imf.bin_count());
        let mut ejecta = Vec::with_capacity(n_z * imf.bin_count());
        let mut total_metals = Vec::with_capacity(n_z * imf.bin_count());

        for iz in 0..n_z {
            for element in Element::ALL {
                let factor = yield_factors[element];
                yields.extend(
                    imf.resample(&self.mass, self.yield_row(iz, element))
                        .into_iter()
                        .map(|y| y * factor),
                );
            }
            ejecta.extend(imf.resample(&self.mass, self.mass_row(&self.ejecta, iz)));
            total_metals.extend(imf.resample(&self.mass, self.mass_row(&self.total_metals, iz)));
        }

        ImfYields {
            log10_metallicity: self.metallicity.iter().map(|&z| log10_metallicity(z)).collect(),
            bins: imf.bin_count(),
            yields,
            ejecta,
            total_metals,
        }
    }
}

/// A yield table resampled onto the IMF mass grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ImfYields {
    /// log10 metallicity of each row, zero mapped onto the floor
    log10_metallicity: Vec<f64>,
    bins: usize,
    /// `[metallicity][element][bin]`
    yields: Vec<f64>,
    /// `[metallicity][bin]`
    ejecta: Vec<f64>,
    /// `[metallicity][bin]`
    total_metals: Vec<f64>,
}

impl ImfYields {
    pub fn log10_metallicity(&self) -> &[f64] {
        &self.log10_metallicity
    }

    pub fn bracket(&self, metallicity: f64) -> MetallicityBracket {
        MetallicityBracket::locate(log10_metallicity(metallicity), &self.log10_metallicity)
    }

    /// Net yield of `element` per star in IMF bin `bin`.
    pub fn net_yield(&self, iz: usize, element: Element, bin: usize) -> f64 {
        self.yields[(iz * Element::COUNT + element.index()) * self.bins + bin]
    }

    /// Mass ejected per star in IMF bin `bin`.
    pub fn ejecta(&self, iz: usize, bin: usize) -> f64 {
        self.ejecta[iz * self.bins + bin]
    }

    /// Net metal yield per star in IMF bin `bin`, untracked metals included.
    pub fn total_metals(&self, iz: usize, bin: usize) -> f64 {
        self.total_metals[iz * self.bins + bin]
    }
}

/// Type Ia supernova yields per explosion (M☉).
#[derive(Debug, Clone, PartialEq)]
pub struct SnIaYields {
    elements: ElementArray,
    total_metals: f64,
}

impl SnIaYields {
    pub fn new(elements: ElementArray, total_metals: f64) -> Result<Self> {
        if !(total_metals.is_finite() && total_metals >= 0.0) {
            return Err(EvolutionError::InvalidTable {
                table: "SNIa",
                reason: format!("total metal yield {} must be non-negative", total_metals),
            });
        }
        Ok(Self {
            elements,
            total_metals,
        })
    }

    /// Pick the tracked elements out of a wider named table.
    pub fn from_named(named: &[(String, f64)], total_metals: f64) -> Result<Self> {
        let mut elements = ElementArray::zero();
        let mut seen = [false; Element::COUNT];
        for (name, value) in named {
            if let Ok(element) = name.parse::<Element>() {
                elements[element] = *value;
                seen[element.index()] = true;
            }
        }
        // SNIa produce no hydrogen or helium; tables may omit them
        if let Some(missing) = Element::ALL
            .into_iter()
            .filter(|e| e.is_metal())
            .find(|e| !seen[e.index()])
        {
            return Err(EvolutionError::InvalidTable {
                table: "SNIa",
                reason: format!("no {} yield", missing.name()),
            });
        }
        Self::new(elements, total_metals)
    }

    pub fn elements(&self) -> &ElementArray {
        &self.elements
    }

    pub fn total_metals(&self) -> f64 {
        self.total_metals
    }
}

fn check_increasing(table: &'static str, axis: &[f64]) -> Result<()> {
    match axis.windows(2).position(|w| !(w[1] > w[0])) {
        Some(i) => Err(EvolutionError::InvalidTable {
            table,
            reason: format!("metallicity axis is not strictly increasing at index {}", i + 1),
        }),
        None => Ok(()),
    }
}

fn check_len(table: &'static str, what: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(EvolutionError::InvalidTable {
            table,
            reason: format!("{} array has {} entries, expected {}", what, actual, expected),
        });
    }
    Ok(())
}
