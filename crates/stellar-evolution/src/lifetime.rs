//! Stellar lifetimes.
//!
//! Converts between the initial mass of a star and the age at which it dies.
//! Three formulations are supported:
//!
//! - **Padovani & Matteucci (1993)**: metallicity-independent closed form
//! - **Maeder & Meynet (1989)**: metallicity-independent, six power-law branches
//! - **Portinari et al. (1998)**: table of log10 lifetimes over mass and metallicity
//!
//! All three saturate at [`MAX_PROGENITOR_MASS_MSUN`] for ages below the
//! shortest stellar lifetime.
//!
//! # References
//! - Padovani & Matteucci (1993) - ApJ 416, 26
//! - Maeder & Meynet (1989) - A&A 210, 155
//! - Portinari, Chiosi & Bressan (1998) - A&A 334, 505

use units::Time;

use crate::error::{EvolutionError, Result};

/// Upper end of the IMF; no star more massive than this ever dies.
pub const MAX_PROGENITOR_MASS_MSUN: f64 = 100.0;

/// Stellar lifetimes tabulated over initial mass and metallicity.
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeTable {
    /// Initial stellar mass (M☉), strictly increasing
    mass: Vec<f64>,
    /// Metallicity mass fraction, strictly increasing
    metallicity: Vec<f64>,
    /// log10 of the lifetime in years, `[metallicity][mass]`
    log_dying_time: Vec<Vec<f64>>,
}

impl LifetimeTable {
    pub fn new(
        mass: Vec<f64>,
        metallicity: Vec<f64>,
        log_dying_time: Vec<Vec<f64>>,
    ) -> Result<Self> {
        check_axis("lifetime", "mass", &mass)?;
        check_axis("lifetime", "metallicity", &metallicity)?;
        if log_dying_time.len() != metallicity.len() {
            return Err(EvolutionError::InvalidTable {
                table: "lifetime",
                reason: format!(
                    "{} dying time rows for {} metallicities",
                    log_dying_time.len(),
                    metallicity.len()
                ),
            });
        }
        if let Some(row) = log_dying_time.iter().position(|row| row.len() != mass.len()) {
            return Err(EvolutionError::InvalidTable {
                table: "lifetime",
                reason: format!(
                    "row {} has {} entries for {} masses",
                    row,
                    log_dying_time[row].len(),
                    mass.len()
                ),
            });
        }
        Ok(Self {
            mass,
            metallicity,
            log_dying_time,
        })
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn metallicity(&self) -> &[f64] {
        &self.metallicity
    }

    pub fn log_dying_time(&self) -> &[Vec<f64>] {
        &self.log_dying_time
    }

    fn dying_mass(&self, age: Time, metallicity: f64) -> f64 {
        if !age.is_positive() {
            return MAX_PROGENITOR_MASS_MSUN;
        }
        let log_age_yr = age.log10_years();

        let (iz, d_metal) = clamped_bracket(&self.metallicity, metallicity);
        let mass1 = self.mass_in_row(iz, log_age_yr);
        let mass2 = self.mass_in_row(iz + 1, log_age_yr);

        (1.0 - d_metal) * mass1 + d_metal * mass2
    }

    /// Mass of stars dying at `log_age_yr` along one metallicity row.
    ///
    /// Lifetimes decrease with mass, so the scan runs from the massive end
    /// towards low masses until the tabulated lifetime reaches the query.
    fn mass_in_row(&self, row: usize, log_age_yr: f64) -> f64 {
        let times = &self.log_dying_time[row];
        let n = times.len();

        let (index, weight) = if log_age_yr >= times[0] {
            (0, 0.0)
        } else if log_age_yr <= times[n - 1] {
            (n - 2, 1.0)
        } else {
            // times[n - 1] < log_age_yr < times[0], so some i < n - 1 matches
            let i = (0..n - 1)
                .rev()
                .find(|&i| times[i] >= log_age_yr)
                .unwrap_or(0);
            let weight = (log_age_yr - times[i]) / (times[i + 1] - times[i]);
            (i, weight)
        };

        (1.0 - weight) * self.mass[index] + weight * self.mass[index + 1]
    }

    fn lifetime(&self, mass: f64, metallicity: f64) -> Time {
        let (im, d_mass) = clamped_bracket(&self.mass, mass);
        let (iz, d_metal) = clamped_bracket(&self.metallicity, metallicity);
        let t = &self.log_dying_time;

        let log_time = (1.0 - d_metal) * (1.0 - d_mass) * t[iz][im]
            + (1.0 - d_metal) * d_mass * t[iz][im + 1]
            + d_metal * (1.0 - d_mass) * t[iz + 1][im]
            + d_metal * d_mass * t[iz + 1][im + 1];

        Time::from_log10_years(log_time)
    }
}

/// Stellar lifetime formulation, chosen once when the population properties
/// are built.
#[derive(Debug, Clone, PartialEq)]
pub enum LifetimeModel {
    PadovaniMatteucci,
    MaederMeynet,
    Tabulated(LifetimeTable),
}

impl LifetimeModel {
    /// Initial mass (M☉) of the stars whose lifetime equals `age`.
    ///
    /// Never exceeds [`MAX_PROGENITOR_MASS_MSUN`].
    pub fn dying_mass(&self, age: Time, metallicity: f64) -> f64 {
        let mass = match self {
            LifetimeModel::PadovaniMatteucci => padovani_matteucci_dying_mass(age.to_gyr()),
            LifetimeModel::MaederMeynet => maeder_meynet_dying_mass(age.to_gyr()),
            LifetimeModel::Tabulated(table) => table.dying_mass(age, metallicity),
        };
        mass.min(MAX_PROGENITOR_MASS_MSUN)
    }

    /// Lifetime of a star of initial mass `mass` (M☉).
    pub fn lifetime(&self, mass: f64, metallicity: f64) -> Time {
        match self {
            LifetimeModel::PadovaniMatteucci => Time::from_gyr(padovani_matteucci_lifetime(mass)),
            LifetimeModel::MaederMeynet => Time::from_gyr(maeder_meynet_lifetime(mass)),
            LifetimeModel::Tabulated(table) => table.lifetime(mass, metallicity),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LifetimeModel::PadovaniMatteucci => "Padovani & Matteucci (1993)",
            LifetimeModel::MaederMeynet => "Maeder & Meynet (1989)",
            LifetimeModel::Tabulated(_) => "Portinari et al. (1998) table",
        }
    }
}

fn padovani_matteucci_dying_mass(age_gyr: f64) -> f64 {
    if age_gyr > 0.039_765_318_659_064_693 {
        let x = 1.338 - 0.1116 * (9.0 + age_gyr.log10());
        10f64.powf(7.764 - (1.79 - x * x) / 0.2232)
    } else if age_gyr > 0.003 {
        ((age_gyr - 0.003) / 1.2).powf(-1.0 / 1.85)
    } else {
        MAX_PROGENITOR_MASS_MSUN
    }
}

fn padovani_matteucci_lifetime(mass: f64) -> f64 {
    if mass <= 0.6 {
        160.0
    } else if mass <= 6.6 {
        10f64.powf((0.334 - (1.790 - 0.2232 * (7.764 - mass.log10())).sqrt()) / 0.1116)
    } else {
        1.2 * mass.powf(-1.85) + 0.003
    }
}

fn maeder_meynet_dying_mass(age_gyr: f64) -> f64 {
    if age_gyr <= 0.003 {
        return MAX_PROGENITOR_MASS_MSUN;
    }
    let log_age = age_gyr.log10();
    if age_gyr >= 8.409_737_8 {
        10f64.powf((1.0 - log_age) / 0.6545)
    } else if age_gyr >= 0.352_077_76 {
        10f64.powf((1.35 - log_age) / 3.7)
    } else if age_gyr >= 0.050_931_493 {
        10f64.powf((0.77 - log_age) / 2.51)
    } else if age_gyr >= 0.010_529_099 {
        10f64.powf((0.17 - log_age) / 1.78)
    } else if age_gyr >= 0.003_773_478_7 {
        10f64.powf((-0.94 - log_age) / 0.86)
    } else {
        ((age_gyr - 0.003) / 1.2).powf(-0.540_540_53)
    }
}

fn maeder_meynet_lifetime(mass: f64) -> f64 {
    let log_mass = mass.log10();
    if mass <= 1.3 {
        10f64.powf(-0.6545 * log_mass + 1.0)
    } else if mass <= 3.0 {
        10f64.powf(-3.7 * log_mass + 1.35)
    } else if mass <= 7.0 {
        10f64.powf(-2.51 * log_mass + 0.77)
    } else if mass <= 15.0 {
        10f64.powf(-1.78 * log_mass + 0.17)
    } else if mass <= 60.0 {
        10f64.powf(-0.86 * log_mass - 0.94)
    } else {
        1.2 * mass.powf(-1.85) + 0.003
    }
}

/// Bracket `value` on a strictly increasing axis, clamping at both ends.
///
/// Returns the lower index and the linear weight of the upper neighbour:
/// `(0, 0.0)` at or below the first entry, `(n - 2, 1.0)` at or above the last.
pub(crate) fn clamped_bracket(axis: &[f64], value: f64) -> (usize, f64) {
    let n = axis.len();
    if value <= axis[0] {
        (0, 0.0)
    } else if value >= axis[n - 1] {
        (n - 2, 1.0)
    } else {
        let i = (0..n - 1).find(|&i| axis[i + 1] > value).unwrap_or(n - 2);
        (i, (value - axis[i]) / (axis[i + 1] - axis[i]))
    }
}

/// A table axis needs at least two points and must be strictly increasing.
pub(crate) fn check_axis(table: &'static str, axis: &str, values: &[f64]) -> Result<()> {
    if values.len() < 2 {
        return Err(EvolutionError::InvalidTable {
            table,
            reason: format!("{} axis needs at least two points, got {}", axis, values.len()),
        });
    }
    if let Some(i) = values.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(EvolutionError::InvalidTable {
            table,
            reason: format!(
                "{} axis is not strictly increasing at index {} ({} -> {})",
                axis,
                i + 1,
                values[i],
                values[i + 1]
            ),
        });
    }
    Ok(())
}
