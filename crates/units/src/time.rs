use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Years in one Gyr
pub const YEARS_PER_GYR: f64 = 1.0e9;

/// Myr in one Gyr
const MYR_PER_GYR: f64 = 1.0e3;

/// Seconds in one Julian year (365.25 days)
pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;

/// A physical time quantity using f64 precision.
///
/// The base unit is the gigayear, which is the natural unit for stellar
/// lifetimes and population ages. Lifetime tables are tabulated in log10 of
/// years, so conversions in both directions are provided.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let age = Time::from_myr(40.0);
/// assert!((age.to_gyr() - 0.04).abs() < 1e-12);
///
/// let step = Time::from_years(5.0e6);
/// let later = age + step;
/// assert!((later.to_myr() - 45.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Gyr

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in Gyr.
    pub fn from_gyr(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in million years.
    pub fn from_myr(value: f64) -> Self {
        Self(value / MYR_PER_GYR)
    }

    /// Creates a new `Time` from a value in years.
    pub fn from_years(value: f64) -> Self {
        Self(value / YEARS_PER_GYR)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self::from_years(value / SECONDS_PER_YEAR)
    }

    /// Creates a new `Time` from a value in simulation-internal time units.
    ///
    /// `gyr_per_unit` is the length of one internal time unit in Gyr.
    pub fn from_internal(value: f64, gyr_per_unit: f64) -> Self {
        Self(value * gyr_per_unit)
    }

    /// Returns the time in Gyr.
    pub fn to_gyr(&self) -> f64 {
        self.0
    }

    /// Returns the time in million years.
    pub fn to_myr(&self) -> f64 {
        self.0 * MYR_PER_GYR
    }

    /// Returns the time in years.
    pub fn to_years(&self) -> f64 {
        self.0 * YEARS_PER_GYR
    }

    /// Returns the time in seconds.
    pub fn to_seconds(&self) -> f64 {
        self.to_years() * SECONDS_PER_YEAR
    }

    /// log10 of the time in years, the axis used by stellar lifetime tables.
    pub fn log10_years(&self) -> f64 {
        self.to_years().log10()
    }

    /// Inverse of [`Time::log10_years`].
    pub fn from_log10_years(value: f64) -> Self {
        Self::from_years(10f64.powf(value))
    }

    /// True if the time is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// The larger of two times.
    pub fn max(self, other: Time) -> Time {
        Time(self.0.max(other.0))
    }

    /// The smaller of two times.
    pub fn min(self, other: Time) -> Time {
        Time(self.0.min(other.0))
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.0 += rhs.0;
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}

/// Division of Time by Time returns a dimensionless ratio
impl Div for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Time> for f64 {
    type Output = Time;

    fn mul(self, rhs: Time) -> Time {
        rhs * self
    }
}
