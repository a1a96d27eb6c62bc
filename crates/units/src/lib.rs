//! Dimensional newtypes for stellar population quantities.

pub mod mass;
pub mod time;


pub use mass::{Mass, SOLAR_MASS_G};
pub use time::{SECONDS_PER_YEAR, Time, YEARS_PER_GYR};
