//! Tracked chemical elements.
//!
//! Yield tables and particle state share this enumeration, so every per-element
//! quantity is an [`ElementArray`] indexed by [`Element`] rather than by a bare
//! integer.

use std::ops::{AddAssign, Index, IndexMut, Mul};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The nine elements followed individually by the enrichment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Hydrogen,
    Helium,
    Carbon,
    Nitrogen,
    Oxygen,
    Neon,
    Magnesium,
    Silicon,
    Iron,
}

impl Element {
    /// Number of tracked elements.
    pub const COUNT: usize = 9;

    /// All tracked elements in table order.
    pub const ALL: [Element; Element::COUNT] = [
        Element::Hydrogen,
        Element::Helium,
        Element::Carbon,
        Element::Nitrogen,
        Element::Oxygen,
        Element::Neon,
        Element::Magnesium,
        Element::Silicon,
        Element::Iron,
    ];

    /// Position of the element along a yield table's element axis.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Chemical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Element::Hydrogen => "H",
            Element::Helium => "He",
            Element::Carbon => "C",
            Element::Nitrogen => "N",
            Element::Oxygen => "O",
            Element::Neon => "Ne",
            Element::Magnesium => "Mg",
            Element::Silicon => "Si",
            Element::Iron => "Fe",
        }
    }

    /// Full element name as written in yield table headers.
    pub fn name(self) -> &'static str {
        match self {
            Element::Hydrogen => "Hydrogen",
            Element::Helium => "Helium",
            Element::Carbon => "Carbon",
            Element::Nitrogen => "Nitrogen",
            Element::Oxygen => "Oxygen",
            Element::Neon => "Neon",
            Element::Magnesium => "Magnesium",
            Element::Silicon => "Silicon",
            Element::Iron => "Iron",
        }
    }

    /// True for elements heavier than helium.
    pub fn is_metal(self) -> bool {
        !matches!(self, Element::Hydrogen | Element::Helium)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returned when a name does not match any tracked element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrackedElement(pub String);

impl std::fmt::Display for UntrackedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a tracked element", self.0)
    }
}

impl std::error::Error for UntrackedElement {}

impl FromStr for Element {
    type Err = UntrackedElement;

    /// Accepts either the full name or the symbol, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Element::ALL
            .into_iter()
            .find(|e| {
                e.name().eq_ignore_ascii_case(trimmed) || e.symbol().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UntrackedElement(trimmed.to_string()))
    }
}

/// One value per tracked element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementArray([f64; Element::COUNT]);

impl ElementArray {
    pub fn zero() -> Self {
        Self([0.0; Element::COUNT])
    }

    /// Same value for every element.
    pub fn splat(value: f64) -> Self {
        Self([value; Element::COUNT])
    }

    pub fn from_fn(f: impl FnMut(Element) -> f64) -> Self {
        Self(Element::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.into_iter().zip(self.0.iter().copied())
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Sum over elements heavier than helium.
    pub fn metal_sum(&self) -> f64 {
        self.iter().filter(|(e, _)| e.is_metal()).map(|(_, v)| v).sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; Element::COUNT]> for ElementArray {
    fn from(values: [f64; Element::COUNT]) -> Self {
        Self(values)
    }
}

impl Index<Element> for ElementArray {
    type Output = f64;

    fn index(&self, element: Element) -> &f64 {
        &self.0[element.index()]
    }
}

impl IndexMut<Element> for ElementArray {
    fn index_mut(&mut self, element: Element) -> &mut f64 {
        &mut self.0[element.index()]
    }
}

impl AddAssign for ElementArray {
    fn add_assign(&mut self, rhs: ElementArray) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl Mul<f64> for ElementArray {
    type Output = ElementArray;

    fn mul(self, rhs: f64) -> ElementArray {
        Self(self.0.map(|v| v * rhs))
    }
}
