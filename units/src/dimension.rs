//! Dimension vectors and reduced units.

use serde::Serialize;
use std::fmt;

/// The seven SI base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Amount,
    Temperature,
    Current,
    Luminosity,
}

impl BaseDimension {
    /// SI symbol of the coherent base unit.
    pub fn si_symbol(&self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "kg",
            BaseDimension::Time => "s",
            BaseDimension::Amount => "mol",
            BaseDimension::Temperature => "K",
            BaseDimension::Current => "A",
            BaseDimension::Luminosity => "cd",
        }
    }

    pub fn all() -> &'static [BaseDimension] {
        &[
            BaseDimension::Length,
            BaseDimension::Mass,
            BaseDimension::Time,
            BaseDimension::Amount,
            BaseDimension::Temperature,
            BaseDimension::Current,
            BaseDimension::Luminosity,
        ]
    }

    fn slot(&self) -> usize {
        match self {
            BaseDimension::Length => 0,
            BaseDimension::Mass => 1,
            BaseDimension::Time => 2,
            BaseDimension::Amount => 3,
            BaseDimension::Temperature => 4,
            BaseDimension::Current => 5,
            BaseDimension::Luminosity => 6,
        }
    }
}

/// Exponent vector over the base dimensions.
///
/// Examples:
/// - volume: L^3
/// - concentration: N L^-3
/// - first-order rate constant: T^-1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Dimension([i32; 7]);

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension([0; 7]);

    pub fn dimensionless() -> Self {
        Self::DIMENSIONLESS
    }

    pub fn from_base(base: BaseDimension) -> Self {
        Self::from_base_power(base, 1)
    }

    pub fn from_base_power(base: BaseDimension, power: i32) -> Self {
        let mut exps = [0; 7];
        exps[base.slot()] = power;
        Dimension(exps)
    }

    pub fn exponent(&self, base: BaseDimension) -> i32 {
        self.0[base.slot()]
    }

    pub fn exponents(&self) -> &[i32; 7] {
        &self.0
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// `None` when an exponent leaves the `i32` range.
    pub fn checked_pow(&self, n: i32) -> Option<Self> {
        let mut exps = self.0;
        for e in &mut exps {
            *e = e.checked_mul(n)?;
        }
        Some(Dimension(exps))
    }

    pub fn checked_mul(&self, rhs: &Dimension) -> Option<Self> {
        let mut exps = self.0;
        for (e, r) in exps.iter_mut().zip(rhs.0.iter()) {
            *e = e.checked_add(*r)?;
        }
        Some(Dimension(exps))
    }

    pub fn checked_div(&self, rhs: &Dimension) -> Option<Self> {
        let mut exps = self.0;
        for (e, r) in exps.iter_mut().zip(rhs.0.iter()) {
            *e = e.checked_sub(*r)?;
        }
        Some(Dimension(exps))
    }

    /// The nth root, if every exponent is divisible by `n`.
    pub fn root(&self, n: i32) -> Option<Self> {
        if n == 0 || self.0.iter().any(|e| e % n != 0) {
            return None;
        }
        let mut exps = self.0;
        for e in &mut exps {
            *e /= n;
        }
        Some(Dimension(exps))
    }

    /// Length, area or volume.
    pub fn is_spatial(&self) -> bool {
        matches!(self.spatial_dimensions(), Some(1..=3))
    }

    pub fn is_volume(&self) -> bool {
        self.spatial_dimensions() == Some(3)
    }

    /// Number of spatial dimensions if this is a pure power of length.
    pub fn spatial_dimensions(&self) -> Option<i32> {
        let length = self.exponent(BaseDimension::Length);
        let others_zero = BaseDimension::all()
            .iter()
            .filter(|b| **b != BaseDimension::Length)
            .all(|b| self.exponent(*b) == 0);
        if others_zero {
            Some(length)
        } else {
            None
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        let mut first = true;
        for base in BaseDimension::all() {
            let exp = self.exponent(*base);
            if exp == 0 {
                continue;
            }
            if !first {
                f.write_str("·")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{}", base.si_symbol())?;
            } else {
                write!(f, "{}^{}", base.si_symbol(), exp)?;
            }
        }
        Ok(())
    }
}

/// A unit reduced to a dimension vector and an aggregate factor to SI.
///
/// `mmole/liter` reduces to `mol·m^-3` with factor `1.0`, `min` to `s` with
/// factor `60.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReducedUnit {
    pub dimension: Dimension,
    pub factor: f64,
}

impl ReducedUnit {
    pub fn new(dimension: Dimension, factor: f64) -> Self {
        Self { dimension, factor }
    }

    pub fn dimensionless() -> Self {
        Self::new(Dimension::DIMENSIONLESS, 1.0)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Dimension-only compatibility.
    pub fn is_compatible_with(&self, other: &ReducedUnit) -> bool {
        self.dimension == other.dimension
    }

    /// Equal dimension and factor (to a relative tolerance).
    pub fn is_equivalent_to(&self, other: &ReducedUnit) -> bool {
        self.is_compatible_with(other) && relative_eq(self.factor, other.factor)
    }

    pub fn checked_powi(&self, n: i32) -> Option<Self> {
        Some(Self::new(self.dimension.checked_pow(n)?, self.factor.powi(n)))
    }

    pub fn checked_mul(&self, rhs: &ReducedUnit) -> Option<Self> {
        Some(Self::new(
            self.dimension.checked_mul(&rhs.dimension)?,
            self.factor * rhs.factor,
        ))
    }

    pub fn checked_div(&self, rhs: &ReducedUnit) -> Option<Self> {
        Some(Self::new(
            self.dimension.checked_div(&rhs.dimension)?,
            self.factor / rhs.factor,
        ))
    }

    pub fn root(&self, n: i32) -> Option<Self> {
        let dimension = self.dimension.root(n)?;
        Some(Self::new(dimension, self.factor.powf(1.0 / n as f64)))
    }

    pub fn scaled(&self, by: f64) -> Self {
        Self::new(self.dimension, self.factor * by)
    }
}


impl fmt::Display for ReducedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if relative_eq(self.factor, 1.0) {
            write!(f, "{}", self.dimension)
        } else {
            write!(f, "{} {}", self.factor, self.dimension)
        }
    }
}

pub(crate) fn relative_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= scale * 1e-9
}
