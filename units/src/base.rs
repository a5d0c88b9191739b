//! The process-wide base unit table and SI prefixes.

use crate::dimension::{BaseDimension, Dimension, ReducedUnit};
use std::collections::HashMap;
use std::sync::OnceLock;

/// SI prefix with its factor.
#[derive(Debug, Clone, Copy)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub factor: f64,
}

impl Prefix {
    const fn new(symbol: &'static str, name: &'static str, factor: f64) -> Self {
        Prefix {
            symbol,
            name,
            factor,
        }
    }
}

/// SI prefixes. Multi-character symbols come first so `da` and `mu` win over
/// `d` and `m`.
pub const PREFIXES: &[Prefix] = &[
    Prefix::new("da", "deka", 1e1),
    Prefix::new("mu", "micro", 1e-6),
    Prefix::new("µ", "micro", 1e-6),
    Prefix::new("μ", "micro", 1e-6),
    Prefix::new("Y", "yotta", 1e24),
    Prefix::new("Z", "zetta", 1e21),
    Prefix::new("E", "exa", 1e18),
    Prefix::new("P", "peta", 1e15),
    Prefix::new("T", "tera", 1e12),
    Prefix::new("G", "giga", 1e9),
    Prefix::new("M", "mega", 1e6),
    Prefix::new("k", "kilo", 1e3),
    Prefix::new("h", "hecto", 1e2),
    Prefix::new("d", "deci", 1e-1),
    Prefix::new("c", "centi", 1e-2),
    Prefix::new("m", "milli", 1e-3),
    Prefix::new("u", "micro", 1e-6),
    Prefix::new("n", "nano", 1e-9),
    Prefix::new("p", "pico", 1e-12),
    Prefix::new("f", "femto", 1e-15),
    Prefix::new("a", "atto", 1e-18),
    Prefix::new("z", "zepto", 1e-21),
    Prefix::new("y", "yocto", 1e-24),
];

/// A named base unit.
#[derive(Debug, Clone, Copy)]
pub struct BaseUnit {
    pub name: &'static str,
    pub unit: ReducedUnit,
    /// Whether SI prefixes may be attached.
    pub prefixable: bool,
}

fn entry(
    table: &mut HashMap<&'static str, BaseUnit>,
    names: &[&'static str],
    dimension: Dimension,
    factor: f64,
    prefixable: bool,
) {
    for name in names {
        table.insert(
            name,
            BaseUnit {
                name,
                unit: ReducedUnit::new(dimension, factor),
                prefixable,
            },
        );
    }
}

fn table() -> &'static HashMap<&'static str, BaseUnit> {
    static TABLE: OnceLock<HashMap<&'static str, BaseUnit>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use BaseDimension::*;

        let length = Dimension::from_base(Length);
        let mass = Dimension::from_base(Mass);
        let time = Dimension::from_base(Time);
        let amount = Dimension::from_base(Amount);
        let volume = Dimension::from_base_power(Length, 3);

        let mut t = HashMap::new();
        entry(&mut t, &["metre", "meter", "m"], length, 1.0, true);
        entry(&mut t, &["gram", "g"], mass, 1e-3, true);
        entry(&mut t, &["kilogram", "kg"], mass, 1.0, false);
        entry(&mut t, &["second", "s", "sec"], time, 1.0, true);
        entry(&mut t, &["minute", "min"], time, 60.0, false);
        entry(&mut t, &["hour", "h", "hr"], time, 3600.0, false);
        entry(&mut t, &["day", "d"], time, 86400.0, false);
        entry(&mut t, &["litre", "liter", "l", "L"], volume, 1e-3, true);
        entry(&mut t, &["mole", "mol"], amount, 1.0, true);
        entry(
            &mut t,
            &["kelvin", "K"],
            Dimension::from_base(Temperature),
            1.0,
            true,
        );
        entry(
            &mut t,
            &["ampere", "A"],
            Dimension::from_base(Current),
            1.0,
            true,
        );
        entry(
            &mut t,
            &["candela", "cd"],
            Dimension::from_base(Luminosity),
            1.0,
            true,
        );
        entry(
            &mut t,
            &["dimensionless", "item"],
            Dimension::DIMENSIONLESS,
            1.0,
            false,
        );
        t
    })
}

/// Look up a base unit symbol, allowing an SI prefix on prefixable units.
///
/// Exact names win over prefix decomposition: `min` is a minute, `cd` a
/// candela, `mm` a millimetre.
pub fn base_unit(symbol: &str) -> Option<ReducedUnit> {
    let table = table();
    if let Some(base) = table.get(symbol) {
        return Some(base.unit);
    }
    PREFIXES.iter().find_map(|prefix| {
        let rest = symbol.strip_prefix(prefix.symbol)?;
        let base = table.get(rest)?;
        if base.prefixable {
            Some(base.unit.scaled(prefix.factor))
        } else {
            None
        }
    })
}

pub fn is_base_unit(symbol: &str) -> bool {
    base_unit(symbol).is_some()
}
