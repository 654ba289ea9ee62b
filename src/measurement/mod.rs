// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement descriptions.
//!
//! A [`Measurement`] names one value the appliance reports: where it lives
//! in the response tree ([`FieldPath`]), its physical [`Unit`] and an
//! optional [`Derivation`] applied on read. Array-valued fields (per phase,
//! per battery module, per cell) are described by a [`Series`], from which
//! single-element measurements are taken.
//!
//! The [`catalog`] module lists every measurement this crate knows about.
//! Reading them is done through [`Snapshot`](crate::snapshot::Snapshot).
//!
//! # Examples
//!
//! ```
//! use senec_lib::measurement::{catalog, Derivation, Unit};
//!
//! let m = catalog::BATTERY_DISCHARGE_POWER;
//! assert_eq!(m.path().to_string(), "ENERGY.GUI_BAT_DATA_POWER");
//! assert_eq!(m.unit(), Unit::Watt);
//! assert_eq!(m.derivation().apply(-250.0), 250.0);
//! ```

pub mod catalog;

use std::fmt;

// ============================================================================
// FieldPath
// ============================================================================

/// A fixed location in a normalized response: group, field and an optional
/// array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath {
    group: &'static str,
    field: &'static str,
    index: Option<usize>,
}

impl FieldPath {
    /// Creates a path to a whole field.
    #[must_use]
    pub const fn new(group: &'static str, field: &'static str) -> Self {
        Self {
            group,
            field,
            index: None,
        }
    }

    /// Returns the same field narrowed to one array element.
    #[must_use]
    pub const fn at(self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    pub(crate) const fn with_index(self, index: Option<usize>) -> Self {
        Self { index, ..self }
    }

    /// Returns the group name (top-level key).
    #[must_use]
    pub const fn group(&self) -> &'static str {
        self.group
    }

    /// Returns the field name within the group.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the array index, if any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.field)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit
// ============================================================================

/// Physical unit of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Watts.
    Watt,
    /// Kilowatt-hours.
    KilowattHour,
    /// Degrees Celsius.
    Celsius,
    /// Percent.
    Percent,
    /// Volts.
    Volt,
    /// Millivolts.
    Millivolt,
    /// Amperes.
    Ampere,
    /// Hertz.
    Hertz,
    /// Counters, flags, codes and versions.
    None,
}

impl Unit {
    /// Returns the unit symbol, empty for [`Unit::None`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Watt => "W",
            Self::KilowattHour => "kWh",
            Self::Celsius => "°C",
            Self::Percent => "%",
            Self::Volt => "V",
            Self::Millivolt => "mV",
            Self::Ampere => "A",
            Self::Hertz => "Hz",
            Self::None => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Computation applied to a numeric value when it is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derivation {
    /// The value as reported.
    Identity,
    /// Positive part, zero otherwise (charging, grid import).
    PositivePart,
    /// Magnitude of the negative part, zero otherwise (discharging, export).
    NegativePart,
    /// Absolute value.
    Absolute,
    /// Multiplied by a constant factor.
    Scale(f64),
}

impl Derivation {
    /// Applies the derivation to a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use senec_lib::measurement::Derivation;
    ///
    /// assert_eq!(Derivation::PositivePart.apply(-250.0), 0.0);
    /// assert_eq!(Derivation::NegativePart.apply(-250.0), 250.0);
    /// assert_eq!(Derivation::Scale(0.001).apply(2500.0), 2.5);
    /// ```
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::PositivePart => {
                if value > 0.0 {
                    value
                } else {
                    0.0
                }
            }
            Self::NegativePart => {
                if value < 0.0 {
                    -value
                } else {
                    0.0
                }
            }
            Self::Absolute => value.abs(),
            Self::Scale(factor) => value * factor,
        }
    }

    /// Returns `true` if the value is passed through unchanged.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Identity)
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// A named value read from a fixed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    name: &'static str,
    path: FieldPath,
    unit: Unit,
    derivation: Derivation,
}

impl Measurement {
    /// Creates a measurement that reports the value as-is.
    #[must_use]
    pub const fn new(name: &'static str, path: FieldPath, unit: Unit) -> Self {
        Self {
            name,
            path,
            unit,
            derivation: Derivation::Identity,
        }
    }

    /// Sets the derivation applied on read.
    #[must_use]
    pub const fn with_derivation(mut self, derivation: Derivation) -> Self {
        self.derivation = derivation;
        self
    }

    /// Returns the measurement name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the location of the raw value.
    #[must_use]
    pub const fn path(&self) -> FieldPath {
        self.path
    }

    /// Returns the physical unit.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the derivation applied on read.
    #[must_use]
    pub const fn derivation(&self) -> Derivation {
        self.derivation
    }
}

// ============================================================================
// Series
// ============================================================================

/// A fixed-length array field, one element per phase, module, cell, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series {
    name: &'static str,
    path: FieldPath,
    len: usize,
    unit: Unit,
}

impl Series {
    /// Creates a series description.
    #[must_use]
    pub const fn new(name: &'static str, path: FieldPath, len: usize, unit: Unit) -> Self {
        Self {
            name,
            path,
            len,
            unit,
        }
    }

    /// Returns the series name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the path of the whole array.
    #[must_use]
    pub const fn path(&self) -> FieldPath {
        self.path
    }

    /// Returns the number of elements the appliance reports.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the series has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the unit shared by all elements.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the measurement for one element, `None` past the end.
    ///
    /// Every element shares the series name; the element is identified by
    /// the index in its [`path`](Measurement::path).
    #[must_use]
    pub const fn at(&self, index: usize) -> Option<Measurement> {
        if index < self.len {
            Some(Measurement::new(self.name, self.path.at(index), self.unit))
        } else {
            None
        }
    }
}

// ============================================================================
// Indices
// ============================================================================

/// AC phase of the grid meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// First phase.
    L1,
    /// Second phase.
    L2,
    /// Third phase.
    L3,
}

impl Phase {
    /// All phases in order.
    pub const ALL: [Self; 3] = [Self::L1, Self::L2, Self::L3];

    /// Returns the array index of the phase.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::L1 => 0,
            Self::L2 => 1,
            Self::L3 => 2,
        }
    }
}

/// Battery module as numbered by the BMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryModule {
    /// Module A.
    A,
    /// Module B.
    B,
    /// Module C.
    C,
    /// Module D.
    D,
}

impl BatteryModule {
    /// All modules in order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Returns the array index of the module in per-module BMS fields.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Returns the per-cell temperature series of this module.
    #[must_use]
    pub const fn cell_temperatures(self) -> Series {
        match self {
            Self::A => catalog::BMS_CELL_TEMPERATURES_A,
            Self::B => catalog::BMS_CELL_TEMPERATURES_B,
            Self::C => catalog::BMS_CELL_TEMPERATURES_C,
            Self::D => catalog::BMS_CELL_TEMPERATURES_D,
        }
    }

    /// Returns the per-cell voltage series of this module.
    #[must_use]
    pub const fn cell_voltages(self) -> Series {
        match self {
            Self::A => catalog::BMS_CELL_VOLTAGES_A,
            Self::B => catalog::BMS_CELL_VOLTAGES_B,
            Self::C => catalog::BMS_CELL_VOLTAGES_C,
            Self::D => catalog::BMS_CELL_VOLTAGES_D,
        }
    }
}

// ============================================================================
// Reading
// ============================================================================

/// A value read from a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// A numeric value, after derivation.
    Number(f64),
    /// A boolean value.
    Flag(bool),
    /// A string the normalizer did not decode.
    Text(String),
}

impl Reading {
    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a boolean.
    ///
    /// Numbers count as `true` when non-zero; the appliance reports several
    /// on/off states as plain integers.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Number(value) => Some(*value != 0.0),
            Self::Text(_) => None,
        }
    }

    /// Returns the string value, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}
